//! The link unit and its composition algebra.

mod compose;
mod forward;
mod link;
mod link_kind;
mod request_handler;
mod split_test_outcome;


pub use compose::concat;
pub use compose::from;
pub use compose::split;
pub use forward::Forward;
pub use link::Link;
pub use link_kind::LinkKind;
pub use request_handler::RequestHandler;
pub use request_handler::TerminatingRequestHandler;
pub use split_test_outcome::SplitTestOutcome;
