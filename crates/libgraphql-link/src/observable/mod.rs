//! A lazy, cancellable, single-subscriber stream of results.
//!
//! Every link produces an [`Observable`]. Nothing happens until the
//! observable is consumed with [`Observable::stream()`] or
//! [`Observable::subscribe()`], and each consumer re-runs the producer from
//! scratch.

mod observable;
mod observer;
mod subscription;


pub use observable::Observable;
pub use observable::ResultStream;
pub use observer::Observer;
pub use subscription::Subscription;
