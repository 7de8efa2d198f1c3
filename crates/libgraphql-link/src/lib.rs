//! A composable request pipeline ("link chain") for executing GraphQL
//! operations.
//!
//! A [`Link`] is a single stage of the pipeline. Links are combined with
//! [`concat()`], [`from()`] and [`split()`] into a tree, and an operation is
//! driven through that tree with [`execute()`]. Every link produces an
//! [`Observable`](observable::Observable): a lazy, cancellable stream of
//! [`FetchResult`](result::FetchResult)s that does no work until it is
//! subscribed to.
//!
//! The [`links`] module provides the stateful links built on top of this
//! core: persisted queries, retries, `__typename` stripping, `@client` field
//! resolution, metrics and an HTTP transport.

mod context;
pub mod diagnostics;
pub mod document;
mod execute;
pub mod link;
mod link_error;
pub mod links;
pub mod observable;
pub mod operation;
pub mod request;
pub mod result;

#[cfg(test)]
mod test;

pub use context::Context;
pub use execute::execute;
pub use execute::execute_json;
pub use execute::execute_with_context;
pub use link::concat;
pub use link::from;
pub use link::split;
pub use link::Link;
pub use link_error::LinkError;

/// A JSON object, as used for variables, extensions and context values.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
