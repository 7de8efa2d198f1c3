//! Links built on top of the chain core.

pub mod http;
pub mod local_state;
pub mod metrics;
pub mod persisted_queries;
pub mod remove_typename;
pub mod retry;
