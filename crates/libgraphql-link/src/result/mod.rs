mod execution_result;
mod fetch_result;
mod graphql_error;
mod incremental_result;


pub use execution_result::ExecutionResult;
pub use fetch_result::FetchResult;
pub use graphql_error::GraphQLError;
pub use graphql_error::GraphQLErrorLocation;
pub use graphql_error::PathSegment;
pub use incremental_result::IncrementalPayload;
pub use incremental_result::InitialIncrementalResult;
pub use incremental_result::SubsequentIncrementalResult;
