mod graphql_request;
mod request_key;
mod request_validation_error;


pub use graphql_request::GraphQLRequest;
pub use request_key::RequestKey;
pub use request_validation_error::RequestValidationError;
