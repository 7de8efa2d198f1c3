use crate::document::DocumentParseError;
use crate::request::RequestKey;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RequestValidationError {
    #[error("illegal argument: {key}")]
    IllegalKey {
        key: String,
    },

    #[error("Invalid type for `{key}`: expected {expected}")]
    InvalidFieldType {
        key: RequestKey,
        expected: &'static str,
    },

    #[error("A GraphQL request must be a JSON object")]
    NotAnObject,

    #[error("A GraphQL request must include a `query`")]
    MissingQuery,

    #[error(transparent)]
    InvalidQuery(#[from] DocumentParseError),
}
