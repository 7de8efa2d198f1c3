use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DocumentParseError {
    #[error("GraphQL document contains no operation definitions.")]
    NoOperations,

    #[error("Failed to parse GraphQL document: {message}")]
    Syntax {
        message: String,
    },
}
