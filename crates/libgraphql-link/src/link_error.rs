use crate::result::GraphQLError;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// A terminal error delivered on a link's result stream.
///
/// GraphQL errors reported by a server inside a successful response are
/// *not* [`LinkError`]s; they travel as data inside
/// [`FetchResult`](crate::result::FetchResult). A [`LinkError`] means the
/// operation did not produce (further) results.
#[derive(Clone, Debug, Error)]
pub enum LinkError {
    /// The server answered with a non-success status code, or with a
    /// successful status but a body that is not a GraphQL response.
    #[error("{message}")]
    Server {
        status_code: u16,
        message: String,
        body: String,
        result: Option<Value>,
    },

    #[error("Failed to parse server response (status {status_code}): {message}")]
    ServerParse {
        status_code: u16,
        message: String,
        body: String,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
    },

    #[error("GraphQL errors: {}", display_messages(.errors))]
    GraphQL {
        errors: Vec<GraphQLError>,
    },

    #[error("Failed to compute persisted query hash: {message}")]
    PersistedQueryHash {
        message: String,
    },

    #[error("Local resolver for `{field}` failed: {message}")]
    LocalResolver {
        field: String,
        message: String,
    },

    #[error(transparent)]
    Other(Arc<dyn std::error::Error + Send + Sync>),
}
impl LinkError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn other(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(error))
    }

    /// GraphQL errors carried by this error: either the errors of a
    /// [`LinkError::GraphQL`], or the `errors` list embedded in the parsed
    /// body of a [`LinkError::Server`].
    pub fn graphql_errors(&self) -> Vec<GraphQLError> {
        match self {
            Self::GraphQL { errors } => errors.clone(),
            Self::Server { result: Some(body), .. } =>
                GraphQLError::list_from_json(body),
            _ => vec![],
        }
    }

    /// The HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { status_code, .. }
                | Self::ServerParse { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

fn display_messages(errors: &[GraphQLError]) -> String {
    errors.iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
