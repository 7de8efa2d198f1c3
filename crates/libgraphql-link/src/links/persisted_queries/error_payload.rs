use crate::LinkError;
use crate::operation::Operation;
use crate::result::FetchResult;
use crate::result::GraphQLError;

/// What a persisted query link knows about a failed attempt. Passed to the
/// link's `disable` and `retry` predicates.
#[derive(Clone, Debug)]
pub struct ErrorPayload {
    /// The result carrying GraphQL errors, if the attempt produced one.
    pub response: Option<FetchResult>,

    /// The stream error, if the attempt failed outright.
    pub network_error: Option<LinkError>,

    pub operation: Operation,

    /// Every GraphQL error from `response` and from a parseable body
    /// embedded in `network_error`.
    pub graphql_errors: Vec<GraphQLError>,

    pub meta: PersistedQueryErrorMeta,
}
impl ErrorPayload {
    pub(crate) fn new(
        response: Option<FetchResult>,
        network_error: Option<LinkError>,
        operation: Operation,
    ) -> Self {
        let mut graphql_errors: Vec<GraphQLError> =
            response.iter()
                .flat_map(|response| response.errors())
                .cloned()
                .collect();
        if let Some(network_error) = &network_error {
            graphql_errors.extend(network_error.graphql_errors());
        }

        let meta = PersistedQueryErrorMeta::from_errors(&graphql_errors);
        Self {
            response,
            network_error,
            operation,
            graphql_errors,
            meta,
        }
    }
}

/// Which persisted query failures, if any, a set of GraphQL errors
/// signals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PersistedQueryErrorMeta {
    /// The server does not know the hash it was sent.
    pub persisted_query_not_found: bool,

    /// The server does not support persisted queries at all.
    pub persisted_query_not_supported: bool,
}
impl PersistedQueryErrorMeta {
    pub fn from_errors<'a>(errors: impl IntoIterator<Item = &'a GraphQLError>) -> Self {
        let mut meta = Self::default();
        for error in errors {
            let code = error.code();
            if error.message == "PersistedQueryNotFound"
                || code == Some("PERSISTED_QUERY_NOT_FOUND") {
                meta.persisted_query_not_found = true;
            }
            if error.message == "PersistedQueryNotSupported"
                || code == Some("PERSISTED_QUERY_NOT_SUPPORTED") {
                meta.persisted_query_not_supported = true;
            }
        }
        meta
    }
}
