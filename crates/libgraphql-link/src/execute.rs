use crate::Link;
use crate::link::Forward;
use crate::observable::Observable;
use crate::operation::ExecuteContext;
use crate::operation::Operation;
use crate::request::GraphQLRequest;
use crate::request::RequestValidationError;
use crate::result::FetchResult;
use serde_json::Value;

/// Run `request` through `link`.
///
/// A fresh [`Operation`] (with its own context) is created for every call.
/// The returned observable is cold: the chain's streams only start when it
/// is consumed.
pub fn execute(link: &Link, request: GraphQLRequest) -> Observable<FetchResult> {
    execute_with_context(link, request, ExecuteContext::default())
}

pub fn execute_with_context(
    link: &Link,
    request: GraphQLRequest,
    execute_context: ExecuteContext,
) -> Observable<FetchResult> {
    let operation = Operation::from_request(request, execute_context);
    tracing::trace!(
        operation_name = operation.operation_name(),
        link = link.name(),
        "executing operation",
    );
    link.request(operation, Forward::end_of_chain())
        .unwrap_or_else(Observable::empty)
}

/// Validate a raw JSON request object and run it through `link`.
///
/// Validation happens before any link runs; an invalid request never
/// reaches the chain.
pub fn execute_json(
    link: &Link,
    raw_request: &Value,
    execute_context: ExecuteContext,
) -> Result<Observable<FetchResult>, RequestValidationError> {
    let request = GraphQLRequest::from_json(raw_request)?;
    Ok(execute_with_context(link, request, execute_context))
}

