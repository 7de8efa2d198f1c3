
pub(crate) use delayed_link::delayed_link;
pub(crate) use diagnostic_capture::DiagnosticCapture;
pub(crate) use recording_link::Recorded;
pub(crate) use recording_link::Recorder;

use crate::LinkError;
use crate::document::QueryDocument;
use crate::observable::Observable;
use crate::result::ExecutionResult;
use crate::result::FetchResult;
use futures::StreamExt;
use serde_json::Value;

/// Drain `observable`, returning every value and the terminal error (if
/// any).
pub(crate) async fn collect<T: Send + 'static>(
    observable: &Observable<T>,
) -> (Vec<T>, Option<LinkError>) {
    let mut values = vec![];
    let mut stream = observable.stream();
    while let Some(event) = stream.next().await {
        match event {
            Ok(value) => values.push(value),
            Err(err) => return (values, Some(err)),
        }
    }
    (values, None)
}

pub(crate) fn data(data: Value) -> FetchResult {
    ExecutionResult::from_data(data).into()
}

pub(crate) fn parse(source: &str) -> QueryDocument {
    QueryDocument::parse(source).unwrap()
}
