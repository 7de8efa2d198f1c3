use crate::LinkError;
use crate::execute;
use crate::from;
use crate::links::retry::AttemptsOptions;
use crate::links::retry::DelayOptions;
use crate::links::retry::RetryLink;
use crate::request::GraphQLRequest;
use crate::result::ExecutionResult;
use crate::result::FetchResult;
use crate::result::GraphQLError;
use crate::test;
use crate::test::Recorder;
use serde_json::json;
use std::time::Duration;

fn request() -> GraphQLRequest {
    GraphQLRequest::new(test::parse("query Viewer { viewer { id } }"))
}

fn fixed_delay(initial_ms: u64) -> DelayOptions {
    DelayOptions {
        initial: Duration::from_millis(initial_ms),
        jitter: false,
        max: None,
    }
}

#[tokio::test(start_paused = true)]
async fn retries_until_an_attempt_succeeds() {
    let recorder = Recorder::default();
    let link = from([
        RetryLink::new(fixed_delay(100), AttemptsOptions::default()).into_link(),
        recorder.terminating(|_, call| match call {
            0 | 1 => vec![Err(LinkError::network("unavailable"))],
            _ => vec![Ok(test::data(json!({ "ok": true })))],
        }),
    ]);

    let started = tokio::time::Instant::now();
    let (results, error) = test::collect(&execute(&link, request())).await;

    assert!(error.is_none());
    assert_eq!(results, vec![test::data(json!({ "ok": true }))]);
    assert_eq!(recorder.count(), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_attempts() {
    let recorder = Recorder::default();
    let link = from([
        RetryLink::new(fixed_delay(10), AttemptsOptions::default().with_max(3)).into_link(),
        recorder.terminating(|_, call| {
            vec![Err(LinkError::network(format!("attempt {call}")))]
        }),
    ]);

    let (results, error) = test::collect(&execute(&link, request())).await;

    assert!(results.is_empty());
    assert_eq!(recorder.count(), 3);
    assert_eq!(error.map(|err| err.to_string()), Some("Network error: attempt 2".to_string()));
}

#[tokio::test(start_paused = true)]
async fn retry_if_filters_errors() {
    let recorder = Recorder::default();
    let attempts = AttemptsOptions::default()
        .with_retry_if(|error, _| matches!(error, LinkError::Network { .. }));
    let link = from([
        RetryLink::new(fixed_delay(10), attempts).into_link(),
        recorder.terminating(|_, _| vec![Err(LinkError::PersistedQueryHash {
            message: "not retryable".to_string(),
        })]),
    ]);

    let (_, error) = test::collect(&execute(&link, request())).await;

    assert!(matches!(error, Some(LinkError::PersistedQueryHash { .. })));
    assert_eq!(recorder.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn graphql_errors_are_not_retried() {
    let recorder = Recorder::default();
    let failed: FetchResult = ExecutionResult::from_errors(vec![GraphQLError::new("bad field")]).into();
    let link = from([
        RetryLink::new(fixed_delay(10), AttemptsOptions::default()).into_link(),
        recorder.terminating(move |_, _| vec![Ok(failed.clone())]),
    ]);

    let (results, error) = test::collect(&execute(&link, request())).await;

    assert!(error.is_none());
    assert_eq!(results.len(), 1);
    assert_eq!(recorder.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn results_from_failed_attempts_are_delivered() {
    let recorder = Recorder::default();
    let link = from([
        RetryLink::new(fixed_delay(10), AttemptsOptions::default()).into_link(),
        recorder.terminating(|_, call| match call {
            0 => vec![
                Ok(test::data(json!({ "part": 1 }))),
                Err(LinkError::network("dropped")),
            ],
            _ => vec![Ok(test::data(json!({ "part": 2 })))],
        }),
    ]);

    let (results, error) = test::collect(&execute(&link, request())).await;

    assert!(error.is_none());
    assert_eq!(results, vec![
        test::data(json!({ "part": 1 })),
        test::data(json!({ "part": 2 })),
    ]);
}

#[tokio::test(start_paused = true)]
async fn custom_delay_functions_replace_backoff() {
    let recorder = Recorder::default();
    let link = from([
        RetryLink::new(fixed_delay(10), AttemptsOptions::default().with_max(3))
            .with_delay_fn(|count, _, _| Duration::from_secs(u64::from(count)))
            .into_link(),
        recorder.terminating(|_, _| vec![Err(LinkError::network("down"))]),
    ]);

    let started = tokio::time::Instant::now();
    test::collect(&execute(&link, request())).await;
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_stream_cancels_a_pending_retry() {
    let recorder = Recorder::default();
    let link = from([
        RetryLink::new(fixed_delay(2000), AttemptsOptions::default()).into_link(),
        recorder.terminating(|_, _| vec![Err(LinkError::network("down"))]),
    ]);

    let observable = execute(&link, request());
    let timed_out =
        tokio::time::timeout(Duration::from_millis(500), test::collect(&observable)).await;
    assert!(timed_out.is_err());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(recorder.count(), 1);
}
