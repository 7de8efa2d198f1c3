use crate::Link;
use crate::LinkError;
use crate::execute;
use crate::from;
use crate::links::persisted_queries::PersistedQueryLink;
use crate::links::persisted_queries::PersistedQueryLinkBuildError;
use crate::links::persisted_queries::sha256_hash;
use crate::observable::Observable;
use crate::request::GraphQLRequest;
use crate::result::ExecutionResult;
use crate::result::FetchResult;
use crate::result::GraphQLError;
use crate::test;
use crate::test::Recorder;
use futures::StreamExt;
use serde_json::Value;
use serde_json::json;
use sha2::Digest;
use sha2::Sha256;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

const QUERY: &str = "query Viewer { viewer { id } }";

fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

fn not_found() -> FetchResult {
    ExecutionResult::from_errors(vec![GraphQLError::new("PersistedQueryNotFound")]).into()
}

fn not_supported() -> FetchResult {
    ExecutionResult::from_errors(vec![
        GraphQLError::new("unsupported").with_code("PERSISTED_QUERY_NOT_SUPPORTED"),
    ]).into()
}

fn success() -> FetchResult {
    test::data(json!({ "viewer": { "id": "1" } }))
}

fn pq_link() -> PersistedQueryLink {
    PersistedQueryLink::builder().use_sha256().build().unwrap()
}

fn http_hint(recorded: &test::Recorded) -> Option<Value> {
    recorded.context.get("http").cloned()
}

fn method_of(recorded: &test::Recorded) -> Option<Value> {
    recorded.context
        .get("fetchOptions")
        .and_then(|options| options.get("method"))
        .cloned()
}

mod construction {
    use super::*;

    #[test]
    fn requires_a_hash_function() {
        let err = PersistedQueryLink::builder().build().err();
        assert_eq!(err, Some(PersistedQueryLinkBuildError::MissingHashFunction));
    }

    #[test]
    fn rejects_an_empty_hash_cache() {
        let err = PersistedQueryLink::builder()
            .use_sha256()
            .hash_cache_capacity(0)
            .build()
            .err();
        assert_eq!(err, Some(PersistedQueryLinkBuildError::ZeroHashCacheCapacity));
    }
}

mod protocol {
    use super::*;

    #[tokio::test]
    async fn sends_the_hash_without_the_query() {
        let recorder = Recorder::default();
        let query = test::parse(QUERY);
        let link = from([
            pq_link().into_link(),
            recorder.terminating(|_, _| vec![Ok(success())]),
        ]);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(query.clone()))).await;
        assert!(error.is_none());
        assert_eq!(results, vec![success()]);

        let recorded = recorder.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            recorded[0].operation.extensions().get("persistedQuery"),
            Some(&json!({ "version": 1, "sha256Hash": sha256_hex(query.print()) })),
        );
        assert_eq!(
            http_hint(&recorded[0]),
            Some(json!({ "includeQuery": false, "includeExtensions": true })),
        );
    }

    #[tokio::test]
    async fn retries_with_the_full_query_when_not_found() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            recorder.terminating(|_, call| match call {
                0 => vec![Ok(not_found())],
                _ => vec![Ok(success())],
            }),
        ]);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert!(error.is_none());
        assert_eq!(results, vec![success()]);

        let recorded = recorder.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(
            http_hint(&recorded[0]),
            Some(json!({ "includeQuery": false, "includeExtensions": true })),
        );
        assert_eq!(
            http_hint(&recorded[1]),
            Some(json!({ "includeQuery": true, "includeExtensions": true })),
        );
        assert_eq!(method_of(&recorded[1]), Some(json!("POST")));
        assert!(recorded[1].operation.extensions().contains_key("persistedQuery"));
    }

    #[tokio::test]
    async fn retries_at_most_once() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            recorder.terminating(|_, _| vec![Ok(ExecutionResult {
                data: Some(json!({ "viewer": null })),
                errors: vec![
                    GraphQLError::new("PersistedQueryNotFound"),
                    GraphQLError::new("Unrelated failure"),
                ],
                extensions: None,
            }.into())]),
        ]);

        let (results, _) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;

        assert_eq!(recorder.count(), 2);
        assert_eq!(results.len(), 1);
        let messages: Vec<&str> =
            results[0].errors().iter().map(|error| error.message.as_str()).collect();
        assert!(messages.contains(&"Unrelated failure"));
    }

    #[tokio::test]
    async fn successful_results_pass_through_untouched() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            recorder.terminating(|_, _| vec![Ok(success()), Ok(not_found())]),
        ]);

        let (results, _) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;

        // The retry replaces the rest of the first attempt's stream.
        assert_eq!(results.first(), Some(&success()));
        assert_eq!(recorder.count(), 2);
    }

    #[tokio::test]
    async fn inspects_graphql_errors_embedded_in_server_errors() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            recorder.terminating(|_, call| match call {
                0 => vec![Err(LinkError::Server {
                    status_code: 400,
                    message: "Response not successful: Received status code 400".to_string(),
                    body: String::new(),
                    result: Some(json!({
                        "errors": [{
                            "message": "hash mismatch",
                            "extensions": { "code": "PERSISTED_QUERY_NOT_FOUND" },
                        }],
                    })),
                })],
                _ => vec![Ok(success())],
            }),
        ]);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert!(error.is_none());
        assert_eq!(results, vec![success()]);
        assert_eq!(recorder.count(), 2);
    }

    /// Turns results carrying GraphQL errors into stream errors.
    fn promote_errors() -> Link {
        Link::new(|operation, forward| {
            let events = forward.call(operation);
            Some(Observable::new(move || events.stream().map(|event| match event {
                Ok(result) if result.has_errors() => Err(LinkError::GraphQL {
                    errors: result.errors().into_iter().cloned().collect(),
                }),
                other => other,
            })))
        })
    }

    #[tokio::test]
    async fn inspects_promoted_graphql_errors() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            promote_errors(),
            recorder.terminating(|_, call| match call {
                0 => vec![Ok(not_found())],
                _ => vec![Ok(success())],
            }),
        ]);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert!(error.is_none());
        assert_eq!(results, vec![success()]);

        let recorded = recorder.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(method_of(&recorded[1]), Some(json!("POST")));
    }

    #[tokio::test]
    async fn unrelated_promoted_errors_are_delivered() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            promote_errors(),
            recorder.terminating(|_, _| vec![Ok(ExecutionResult::from_errors(vec![
                GraphQLError::new("Forbidden"),
            ]).into())]),
        ]);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert!(results.is_empty());
        let Some(error) = error else {
            panic!("expected the promoted error");
        };
        assert_eq!(error.to_string(), "GraphQL errors: Forbidden");
        assert_eq!(error.graphql_errors(), vec![GraphQLError::new("Forbidden")]);
        assert_eq!(recorder.count(), 1);
    }

    #[tokio::test]
    async fn unrelated_network_errors_are_delivered() {
        let recorder = Recorder::default();
        let link = from([
            pq_link().into_link(),
            recorder.terminating(|_, _| vec![Err(LinkError::network("connection reset"))]),
        ]);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert!(results.is_empty());
        assert!(matches!(error, Some(LinkError::Network { .. })));
        assert_eq!(recorder.count(), 1);
    }
}

mod not_supported {
    use super::*;

    #[tokio::test]
    async fn disables_hashing_for_later_operations() {
        let pq = pq_link();
        let recorder = Recorder::default();
        let link = from([
            pq.clone().into_link(),
            recorder.terminating(|_, call| match call {
                0 => vec![Ok(not_supported())],
                _ => vec![Ok(success())],
            }),
        ]);

        let (results, _) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert_eq!(results, vec![success()]);
        assert!(!pq.is_enabled());
        assert_eq!(pq.cached_hash_count(), 0);

        let recorded = recorder.recorded();
        assert_eq!(
            http_hint(&recorded[1]),
            Some(json!({ "includeQuery": true, "includeExtensions": false })),
        );
        assert!(!recorded[1].operation.extensions().contains_key("persistedQuery"));

        test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        let recorded = recorder.recorded();
        assert_eq!(recorded.len(), 3);
        assert!(!recorded[2].operation.extensions().contains_key("persistedQuery"));
        assert_eq!(
            http_hint(&recorded[2]),
            Some(json!({ "includeQuery": true, "includeExtensions": false })),
        );
    }

    #[tokio::test]
    async fn enable_turns_hashing_back_on() {
        let pq = pq_link();
        let recorder = Recorder::default();
        let link = from([
            pq.clone().into_link(),
            recorder.terminating(|_, call| match call {
                0 => vec![Ok(not_supported())],
                _ => vec![Ok(success())],
            }),
        ]);

        test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert!(!pq.is_enabled());
        pq.enable();

        test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        let recorded = recorder.recorded();
        assert!(recorded[2].operation.extensions().contains_key("persistedQuery"));
    }

    #[tokio::test]
    async fn custom_predicates_replace_the_defaults() {
        let pq = PersistedQueryLink::builder()
            .use_sha256()
            .disable(|_| false)
            .retry(|_| false)
            .build()
            .unwrap();
        let recorder = Recorder::default();
        let link = from([
            pq.clone().into_link(),
            recorder.terminating(|_, _| vec![Ok(not_supported())]),
        ]);

        let (results, _) =
            test::collect(&execute(&link, GraphQLRequest::new(test::parse(QUERY)))).await;
        assert_eq!(results, vec![not_supported()]);
        assert_eq!(recorder.count(), 1);
        assert!(pq.is_enabled());
    }
}

mod get_for_hashed_queries {
    use super::*;

    fn get_link(recorder: &Recorder) -> Link {
        from([
            PersistedQueryLink::builder()
                .use_sha256()
                .use_get_for_hashed_queries(true)
                .build()
                .unwrap()
                .into_link(),
            recorder.terminating(|_, call| match call {
                0 => vec![Ok(not_found())],
                _ => vec![Ok(success())],
            }),
        ])
    }

    #[tokio::test]
    async fn hashed_attempt_uses_get_and_retry_restores_post() {
        let recorder = Recorder::default();
        let request = GraphQLRequest::new(test::parse(QUERY)).with_context([(
            "fetchOptions",
            json!({ "credentials": "include" }),
        )]);

        test::collect(&execute(&get_link(&recorder), request)).await;

        let recorded = recorder.recorded();
        assert_eq!(
            recorded[0].context.get("fetchOptions"),
            Some(&json!({ "credentials": "include", "method": "GET" })),
        );
        assert_eq!(
            recorded[1].context.get("fetchOptions"),
            Some(&json!({ "credentials": "include", "method": "POST" })),
        );
    }

    #[tokio::test]
    async fn mutations_are_never_sent_with_get() {
        let recorder = Recorder::default();
        let request = GraphQLRequest::new(test::parse("mutation Like { like { id } }"));

        test::collect(&execute(&get_link(&recorder), request)).await;

        let recorded = recorder.recorded();
        assert_eq!(method_of(&recorded[0]), None);
        assert!(recorded[0].operation.extensions().contains_key("persistedQuery"));
    }
}

mod hashing {
    use super::*;

    #[test]
    fn sha256_hash_is_lowercase_hex() {
        assert_eq!(
            sha256_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        );
        assert_eq!(sha256_hash(QUERY), sha256_hex(QUERY));
    }

    fn counting_link(calls: &Arc<AtomicUsize>) -> PersistedQueryLink {
        let calls = calls.clone();
        PersistedQueryLink::builder()
            .generate_hash(move |query| {
                calls.fetch_add(1, Ordering::SeqCst);
                let hash = sha256_hex(query.print());
                async move { Ok(hash) }
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn memoizes_hashes_per_document() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pq = counting_link(&calls);
        let recorder = Recorder::default();
        let link = from([
            pq.clone().into_link(),
            recorder.terminating(|_, _| vec![Ok(success())]),
        ]);
        let query = test::parse(QUERY);

        test::collect(&execute(&link, GraphQLRequest::new(query.clone()))).await;
        test::collect(&execute(&link, GraphQLRequest::new(query.clone()))).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(pq.cached_hash_count(), 1);

        pq.reset_hash_cache();
        assert_eq!(pq.cached_hash_count(), 0);
        test::collect(&execute(&link, GraphQLRequest::new(query.clone()))).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn identical_text_parsed_twice_is_hashed_twice() {
        let calls = Arc::new(AtomicUsize::new(0));
        let recorder = Recorder::default();
        let link = from([
            counting_link(&calls).into_link(),
            recorder.terminating(|_, _| vec![Ok(success())]),
        ]);
        let first = test::parse(QUERY);
        let second = test::parse(QUERY);

        test::collect(&execute(&link, GraphQLRequest::new(first.clone()))).await;
        test::collect(&execute(&link, GraphQLRequest::new(second.clone()))).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropped_documents_leave_no_live_entries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pq = counting_link(&calls);
        let recorder = Recorder::default();
        let link = from([
            pq.clone().into_link(),
            recorder.terminating(|_, _| vec![Ok(success())]),
        ]);

        let query = test::parse(QUERY);
        test::collect(&execute(&link, GraphQLRequest::new(query))).await;
        drop(recorder);
        drop(link);
        assert_eq!(pq.cached_hash_count(), 0);
    }

    #[tokio::test]
    async fn hash_failures_fail_the_operation_and_are_not_memoized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let pq = PersistedQueryLink::builder()
            .generate_hash(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
                async move {
                    Err(LinkError::PersistedQueryHash {
                        message: "no hasher".to_string(),
                    })
                }
            })
            .build()
            .unwrap();
        let recorder = Recorder::default();
        let link = from([
            pq.clone().into_link(),
            recorder.terminating(|_, _| vec![Ok(success())]),
        ]);
        let query = test::parse(QUERY);

        let (results, error) =
            test::collect(&execute(&link, GraphQLRequest::new(query.clone()))).await;
        assert!(results.is_empty());
        assert!(matches!(error, Some(LinkError::PersistedQueryHash { .. })));
        assert_eq!(recorder.count(), 0);

        test::collect(&execute(&link, GraphQLRequest::new(query))).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(pq.cached_hash_count(), 0);
    }
}
