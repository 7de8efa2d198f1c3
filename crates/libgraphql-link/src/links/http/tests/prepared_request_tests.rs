use crate::Context;
use crate::links::http::CLIENT_NAME_HEADER;
use crate::links::http::CLIENT_VERSION_HEADER;
use crate::links::http::HttpLinkOptions;
use crate::links::http::HttpMethod;
use crate::links::http::PreparedRequest;
use crate::operation::ExecuteContext;
use crate::operation::Operation;
use crate::request::GraphQLRequest;
use crate::test;
use serde_json::json;

const URI: &str = "https://example.com/graphql";

fn operation(query: &str) -> Operation {
    let request = GraphQLRequest::new(test::parse(query))
        .with_variables(json!({ "id": 1 }).as_object().cloned().unwrap_or_default());
    Operation::from_request(request, ExecuteContext::default())
}

mod body {
    use super::*;

    #[test]
    fn includes_name_variables_and_query() {
        let op = operation("query Viewer($id: ID) { viewer(id: $id) { id } }");
        let prepared = PreparedRequest::new(&HttpLinkOptions::new(URI), &op);

        assert_eq!(prepared.method, HttpMethod::Post);
        assert_eq!(prepared.uri, URI);
        assert_eq!(prepared.body.get("operationName"), Some(&json!("Viewer")));
        assert_eq!(prepared.body.get("variables"), Some(&json!({ "id": 1 })));
        assert_eq!(prepared.body.get("query"), Some(&json!(op.query().print())));
        assert!(prepared.body.get("extensions").is_none());
    }

    #[test]
    fn anonymous_operations_have_no_name() {
        let op = operation("{ viewer { id } }");
        let prepared = PreparedRequest::new(&HttpLinkOptions::new(URI), &op);
        assert!(prepared.body.get("operationName").is_none());
    }

    #[test]
    fn context_can_omit_the_query_and_add_extensions() {
        let mut op = operation("query Viewer { viewer { id } }");
        op.extensions_mut().insert("persistedQuery".to_string(), json!({ "version": 1 }));
        op.set_context([("http", json!({ "includeQuery": false, "includeExtensions": true }))]);

        let prepared = PreparedRequest::new(&HttpLinkOptions::new(URI), &op);
        assert!(prepared.body.get("query").is_none());
        assert_eq!(prepared.body.get("extensions"), Some(&json!({ "persistedQuery": { "version": 1 } })));
    }

    #[test]
    fn extensions_follow_the_link_option_by_default() {
        let mut op = operation("query Viewer { viewer { id } }");
        op.extensions_mut().insert("trace".to_string(), json!(true));

        let without = PreparedRequest::new(&HttpLinkOptions::new(URI), &op);
        assert!(without.body.get("extensions").is_none());

        let with = PreparedRequest::new(&HttpLinkOptions::new(URI).include_extensions(true), &op);
        assert_eq!(with.body.get("extensions"), Some(&json!({ "trace": true })));
    }
}

mod method {
    use super::*;

    #[test]
    fn queries_use_get_when_configured() {
        let op = operation("query Viewer { viewer { id } }");
        let options = HttpLinkOptions::new(URI).use_get_for_queries(true);
        assert_eq!(PreparedRequest::new(&options, &op).method, HttpMethod::Get);
    }

    #[test]
    fn context_fetch_options_choose_the_method() {
        let op = operation("query Viewer { viewer { id } }");
        op.set_context([("fetchOptions", json!({ "method": "get" }))]);
        assert_eq!(PreparedRequest::new(&HttpLinkOptions::new(URI), &op).method, HttpMethod::Get);

        op.set_context([("fetchOptions", json!({ "method": "POST" }))]);
        let options = HttpLinkOptions::new(URI).use_get_for_queries(true);
        assert_eq!(PreparedRequest::new(&options, &op).method, HttpMethod::Post);
    }

    #[test]
    fn mutations_are_never_sent_with_get() {
        let op = operation("mutation Save { save }");
        op.set_context([("fetchOptions", json!({ "method": "GET" }))]);
        let options = HttpLinkOptions::new(URI).use_get_for_queries(true);
        assert_eq!(PreparedRequest::new(&options, &op).method, HttpMethod::Post);
    }

    #[test]
    fn get_parameters_json_encode_objects() {
        let op = operation("query Viewer($id: ID) { viewer(id: $id) { id } }");
        op.set_context([("http", json!({ "includeQuery": false }))]);
        let options = HttpLinkOptions::new(URI).use_get_for_queries(true);

        let params = PreparedRequest::new(&options, &op).query_params();
        assert_eq!(params, vec![
            ("operationName".to_string(), "Viewer".to_string()),
            ("variables".to_string(), r#"{"id":1}"#.to_string()),
        ]);
    }
}

mod headers {
    use super::*;

    #[test]
    fn context_headers_override_defaults() {
        let op = operation("{ viewer { id } }");
        op.set_context(Context::new().with("headers", json!({
            "Authorization": "Bearer t",
            "x-retries": 2,
        })));
        let options =
            HttpLinkOptions::new(URI)
                .with_header("authorization", "Bearer default")
                .with_header("X-Team", "core");

        let headers = PreparedRequest::new(&options, &op).headers;
        assert_eq!(headers.get("authorization").map(String::as_str), Some("Bearer t"));
        assert_eq!(headers.get("x-team").map(String::as_str), Some("core"));
        assert_eq!(headers.get("x-retries").map(String::as_str), Some("2"));
    }

    #[test]
    fn client_awareness_headers_come_from_the_execute_context() {
        let request = GraphQLRequest::new(test::parse("{ viewer { id } }"));
        let op = Operation::from_request(
            request,
            ExecuteContext::new().with_client_name("web").with_client_version("1.2.3"),
        );

        let headers = PreparedRequest::new(&HttpLinkOptions::new(URI), &op).headers;
        assert_eq!(headers.get(CLIENT_NAME_HEADER).map(String::as_str), Some("web"));
        assert_eq!(headers.get(CLIENT_VERSION_HEADER).map(String::as_str), Some("1.2.3"));
    }

    #[test]
    fn deferred_documents_accept_multipart() {
        let plain = PreparedRequest::new(&HttpLinkOptions::new(URI), &operation("{ a }"));
        assert!(!plain.headers["accept"].contains("multipart/mixed"));

        let deferred = PreparedRequest::new(
            &HttpLinkOptions::new(URI),
            &operation("{ a ... @defer { b } }"),
        );
        assert!(deferred.headers["accept"].starts_with("multipart/mixed"));
    }

    #[test]
    fn context_uri_overrides_the_link_uri() {
        let op = operation("{ a }");
        op.set_context([("uri", "https://other.example.com/gql")]);
        let prepared = PreparedRequest::new(&HttpLinkOptions::new(URI), &op);
        assert_eq!(prepared.uri, "https://other.example.com/gql");
    }
}
