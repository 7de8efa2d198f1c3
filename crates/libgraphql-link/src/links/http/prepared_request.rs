use crate::Context;
use crate::JsonMap;
use crate::document::OperationKind;
use crate::links::http::CLIENT_NAME_HEADER;
use crate::links::http::CLIENT_VERSION_HEADER;
use crate::links::http::HttpLinkOptions;
use crate::links::http::HttpMethod;
use crate::operation::Operation;
use indexmap::IndexMap;
use serde_json::Value;

const ACCEPT: &str = "application/graphql-response+json,application/json;q=0.9";
const ACCEPT_INCREMENTAL: &str =
    "multipart/mixed;deferSpec=20220824,application/graphql-response+json,application/json;q=0.9";

/// The HTTP request an operation turns into once its context hints have
/// been applied over the link's options.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PreparedRequest {
    pub(crate) body: JsonMap,
    pub(crate) headers: IndexMap<String, String>,
    pub(crate) method: HttpMethod,
    pub(crate) uri: String,
}
impl PreparedRequest {
    pub(crate) fn new(options: &HttpLinkOptions, operation: &Operation) -> Self {
        let context = operation.get_context();

        let include_query = http_flag(&context, "includeQuery").unwrap_or(true);
        let include_extensions =
            http_flag(&context, "includeExtensions").unwrap_or(options.include_extensions);

        let mut body = JsonMap::new();
        if !operation.operation_name().is_empty() {
            body.insert(
                "operationName".to_string(),
                Value::String(operation.operation_name().to_string()),
            );
        }
        body.insert("variables".to_string(), Value::Object(operation.variables().clone()));
        if include_extensions && !operation.extensions().is_empty() {
            body.insert("extensions".to_string(), Value::Object(operation.extensions().clone()));
        }
        if include_query {
            body.insert("query".to_string(), Value::String(operation.query().print().to_string()));
        }

        let mut headers = options.headers.clone();
        if let Some(Value::Object(overrides)) = context.get("headers") {
            for (name, value) in overrides {
                let value = match value {
                    Value::String(value) => value.clone(),
                    other => other.to_string(),
                };
                headers.insert(name.to_ascii_lowercase(), value);
            }
        }
        let execute_context = operation.execute_context();
        if let Some(name) = &execute_context.client_name
            && !headers.contains_key(CLIENT_NAME_HEADER) {
            headers.insert(CLIENT_NAME_HEADER.to_string(), name.clone());
        }
        if let Some(version) = &execute_context.client_version
            && !headers.contains_key(CLIENT_VERSION_HEADER) {
            headers.insert(CLIENT_VERSION_HEADER.to_string(), version.clone());
        }
        let query = operation.query();
        headers.entry("accept".to_string()).or_insert_with(|| {
            if query.uses_directive("defer") || query.uses_directive("stream") {
                ACCEPT_INCREMENTAL.to_string()
            } else {
                ACCEPT.to_string()
            }
        });

        let requested_method =
            context.get("fetchOptions")
                .and_then(|options| options.get("method"))
                .and_then(Value::as_str)
                .map(HttpMethod::from_name);
        let method = match requested_method {
            _ if operation.operation_kind() == OperationKind::Mutation => HttpMethod::Post,
            Some(method) => method,
            None if options.use_get_for_queries => HttpMethod::Get,
            None => HttpMethod::Post,
        };

        let uri =
            context.get("uri")
                .and_then(Value::as_str)
                .unwrap_or(&options.uri)
                .to_string();

        Self {
            body,
            headers,
            method,
            uri,
        }
    }

    /// The body's fields as query string parameters, with object-valued
    /// fields JSON-encoded.
    pub(crate) fn query_params(&self) -> Vec<(String, String)> {
        self.body.iter().map(|(name, value)| {
            let value = match value {
                Value::String(value) => value.clone(),
                other => other.to_string(),
            };
            (name.clone(), value)
        }).collect()
    }

    pub(crate) async fn send(
        &self,
        client: &reqwest::Client,
    ) -> reqwest::Result<reqwest::Response> {
        let mut request = match self.method {
            HttpMethod::Get => client.get(&self.uri).query(&self.query_params()),
            HttpMethod::Post => client.post(&self.uri).json(&self.body),
        };
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request.send().await
    }
}

fn http_flag(context: &Context, flag: &str) -> Option<bool> {
    context.get("http")
        .and_then(|http| http.get(flag))
        .and_then(Value::as_bool)
}
