use crate::JsonMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A location within the GraphQL document an error refers to (1-based).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GraphQLErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// One segment of a response path.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(i64),
}

/// A GraphQL error as returned in the `errors` list of a response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GraphQLError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphQLErrorLocation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonMap>,
}
impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
            extensions: None,
        }
    }

    /// Sets `extensions.code`.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.extensions
            .get_or_insert_with(JsonMap::new)
            .insert("code".to_string(), Value::String(code.into()));
        self
    }

    /// The `extensions.code` of this error, if it is a string.
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"))
            .and_then(Value::as_str)
    }

    /// Best-effort extraction of the errors in a JSON response body's
    /// `errors` list. Entries that are not error-shaped are skipped.
    pub fn list_from_json(body: &Value) -> Vec<GraphQLError> {
        body.get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors.iter()
                    .filter_map(|error| serde_json::from_value(error.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
