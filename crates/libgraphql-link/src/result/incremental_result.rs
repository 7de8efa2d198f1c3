use crate::JsonMap;
use crate::result::GraphQLError;
use crate::result::PathSegment;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The first payload of an incrementally delivered (`@defer`/`@stream`)
/// response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct InitialIncrementalResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonMap>,

    #[serde(default, rename = "hasNext", skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
}

/// A follow-up payload of an incrementally delivered response. Carries
/// patches in `incremental` and never any top-level `data`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SubsequentIncrementalResult {
    pub incremental: Vec<IncrementalPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonMap>,

    #[serde(default, rename = "hasNext", skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
}

/// A single patch: deferred `data` or streamed `items` to apply at `path`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct IncrementalPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,

    #[serde(default)]
    pub path: Vec<PathSegment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonMap>,
}
