use crate::JsonMap;
use crate::result::ExecutionResult;
use crate::result::GraphQLError;
use crate::result::InitialIncrementalResult;
use crate::result::SubsequentIncrementalResult;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

/// A single emission of a link's result stream.
///
/// Most operations produce exactly one [`FetchResult::Single`]. Operations
/// using `@defer`/`@stream` produce a [`FetchResult::Initial`] followed by
/// any number of [`FetchResult::Subsequent`] patches.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FetchResult {
    Single(ExecutionResult),
    Initial(InitialIncrementalResult),
    Subsequent(SubsequentIncrementalResult),
}
impl FetchResult {
    /// Decode a JSON response payload, dispatching on its shape: a payload
    /// with `incremental` is a subsequent patch, one with `hasNext` is the
    /// initial payload of an incremental response, anything else is a
    /// single result.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("incremental").is_some() {
            serde_json::from_value(value).map(Self::Subsequent)
        } else if value.get("hasNext").is_some() {
            serde_json::from_value(value).map(Self::Initial)
        } else {
            serde_json::from_value(value).map(Self::Single)
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Single(result) => result.data.as_ref(),
            Self::Initial(result) => result.data.as_ref(),
            Self::Subsequent(_) => None,
        }
    }

    /// Every GraphQL error carried by this result, including errors nested
    /// in incremental patches.
    pub fn errors(&self) -> Vec<&GraphQLError> {
        match self {
            Self::Single(result) => result.errors.iter().collect(),
            Self::Initial(result) => result.errors.iter().collect(),
            Self::Subsequent(result) =>
                result.incremental
                    .iter()
                    .flat_map(|payload| payload.errors.iter())
                    .collect(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    pub fn extensions(&self) -> Option<&JsonMap> {
        match self {
            Self::Single(result) => result.extensions.as_ref(),
            Self::Initial(result) => result.extensions.as_ref(),
            Self::Subsequent(result) => result.extensions.as_ref(),
        }
    }

    pub fn has_next(&self) -> Option<bool> {
        match self {
            Self::Single(_) => None,
            Self::Initial(result) => result.has_next,
            Self::Subsequent(result) => result.has_next,
        }
    }

    /// Insert `fields` into the top-level `data` object. Subsequent patches
    /// carry no top-level data and are left untouched, as are results whose
    /// data is absent because of errors.
    pub(crate) fn merge_root_data(&mut self, fields: &JsonMap) {
        let (data, errors) = match self {
            Self::Single(result) => (&mut result.data, &result.errors),
            Self::Initial(result) => (&mut result.data, &result.errors),
            Self::Subsequent(_) => return,
        };
        if let Some(Value::Object(existing)) = data {
            for (key, value) in fields {
                existing.insert(key.clone(), value.clone());
            }
        } else if matches!(data, Some(Value::Null) | None) && errors.is_empty() {
            *data = Some(Value::Object(fields.clone()));
        }
    }
}
impl From<ExecutionResult> for FetchResult {
    fn from(result: ExecutionResult) -> Self {
        Self::Single(result)
    }
}
impl<'de> Deserialize<'de> for FetchResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
