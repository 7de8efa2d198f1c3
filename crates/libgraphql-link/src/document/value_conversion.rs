use crate::JsonMap;
use graphql_parser::query::Value;
use serde_json::Value as JsonValue;

/// Converts a GraphQL input value literal into JSON, substituting variable
/// references with their values from `variables` (or `null` when absent).
pub(crate) fn graphql_value_to_json(
    value: &Value<'static, String>,
    variables: &JsonMap,
) -> JsonValue {
    match value {
        Value::Variable(name) =>
            variables.get(name).cloned().unwrap_or(JsonValue::Null),
        Value::Int(number) =>
            number.as_i64().map(JsonValue::from).unwrap_or(JsonValue::Null),
        Value::Float(float) =>
            serde_json::Number::from_f64(*float)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        Value::String(string) => JsonValue::String(string.clone()),
        Value::Boolean(boolean) => JsonValue::Bool(*boolean),
        Value::Null => JsonValue::Null,
        Value::Enum(variant) => JsonValue::String(variant.clone()),
        Value::List(items) => JsonValue::Array(
            items.iter()
                .map(|item| graphql_value_to_json(item, variables))
                .collect(),
        ),
        Value::Object(fields) => JsonValue::Object(
            fields.iter()
                .map(|(name, field_value)| (
                    name.clone(),
                    graphql_value_to_json(field_value, variables),
                ))
                .collect(),
        ),
    }
}
