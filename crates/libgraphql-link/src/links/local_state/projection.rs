use crate::JsonMap;
use crate::document::FragmentDef;
use crate::document::Selections;
use graphql_parser::query::Selection;
use graphql_parser::query::TypeCondition;
use indexmap::IndexMap;
use serde_json::Value;

const TYPENAME: &str = "__typename";

/// Shapes a locally resolved value like the response a server would have
/// produced for `selection_set`: only selected fields are kept, under their
/// response keys. Fragments apply when their type condition matches the
/// object's `__typename` (or the object carries none).
pub(crate) fn project(
    value: Value,
    selection_set: &Selections,
    fragments: &IndexMap<&str, &FragmentDef>,
) -> Value {
    if selection_set.items.is_empty() {
        return value;
    }
    match value {
        Value::Array(items) => Value::Array(
            items.into_iter()
                .map(|item| project(item, selection_set, fragments))
                .collect(),
        ),
        Value::Object(object) => {
            let mut projected = JsonMap::new();
            project_into(&object, selection_set, fragments, &mut projected);
            Value::Object(projected)
        },
        scalar => scalar,
    }
}

fn project_into(
    object: &JsonMap,
    selection_set: &Selections,
    fragments: &IndexMap<&str, &FragmentDef>,
    out: &mut JsonMap,
) {
    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) => {
                let response_key = field.alias.as_deref().unwrap_or(&field.name);
                let value = object.get(&field.name).cloned().unwrap_or(Value::Null);
                let value = project(value, &field.selection_set, fragments);
                merge_field(out, response_key, value);
            },

            Selection::InlineFragment(inline) => {
                let applies = match &inline.type_condition {
                    Some(TypeCondition::On(type_name)) => type_matches(object, type_name),
                    None => true,
                };
                if applies {
                    project_into(object, &inline.selection_set, fragments, out);
                }
            },

            Selection::FragmentSpread(spread) => {
                let Some(fragment) = fragments.get(spread.fragment_name.as_str()) else {
                    continue;
                };
                let TypeCondition::On(type_name) = &fragment.type_condition;
                if type_matches(object, type_name) {
                    project_into(object, &fragment.selection_set, fragments, out);
                }
            },
        }
    }
}

fn type_matches(object: &JsonMap, type_name: &str) -> bool {
    match object.get(TYPENAME) {
        Some(Value::String(typename)) => typename == type_name,
        _ => true,
    }
}

/// Inserts `value` at `key`, merging object fields into an object already
/// selected under the same key.
fn merge_field(out: &mut JsonMap, key: &str, value: Value) {
    match value {
        Value::Object(incoming) => match out.get_mut(key) {
            Some(Value::Object(existing)) => {
                for (name, field) in incoming {
                    merge_field(existing, &name, field);
                }
            },
            _ => {
                out.insert(key.to_string(), Value::Object(incoming));
            },
        },
        value => {
            out.insert(key.to_string(), value);
        },
    }
}
