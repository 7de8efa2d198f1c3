use crate::JsonMap;
use crate::Link;
use crate::link::Forward;
use crate::link::RequestHandler;
use crate::links::remove_typename::KeepTypename;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use indexmap::IndexMap;
use serde_json::Value;

const TYPENAME: &str = "__typename";

/// Removes `__typename` keys from an operation's variables.
///
/// Objects read from a normalized cache carry `__typename`, which a server
/// will reject as an unknown input field when such an object is passed back
/// as a variable. Exceptions are configured per input type with
/// [`except()`](Self::except) and apply to variables declared with that
/// type (ignoring list and non-null wrappers).
#[derive(Clone, Debug, Default)]
pub struct RemoveTypenameFromVariablesLink {
    except: IndexMap<String, KeepTypename>,
}
impl RemoveTypenameFromVariablesLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn except(mut self, type_name: impl Into<String>, keep: KeepTypename) -> Self {
        self.except.insert(type_name.into(), keep);
        self
    }

    pub fn into_link(self) -> Link {
        Link::from_handler(self).named("remove typename")
    }
}

#[inherent::inherent]
impl RequestHandler for RemoveTypenameFromVariablesLink {
    pub fn request(
        &self,
        mut operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>> {
        let variables = std::mem::take(operation.variables_mut());
        let stripped: JsonMap =
            variables.into_iter().map(|(name, value)| {
                let keep =
                    operation.query()
                        .variable_type_name(Some(operation.operation_name()), &name)
                        .and_then(|type_name| self.except.get(type_name));
                let value = strip_typename(value, keep);
                (name, value)
            }).collect();
        *operation.variables_mut() = stripped;

        Some(forward.call(operation))
    }
}
impl From<RemoveTypenameFromVariablesLink> for Link {
    fn from(link: RemoveTypenameFromVariablesLink) -> Self {
        link.into_link()
    }
}

/// Recursively removes `__typename` keys from `value`, except where `keep`
/// says otherwise.
pub fn strip_typename(value: Value, keep: Option<&KeepTypename>) -> Value {
    match (value, keep) {
        (value, Some(KeepTypename::Keep)) => value,
        (Value::Object(fields), keep) => Value::Object(
            fields.into_iter()
                .filter(|(name, _)| name != TYPENAME)
                .map(|(name, field)| {
                    let field_keep = keep.and_then(|keep| keep.field(&name));
                    let field = strip_typename(field, field_keep);
                    (name, field)
                })
                .collect(),
        ),
        (Value::Array(items), keep) => Value::Array(
            items.into_iter()
                .map(|item| strip_typename(item, keep))
                .collect(),
        ),
        (scalar, _) => scalar,
    }
}
