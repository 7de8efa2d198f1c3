use crate::Context;
use crate::JsonMap;

/// What a local resolver is called with.
#[derive(Clone, Debug)]
pub struct LocalResolverArgs {
    /// The field's arguments with variable references substituted.
    pub arguments: JsonMap,

    /// A snapshot of the operation's context at resolution time.
    pub context: Context,

    pub field_name: String,
    pub operation_name: String,
    pub variables: JsonMap,
}
