use indexmap::IndexMap;

/// Which `__typename` keys to preserve within a variable value.
#[derive(Clone, Debug, PartialEq)]
pub enum KeepTypename {
    /// Leave this value (and everything below it) untouched.
    Keep,

    /// Strip `__typename` here, but apply the nested configuration to the
    /// named fields. List items are configured like the list itself.
    Fields(IndexMap<String, KeepTypename>),
}
impl KeepTypename {
    pub fn fields<K: Into<String>>(fields: impl IntoIterator<Item = (K, KeepTypename)>) -> Self {
        Self::Fields(
            fields.into_iter()
                .map(|(name, keep)| (name.into(), keep))
                .collect(),
        )
    }

    pub(crate) fn field(&self, name: &str) -> Option<&KeepTypename> {
        match self {
            Self::Keep => None,
            Self::Fields(fields) => fields.get(name),
        }
    }
}
