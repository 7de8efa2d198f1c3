use std::fmt;

/// The keys a raw GraphQL request object may carry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RequestKey {
    Context,
    Extensions,
    OperationName,
    Query,
    Variables,
}
impl RequestKey {
    pub const ALL: [RequestKey; 5] = [
        Self::Query,
        Self::OperationName,
        Self::Variables,
        Self::Extensions,
        Self::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Extensions => "extensions",
            Self::OperationName => "operationName",
            Self::Query => "query",
            Self::Variables => "variables",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == key)
    }
}
impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
