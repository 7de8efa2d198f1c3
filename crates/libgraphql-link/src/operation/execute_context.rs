/// The environment an operation is executed in. Links may read it (for
/// example to send client awareness headers) but it is not part of the
/// operation's wire payload.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecuteContext {
    pub client_name: Option<String>,
    pub client_version: Option<String>,
}
impl ExecuteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn with_client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = Some(version.into());
        self
    }
}
