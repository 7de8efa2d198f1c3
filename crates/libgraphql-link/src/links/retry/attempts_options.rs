use crate::LinkError;
use crate::operation::Operation;
use std::sync::Arc;

type RetryIfFn = Arc<dyn Fn(&LinkError, &Operation) -> bool + Send + Sync>;

/// How many times, and for which errors, an operation is attempted.
#[derive(Clone)]
pub struct AttemptsOptions {
    /// Total number of attempts, including the first. Defaults to 5.
    pub max: u32,

    /// Whether a given error is worth retrying. Defaults to every error.
    pub retry_if: Option<RetryIfFn>,
}
impl AttemptsOptions {
    pub fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    pub fn with_retry_if(
        mut self,
        retry_if: impl Fn(&LinkError, &Operation) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.retry_if = Some(Arc::new(retry_if));
        self
    }

    /// Whether to retry after the `count`th failed attempt.
    pub fn should_retry(&self, count: u32, operation: &Operation, error: &LinkError) -> bool {
        if count >= self.max {
            return false;
        }
        self.retry_if
            .as_ref()
            .is_none_or(|retry_if| retry_if(error, operation))
    }
}
impl Default for AttemptsOptions {
    fn default() -> Self {
        Self {
            max: 5,
            retry_if: None,
        }
    }
}
impl std::fmt::Debug for AttemptsOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttemptsOptions")
            .field("max", &self.max)
            .field("retry_if", &self.retry_if.is_some())
            .finish()
    }
}
