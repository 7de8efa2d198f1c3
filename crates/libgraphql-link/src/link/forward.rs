use crate::diagnostics::Diagnostic;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use std::sync::Arc;

type ForwardFn = Arc<dyn Fn(Operation) -> Observable<FetchResult> + Send + Sync>;

/// Hands an operation to the rest of the chain.
///
/// A link receives a [`Forward`] with every request. It may call it zero,
/// one or several times (a retrying link calls it again per attempt), from
/// within its handler or lazily from inside the stream it returns.
#[derive(Clone)]
pub struct Forward {
    next: ForwardFn,
}
impl Forward {
    pub fn new<F>(next: F) -> Self
    where
        F: Fn(Operation) -> Observable<FetchResult> + Send + Sync + 'static,
    {
        Self {
            next: Arc::new(next),
        }
    }

    pub fn call(&self, operation: Operation) -> Observable<FetchResult> {
        (self.next)(operation)
    }

    /// The forward handed to the root of a chain. Reaching it means no
    /// terminating link handled the operation: a
    /// [`Diagnostic::UnterminatedChain`] is reported and the operation
    /// completes without results.
    pub fn end_of_chain() -> Self {
        Self::new(|operation| {
            Diagnostic::UnterminatedChain {
                operation_name: operation.operation_name().to_string(),
            }.emit();
            Observable::empty()
        })
    }
}
impl std::fmt::Debug for Forward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Forward")
    }
}
