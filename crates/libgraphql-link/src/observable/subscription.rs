use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A handle to a running [`Observable::subscribe()`] call.
///
/// Dropping a [`Subscription`] detaches it; the subscription keeps running
/// until its stream terminates. Call [`Subscription::unsubscribe()`] to
/// cancel it.
///
/// [`Observable::subscribe()`]: crate::observable::Observable::subscribe
pub struct Subscription {
    gate: Arc<ReentrantMutex<Cell<bool>>>,
    handle: JoinHandle<()>,
}
impl Subscription {
    pub(crate) fn new(
        gate: Arc<ReentrantMutex<Cell<bool>>>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self { gate, handle }
    }

    /// Cancel the subscription. Once this returns no further callback of
    /// the observer will run, even if called from inside one of them.
    /// The underlying stream is dropped, cancelling any in-flight work.
    pub fn unsubscribe(&self) {
        let open = self.gate.lock();
        open.set(false);
        drop(open);
        self.handle.abort();
    }

    /// `true` once the subscription was cancelled.
    pub fn is_closed(&self) -> bool {
        !self.gate.lock().get()
    }

    /// `true` once the subscription stopped running, either because its
    /// stream terminated or because it was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until the subscription stops running.
    pub async fn join(self) {
        // A cancelled task reports a JoinError; either way it has stopped.
        let _ = self.handle.await;
    }
}
impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
