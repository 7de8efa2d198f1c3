use crate::link::Forward;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;

/// The behavior of a forwarding link.
///
/// A handler may inspect or rewrite the operation, then delegate to the
/// rest of the chain via `forward`, transform the stream that comes back,
/// or produce a stream of its own. Returning `None` is equivalent to
/// returning an observable that completes without emitting.
pub trait RequestHandler: Send + Sync + 'static {
    fn request(
        &self,
        operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>>;
}

/// The behavior of a terminating link: one that produces results itself
/// (typically by talking to a server) and has no next link to forward to.
pub trait TerminatingRequestHandler: Send + Sync + 'static {
    fn request(&self, operation: Operation) -> Option<Observable<FetchResult>>;
}
