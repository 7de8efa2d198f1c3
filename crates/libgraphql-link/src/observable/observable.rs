use crate::LinkError;
use crate::observable::Observer;
use crate::observable::Subscription;
use futures::Stream;
use futures::StreamExt;
use futures::stream::BoxStream;
use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;

/// The stream of events an [`Observable`] produces when consumed: zero or
/// more values followed by at most one error.
pub type ResultStream<T> = BoxStream<'static, Result<T, LinkError>>;

type Producer<T> = Arc<dyn Fn() -> ResultStream<T> + Send + Sync>;

/// A cold stream factory.
///
/// Constructing an [`Observable`] does no work. Each call to
/// [`Observable::stream()`] or [`Observable::subscribe()`] invokes the
/// producer anew, so two subscriptions run two independent executions.
///
/// A consumed observable delivers zero or more values and then exactly one
/// terminal event: the stream either ends (complete) or yields one `Err`
/// and then ends (error). Dropping the stream before that cancels all work
/// started for it.
pub struct Observable<T> {
    producer: Producer<T>,
}
impl<T: Send + 'static> Observable<T> {
    pub fn new<F, S>(producer: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = Result<T, LinkError>> + Send + 'static,
    {
        Self {
            producer: Arc::new(move || producer().boxed()),
        }
    }

    /// An observable that completes immediately without emitting.
    pub fn empty() -> Self {
        Self::new(futures::stream::empty)
    }

    /// An observable that emits each of `values` and then completes.
    pub fn of(values: Vec<T>) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move || futures::stream::iter(values.clone().into_iter().map(Ok)))
    }

    /// An observable that fails immediately with `error`.
    pub fn error(error: LinkError) -> Self {
        Self::new(move || futures::stream::once(futures::future::ready(Err(error.clone()))))
    }

    /// An observable that runs a fresh future per subscription and emits
    /// its output once.
    pub fn from_future<F, Fut>(make_future: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, LinkError>> + Send + 'static,
    {
        Self::new(move || futures::stream::once(make_future()))
    }

    /// Transform every emitted value with `f`. Errors pass through.
    pub fn map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let producer = self.producer.clone();
        let f = Arc::new(f);
        Observable::new(move || {
            let f = f.clone();
            producer().map(move |event| event.map(|value| f(value)))
        })
    }

    /// Run the producer and return its events as a stream. The stream ends
    /// after the first error.
    pub fn stream(&self) -> ResultStream<T> {
        let mut events = (self.producer)();
        Box::pin(async_stream::stream! {
            while let Some(event) = events.next().await {
                let failed = event.is_err();
                yield event;
                if failed {
                    break;
                }
            }
        })
    }

    /// Run the producer on a tokio task, delivering its events to
    /// `observer`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let gate = Arc::new(ReentrantMutex::new(Cell::new(true)));
        let mut events = self.stream();
        let task_gate = gate.clone();

        let handle = tokio::spawn(async move {
            let Observer { mut next, error, complete } = observer;
            while let Some(event) = events.next().await {
                match event {
                    Ok(value) => {
                        let delivered = deliver(&task_gate, || {
                            if let Some(next) = next.as_mut() {
                                next(value);
                            }
                        });
                        if !delivered {
                            return;
                        }
                    },
                    Err(err) => {
                        deliver(&task_gate, move || {
                            if let Some(error) = error {
                                error(err);
                            }
                        });
                        return;
                    },
                }
            }
            deliver(&task_gate, move || {
                if let Some(complete) = complete {
                    complete();
                }
            });
        });

        Subscription::new(gate, handle)
    }
}
impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
        }
    }
}
impl<T> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Observable")
    }
}

/// Invoke `callback` if the subscription is still open. Returns whether the
/// subscription is open afterwards.
///
/// The gate stays locked while the callback runs: an `unsubscribe()` from
/// another thread waits for the callback to return, while one made from
/// inside the callback re-enters the lock.
fn deliver(gate: &ReentrantMutex<Cell<bool>>, callback: impl FnOnce()) -> bool {
    let open = gate.lock();
    if !open.get() {
        return false;
    }
    callback();
    open.get()
}
