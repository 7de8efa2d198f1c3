use crate::LinkError;

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type ErrorFn = Box<dyn FnOnce(LinkError) + Send>;
type CompleteFn = Box<dyn FnOnce() + Send>;

/// Callbacks receiving the events of a subscribed
/// [`Observable`](crate::observable::Observable). Every callback is
/// optional.
pub struct Observer<T> {
    pub(crate) next: Option<NextFn<T>>,
    pub(crate) error: Option<ErrorFn>,
    pub(crate) complete: Option<CompleteFn>,
}
impl<T> Observer<T> {
    pub fn new() -> Self {
        Self {
            next: None,
            error: None,
            complete: None,
        }
    }

    pub fn on_next(mut self, next: impl FnMut(T) + Send + 'static) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    pub fn on_error(mut self, error: impl FnOnce(LinkError) + Send + 'static) -> Self {
        self.error = Some(Box::new(error));
        self
    }

    pub fn on_complete(mut self, complete: impl FnOnce() + Send + 'static) -> Self {
        self.complete = Some(Box::new(complete));
        self
    }
}
impl<T> Default for Observer<T> {
    fn default() -> Self {
        Self::new()
    }
}
