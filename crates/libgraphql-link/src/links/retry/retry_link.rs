use crate::Link;
use crate::LinkError;
use crate::link::Forward;
use crate::link::RequestHandler;
use crate::links::retry::AttemptsOptions;
use crate::links::retry::DelayOptions;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

type DelayFn = Arc<dyn Fn(u32, &Operation, &LinkError) -> Duration + Send + Sync>;

/// Re-subscribes to the rest of the chain when it fails.
///
/// Only stream errors are retried; GraphQL errors inside a result are data
/// and pass through. Results delivered by a failed attempt are not
/// withheld. Dropping the stream while waiting for a retry cancels it.
#[derive(Clone)]
pub struct RetryLink {
    attempts: AttemptsOptions,
    delay: DelayFn,
}
impl RetryLink {
    pub fn new(delay: DelayOptions, attempts: AttemptsOptions) -> Self {
        Self {
            attempts,
            delay: Arc::new(move |count: u32, _: &Operation, _: &LinkError| {
                delay.delay_for(count)
            }),
        }
    }

    /// Compute the delay before retry `count` (starting at 1) with `delay`
    /// in place of the backoff options.
    pub fn with_delay_fn(
        mut self,
        delay: impl Fn(u32, &Operation, &LinkError) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    pub fn into_link(self) -> Link {
        Link::from_handler(self).named("retry")
    }
}
impl Default for RetryLink {
    fn default() -> Self {
        Self::new(DelayOptions::default(), AttemptsOptions::default())
    }
}

#[inherent::inherent]
impl RequestHandler for RetryLink {
    pub fn request(
        &self,
        operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>> {
        let attempts = self.attempts.clone();
        let delay = self.delay.clone();
        Some(Observable::new(move || {
            let attempts = attempts.clone();
            let delay = delay.clone();
            let forward = forward.clone();
            let operation = operation.clone();

            async_stream::stream! {
                let mut count = 0;
                loop {
                    let mut events = forward.call(operation.clone()).stream();
                    let mut failure = None;
                    while let Some(event) = events.next().await {
                        match event {
                            Ok(result) => yield Ok(result),
                            Err(err) => {
                                failure = Some(err);
                                break;
                            },
                        }
                    }
                    drop(events);

                    let Some(error) = failure else {
                        return;
                    };
                    count += 1;
                    if !attempts.should_retry(count, &operation, &error) {
                        yield Err(error);
                        return;
                    }

                    let wait = delay(count, &operation, &error);
                    tracing::debug!(
                        operation_name = operation.operation_name(),
                        attempt = count,
                        delay_ms = wait.as_millis() as u64,
                        error = %error,
                        "retrying operation",
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }))
    }
}
impl From<RetryLink> for Link {
    fn from(link: RetryLink) -> Self {
        link.into_link()
    }
}
