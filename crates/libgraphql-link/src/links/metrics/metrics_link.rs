use crate::Link;
use crate::link::Forward;
use crate::link::RequestHandler;
use crate::links::metrics::LinkMetricsSnapshot;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use futures::StreamExt;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Instant;

#[derive(Debug, Default)]
struct LinkMetrics {
    cancelled: AtomicU64,
    completed: AtomicU64,
    errors: AtomicU64,
    results: AtomicU64,
    started: AtomicU64,
}

/// Tracks one subscription to the rest of the chain. Dropped without being
/// finished means the consumer went away first.
struct InFlight {
    finished: bool,
    metrics: Arc<LinkMetrics>,
    operation_name: String,
    started_at: Instant,
}
impl InFlight {
    fn finish(&mut self, counter: &AtomicU64, outcome: &'static str) {
        counter.fetch_add(1, Ordering::Relaxed);
        self.finished = true;
        tracing::debug!(
            operation_name = self.operation_name.as_str(),
            outcome,
            elapsed_ms = self.started_at.elapsed().as_millis() as u64,
            "operation finished",
        );
    }
}
impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            let metrics = self.metrics.clone();
            self.finish(&metrics.cancelled, "cancelled");
        }
    }
}

/// Forwards every operation unchanged while counting what happens to it.
///
/// Counts are per instance and shared by the instance's clones, so keep a
/// clone around to read [`snapshot()`](Self::snapshot) after handing the
/// link to a chain.
#[derive(Clone, Debug, Default)]
pub struct MetricsLink {
    metrics: Arc<LinkMetrics>,
}
impl MetricsLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> LinkMetricsSnapshot {
        LinkMetricsSnapshot {
            cancelled: self.metrics.cancelled.load(Ordering::Relaxed),
            completed: self.metrics.completed.load(Ordering::Relaxed),
            errors: self.metrics.errors.load(Ordering::Relaxed),
            results: self.metrics.results.load(Ordering::Relaxed),
            started: self.metrics.started.load(Ordering::Relaxed),
        }
    }

    pub fn into_link(self) -> Link {
        Link::from_handler(self).named("metrics")
    }
}

#[inherent::inherent]
impl RequestHandler for MetricsLink {
    pub fn request(
        &self,
        operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>> {
        let metrics = self.metrics.clone();
        Some(Observable::new(move || {
            let forward = forward.clone();
            let metrics = metrics.clone();
            let operation = operation.clone();

            async_stream::stream! {
                metrics.started.fetch_add(1, Ordering::Relaxed);
                let mut in_flight = InFlight {
                    finished: false,
                    metrics: metrics.clone(),
                    operation_name: operation.operation_name().to_string(),
                    started_at: Instant::now(),
                };

                let mut results = forward.call(operation).stream();
                while let Some(event) = results.next().await {
                    match event {
                        Ok(result) => {
                            metrics.results.fetch_add(1, Ordering::Relaxed);
                            yield Ok(result);
                        },
                        Err(err) => {
                            in_flight.finish(&metrics.errors, "error");
                            yield Err(err);
                            return;
                        },
                    }
                }
                in_flight.finish(&metrics.completed, "complete");
            }
        }))
    }
}
impl From<MetricsLink> for Link {
    fn from(link: MetricsLink) -> Self {
        link.into_link()
    }
}
