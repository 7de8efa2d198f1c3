mod link_metrics_snapshot;
mod metrics_link;


pub use link_metrics_snapshot::LinkMetricsSnapshot;
pub use metrics_link::MetricsLink;
