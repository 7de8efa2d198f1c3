/// Point-in-time counts of what a [`MetricsLink`](super::MetricsLink) has
/// observed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LinkMetricsSnapshot {
    /// Operations whose stream was dropped before it completed or failed.
    pub cancelled: u64,
    pub completed: u64,
    pub errors: u64,
    pub results: u64,
    pub started: u64,
}
impl LinkMetricsSnapshot {
    /// Operations that started but have not finished yet.
    pub fn in_flight(&self) -> u64 {
        self.started
            .saturating_sub(self.completed)
            .saturating_sub(self.errors)
            .saturating_sub(self.cancelled)
    }
}
