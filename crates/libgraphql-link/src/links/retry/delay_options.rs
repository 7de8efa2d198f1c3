use std::time::Duration;

/// Exponential backoff between attempts.
///
/// The delay before retry `n` (starting at 1) is `base * 2^n`, capped at
/// `max`. Without jitter `base` is half of `initial`, so the first retry
/// waits exactly `initial`. With jitter `base` is `initial` and the result
/// is scaled by a random factor in `[0, 1)`, spreading retries of many
/// clients over the full window.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayOptions {
    pub initial: Duration,
    pub jitter: bool,
    pub max: Option<Duration>,
}
impl DelayOptions {
    pub fn delay_for(&self, count: u32) -> Duration {
        let base =
            if self.jitter {
                self.initial
            } else {
                self.initial / 2
            };
        let factor = 2u32.checked_pow(count).unwrap_or(u32::MAX);
        let mut delay = base.saturating_mul(factor);
        if let Some(max) = self.max {
            delay = delay.min(max);
        }
        if self.jitter {
            delay = delay.mul_f64(rand::random::<f64>());
        }
        delay
    }
}
impl Default for DelayOptions {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(300),
            jitter: true,
            max: None,
        }
    }
}
