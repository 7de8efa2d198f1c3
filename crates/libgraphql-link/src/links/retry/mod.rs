//! Re-runs the rest of the chain when it fails with a stream error.

mod attempts_options;
mod delay_options;
mod retry_link;

#[cfg(test)]
mod tests;

pub use attempts_options::AttemptsOptions;
pub use delay_options::DelayOptions;
pub use retry_link::RetryLink;
