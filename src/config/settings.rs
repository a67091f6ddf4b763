// src/config/settings.rs
use super::consts::*;

/// Wait/retry budgets for the loader and the refresh orchestrator.
/// Defaults mirror the production constants; tests compress them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Per-selector wait budget inside a hidden frame.
    pub element_wait_ms: u64,
    /// Interval between presence checks while waiting.
    pub poll_interval_ms: u64,
    /// Attempts to find the page container before giving up.
    pub max_container_retries: u32,
    /// Delay between container attempts.
    pub container_retry_delay_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            element_wait_ms: ELEMENT_WAIT_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            max_container_retries: MAX_CONTAINER_RETRIES,
            container_retry_delay_ms: CONTAINER_RETRY_DELAY_MS,
        }
    }
}

impl RefreshConfig {
    /// Compressed budgets for tests: immediate polls, tiny timeouts.
    pub fn fast() -> Self {
        Self {
            element_wait_ms: 20,
            poll_interval_ms: 1,
            max_container_retries: 3,
            container_retry_delay_ms: 1,
        }
    }
}
