//! Bounded retry with exponential backoff for image-generation calls.
//!
//! Image backends fail transiently all the time — queue saturation (429),
//! gateway hiccups (502/503/504), cold model loads timing out. Those are
//! worth one or two retries; malformed requests and auth failures are not.

use std::time::Duration;

/// Retry behavior for a generation call.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retries after the first attempt (0 = fail immediately).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
    /// Backoff multiplier per attempt.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A config with the given retry count and default backoff.
    pub fn with_retries(retries: u32) -> Self {
        Self {
            max_retries: retries,
            ..Default::default()
        }
    }

    /// Backoff delay for a 0-indexed attempt, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(attempt as i32);
        Duration::from_secs_f64(base.min(self.max_delay.as_secs_f64()))
    }
}

/// Whether an error string from a provider indicates a transient failure.
pub fn is_transient_error(error: &str) -> bool {
    let transient_statuses = ["429", "500", "502", "503", "504"];
    if transient_statuses
        .iter()
        .any(|s| error.contains(&format!("HTTP {s}")))
    {
        return true;
    }

    let lower = error.to_lowercase();
    [
        "request failed:",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "broken pipe",
    ]
    .iter()
    .any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_no_retries() {
        assert_eq!(RetryConfig::default().max_retries, 0);
    }

    #[test]
    fn delay_grows_and_caps() {
        let config = RetryConfig {
            max_delay: Duration::from_secs(10),
            ..RetryConfig::with_retries(8)
        };
        assert!(config.delay_for_attempt(1) > config.delay_for_attempt(0));
        assert!(config.delay_for_attempt(8) <= Duration::from_secs(10));
    }

    #[test]
    fn transient_errors_detected() {
        assert!(is_transient_error("SwarmUI GenerateText2Image HTTP 503"));
        assert!(is_transient_error("OpenAI images API HTTP 429: slow down"));
        assert!(is_transient_error("request failed: connection refused"));
        assert!(is_transient_error("request failed: operation timed out"));
    }

    #[test]
    fn permanent_errors_not_retried() {
        assert!(!is_transient_error("OpenAI images API HTTP 401: bad key"));
        assert!(!is_transient_error("SwarmUI returned no images"));
    }
}
