//! Retry policy for translation attempts.

use std::time::Duration;

/// Bounded attempts with exponential backoff.
///
/// Delay after failed attempt `n` (1-indexed) is `base_delay * backoff_factor^(n-1)`,
/// optionally capped at `max_delay`. The default policy has no cap.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Default::default()
        }
    }

    /// A single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Calculate delay for a given attempt number (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exp = self.backoff_factor.max(1.0).powi(attempt as i32 - 1);
        let mut delay_ms = self.base_delay.as_millis() as f64 * exp;
        if let Some(cap) = self.max_delay {
            delay_ms = delay_ms.min(cap.as_millis() as f64);
        }

        Duration::from_millis(delay_ms.max(0.0) as u64)
    }

    /// Check if another attempt is allowed after `attempt` attempts were made.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_one_two_four_seconds() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
    }

    #[test]
    fn delay_is_capped() {
        let policy = RetryPolicy {
            max_delay: Some(Duration::from_millis(2500)),
            ..Default::default()
        };

        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(2500));
        assert_eq!(policy.delay_for_attempt(10), Duration::from_millis(2500));
    }

    #[test]
    fn large_base_delay_is_not_capped_by_default() {
        let policy = RetryPolicy::exponential(3, Duration::from_secs(20));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(20));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(40));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(80));
    }

    #[test]
    fn attempt_zero_has_no_delay() {
        assert_eq!(RetryPolicy::default().delay_for_attempt(0), Duration::ZERO);
    }

    #[test]
    fn should_retry_respects_max_attempts() {
        let policy = RetryPolicy::exponential(3, Duration::from_millis(10));

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
        assert!(!RetryPolicy::no_retry().should_retry(1));
    }
}
