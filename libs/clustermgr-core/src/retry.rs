//! Retry policies and per-call overrides.

use std::time::Duration;

use rand::Rng;
use tonic::{Code, Status};

/// Exponential backoff between retry attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    /// First delay (default: 100ms).
    pub initial: Duration,

    /// Upper bound of a single delay (default: 60s).
    pub max: Duration,

    /// Growth factor per attempt (default: 1.3).
    pub multiplier: f64,

    /// Add a random 0-25% to each delay.
    pub jitter: bool,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(60),
            multiplier: 1.3,
            jitter: true,
        }
    }
}

impl ExponentialBackoff {
    #[must_use]
    pub fn new(initial: Duration, max: Duration, multiplier: f64) -> Self {
        Self {
            initial,
            max,
            multiplier,
            jitter: true,
        }
    }

    /// Backoff for tests (1ms initial, 10ms max, no jitter).
    #[must_use]
    pub fn fast() -> Self {
        Self {
            initial: Duration::from_millis(1),
            max: Duration::from_millis(10),
            multiplier: 2.0,
            jitter: false,
        }
    }

    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }
}

/// Delay before retry number `attempt` (0-based).
///
/// Non-finite or negative inputs are sanitized; the result never exceeds
/// `backoff.max`.
#[must_use]
pub fn calculate_backoff(backoff: &ExponentialBackoff, attempt: u32) -> Duration {
    // One day; anything longer is not a retry anymore.
    const MAX_BACKOFF_SECS: f64 = 86400.0;

    let attempt_i32 = i32::try_from(attempt).unwrap_or(i32::MAX);

    let multiplier = if backoff.multiplier.is_finite() && backoff.multiplier >= 0.0 {
        backoff.multiplier
    } else {
        1.0
    };

    let initial_secs = backoff.initial.as_secs_f64();
    let max_secs = backoff.max.as_secs_f64().min(MAX_BACKOFF_SECS);

    let base = initial_secs * multiplier.powi(attempt_i32);
    let clamped = if base.is_finite() {
        base.min(max_secs).max(0.0)
    } else {
        max_secs
    };
    let duration = Duration::from_secs_f64(clamped);

    let duration = if backoff.jitter {
        let jitter_factor = rand::rng().random_range(0.0..=0.25);
        duration + duration.mul_f64(jitter_factor)
    } else {
        duration
    };

    duration.min(Duration::from_secs_f64(max_secs))
}

/// When and how long to retry a failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Status codes considered transient.
    pub retry_codes: Vec<Code>,

    /// Delay schedule between attempts.
    pub backoff: ExponentialBackoff,

    /// Total time budget across all attempts, measured from the first one.
    pub deadline: Duration,
}

impl Default for RetryPolicy {
    /// Policy applied to idempotent cluster manager reads and deletes.
    fn default() -> Self {
        Self {
            retry_codes: vec![Code::DeadlineExceeded, Code::Unavailable],
            backoff: ExponentialBackoff::default(),
            deadline: Duration::from_secs(20),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(retry_codes: impl IntoIterator<Item = Code>) -> Self {
        Self {
            retry_codes: retry_codes.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Whether `status` is worth another attempt.
    #[must_use]
    pub fn is_retryable(&self, status: &Status) -> bool {
        self.retry_codes.contains(&status.code())
    }
}

/// Per-call retry override.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RetrySetting {
    /// Use the method's default policy.
    #[default]
    Default,
    /// Single attempt, whatever the method's default.
    Disabled,
    /// Replace the method's default policy.
    Policy(RetryPolicy),
}

/// Per-call options accepted by every client operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub retry: RetrySetting,

    /// Per-attempt timeout; `None` keeps the method default.
    pub timeout: Option<Duration>,

    /// Extra metadata sent ahead of the routing entry.
    pub metadata: Vec<(String, String)>,
}

impl CallOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetrySetting::Policy(policy);
        self
    }

    #[must_use]
    pub fn without_retry(mut self) -> Self {
        self.retry = RetrySetting::Disabled;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Policy in effect given the method default.
    #[must_use]
    pub fn effective_retry<'a>(&'a self, default: Option<&'a RetryPolicy>) -> Option<&'a RetryPolicy> {
        match &self.retry {
            RetrySetting::Default => default,
            RetrySetting::Disabled => None,
            RetrySetting::Policy(policy) => Some(policy),
        }
    }
}
