use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizConfigError {
    #[error("time budget must be at least 1 second")]
    InvalidTimeBudget,

    #[error("reward per correct answer must be > 0")]
    InvalidReward,

    #[error("tick interval must be > 0")]
    InvalidTickInterval,
}

/// Timing and scoring knobs for a quiz session.
///
/// Production uses the defaults; tests shrink the delays to run in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    time_budget_secs: u32,
    reward: u32,
    tick_interval: Duration,
    settle_delay: Duration,
    completion_delay: Duration,
}

impl QuizConfig {
    pub const DEFAULT_TIME_BUDGET_SECS: u32 = 30;
    pub const DEFAULT_REWARD: u32 = 100;
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);
    /// Settle delay of the older one-question-at-a-time screen.
    pub const LEGACY_SETTLE_DELAY: Duration = Duration::from_millis(1500);
    pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(2000);

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `QuizConfigError` if the time budget, reward or tick interval is zero.
    pub fn new(
        time_budget_secs: u32,
        reward: u32,
        tick_interval: Duration,
        settle_delay: Duration,
        completion_delay: Duration,
    ) -> Result<Self, QuizConfigError> {
        if time_budget_secs == 0 {
            return Err(QuizConfigError::InvalidTimeBudget);
        }
        if reward == 0 {
            return Err(QuizConfigError::InvalidReward);
        }
        if tick_interval.is_zero() {
            return Err(QuizConfigError::InvalidTickInterval);
        }
        Ok(Self {
            time_budget_secs,
            reward,
            tick_interval,
            settle_delay,
            completion_delay,
        })
    }

    /// Same as the default, with the longer legacy settle delay.
    #[must_use]
    pub fn legacy() -> Self {
        Self::default().with_settle_delay(Self::LEGACY_SETTLE_DELAY)
    }

    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }

    #[must_use]
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    #[must_use]
    pub fn reward(&self) -> u32 {
        self.reward
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[must_use]
    pub fn completion_delay(&self) -> Duration {
        self.completion_delay
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: Self::DEFAULT_TIME_BUDGET_SECS,
            reward: Self::DEFAULT_REWARD,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
            completion_delay: Self::DEFAULT_COMPLETION_DELAY,
        }
    }
}
