use std::sync::Arc;

use tracing::{info, warn};

use decifra_core::model::{Identity, QuizOutcome, ResultId, ResultRecord};
use storage::repository::ResultRepository;

use crate::Clock;
use crate::error::RecorderError;

/// Which terminal results are worth persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecorderPolicy {
    /// Persist results that scored nothing. Off by default.
    pub record_zero_scores: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Recorded(ResultId),
    SkippedAnonymous,
    SkippedZeroScore,
}

impl RecordStatus {
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordStatus::Recorded(_))
    }
}

/// Persists terminal quiz results for identified users.
#[derive(Clone)]
pub struct ResultRecorder {
    clock: Clock,
    results: Arc<dyn ResultRepository>,
    policy: RecorderPolicy,
}

impl ResultRecorder {
    #[must_use]
    pub fn new(clock: Clock, results: Arc<dyn ResultRepository>) -> Self {
        Self {
            clock,
            results,
            policy: RecorderPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RecorderPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> RecorderPolicy {
        self.policy
    }

    /// Whether `record` would reach the repository for this identity and outcome.
    #[must_use]
    pub fn would_record(&self, identity: &Identity, outcome: &QuizOutcome) -> bool {
        identity.user_id().is_some() && (outcome.score > 0 || self.policy.record_zero_scores)
    }

    /// Persist `outcome` for `identity`. Anonymous sessions never touch the repository.
    ///
    /// Failures are returned, not retried.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Storage` if the repository rejects the write.
    pub async fn record(
        &self,
        identity: &Identity,
        outcome: &QuizOutcome,
    ) -> Result<RecordStatus, RecorderError> {
        let Some(user_id) = identity.user_id() else {
            return Ok(RecordStatus::SkippedAnonymous);
        };
        if !self.would_record(identity, outcome) {
            return Ok(RecordStatus::SkippedZeroScore);
        }

        let record = ResultRecord::from_outcome(user_id, outcome, self.clock.now());
        match self.results.append_result(&record).await {
            Ok(id) => {
                info!(
                    user = %user_id,
                    topic = %record.topic,
                    score = record.score,
                    accuracy = record.accuracy,
                    "quiz result recorded"
                );
                Ok(RecordStatus::Recorded(id))
            }
            Err(err) => {
                warn!(user = %user_id, error = %err, "failed to record quiz result");
                Err(err.into())
            }
        }
    }
}
