use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::AbortHandle;
use tracing::{info, warn};

use decifra_core::QuizConfig;
use decifra_core::model::{Topic, TopicResolution};
use storage::bank::QuestionBank;

use super::runner::{QuizCompletion, QuizRun};
use super::session::QuizSession;
use crate::Clock;
use crate::error::QuizError;
use crate::shuffle::Shuffler;

/// Starts quiz runs: resolves the topic, draws and shuffles questions, spawns the driver.
///
/// At most one driver is live per service; starting again aborts the previous one.
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<dyn QuestionBank>,
    config: QuizConfig,
    shuffler: Shuffler,
    active: Mutex<Option<AbortHandle>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<dyn QuestionBank>) -> Self {
        Self {
            clock,
            bank,
            config: QuizConfig::default(),
            shuffler: Shuffler::default(),
            active: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: QuizConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = shuffler;
        self
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn bank(&self) -> Arc<dyn QuestionBank> {
        Arc::clone(&self.bank)
    }

    /// Builds a fresh session for a routing key without starting its timer.
    ///
    /// Unknown keys fall back to the default track.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuestionSet` if the resolved topic has no questions.
    pub fn prepare(&self, raw_topic: &str) -> Result<QuizSession, QuizError> {
        let resolution = Topic::resolve(raw_topic);
        if let TopicResolution::Fallback { requested, topic } = &resolution {
            warn!(requested = %requested, fallback = %topic, "unknown topic, using fallback");
        }
        let topic = resolution.topic();
        let pool = self.bank.questions(topic);
        let questions = self.shuffler.shuffle(&pool[..]);
        QuizSession::new(topic, questions, self.config, self.clock.now())
    }

    /// Starts a new run, aborting the driver of any previous run.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuestionSet` if the resolved topic has no questions.
    pub fn start(&self, raw_topic: &str) -> Result<(QuizRun, QuizCompletion), QuizError> {
        let session = self.prepare(raw_topic)?;
        let topic = session.topic();
        let total = session.total_questions();

        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = active.take() {
            previous.abort();
        }
        let (run, completion) = QuizRun::spawn(session);
        *active = Some(run.abort_handle());

        info!(topic = %topic, questions = total, "quiz started");
        Ok((run, completion))
    }
}
