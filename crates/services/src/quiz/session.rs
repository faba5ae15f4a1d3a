use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

use decifra_core::QuizConfig;
use decifra_core::model::{Question, QuizOutcome, Topic};

use crate::error::QuizError;

//
// ─── TRANSITION RESULTS ────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Active,
    Complete,
}

/// How the current question was resolved. Present while the session is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub question_index: usize,
    /// `None` when the countdown ran out.
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub correct: bool,
}

impl Resolution {
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.selected.is_none()
    }
}

/// Transition applied once the settle delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Advanced { index: usize },
    Completed,
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub topic: Topic,
    pub question_index: usize,
    pub total_questions: usize,
    pub question: Question,
    pub score: u32,
    pub time_remaining: u32,
    pub time_budget: u32,
    pub resolution: Option<Resolution>,
    pub state: QuizState,
}

impl QuizSnapshot {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Complete
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.resolution.is_some()
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one quiz attempt.
///
/// Pure and synchronous: the runner feeds it ticks, answers and settle calls. Calls that
/// do not apply in the current state are no-ops.
pub struct QuizSession {
    topic: Topic,
    questions: Vec<Question>,
    config: QuizConfig,
    current: usize,
    score: u32,
    time_remaining: u32,
    resolution: Option<Resolution>,
    state: QuizState,
    outcome_emitted: bool,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Creates an active session on the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuestionSet` if `questions` is empty.
    pub fn new(
        topic: Topic,
        questions: Vec<Question>,
        config: QuizConfig,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet { topic });
        }
        Ok(Self {
            topic,
            questions,
            config,
            current: 0,
            score: 0,
            time_remaining: config.time_budget_secs(),
            resolution: None,
            state: QuizState::Active,
            outcome_emitted: false,
            started_at,
        })
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Complete
    }

    /// True between a resolution and the following settle.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.resolution.is_some()
    }

    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    fn accepts_input(&self) -> bool {
        self.state == QuizState::Active && self.resolution.is_none()
    }

    /// One elapsed second. Reaching zero resolves the question as a timeout.
    pub fn tick(&mut self) -> Option<Resolution> {
        if !self.accepts_input() {
            debug!(state = ?self.state, locked = self.is_locked(), "tick ignored");
            return None;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            debug!(question = self.current, "question timed out");
            Some(self.resolve(None))
        } else {
            None
        }
    }

    /// Answers the current question. Out-of-range indices count as wrong.
    pub fn submit_answer(&mut self, selected: usize) -> Option<Resolution> {
        if !self.accepts_input() {
            debug!(selected, state = ?self.state, "answer ignored");
            return None;
        }
        Some(self.resolve(Some(selected)))
    }

    fn resolve(&mut self, selected: Option<usize>) -> Resolution {
        let question = &self.questions[self.current];
        let correct = selected.is_some_and(|index| question.is_correct(index));
        if correct {
            self.score = self.score.saturating_add(self.config.reward());
        }
        let resolution = Resolution {
            question_index: self.current,
            selected,
            correct_index: question.correct_index(),
            correct,
        };
        self.resolution = Some(resolution);
        resolution
    }

    /// Advances past a resolved question, or completes after the last one.
    pub fn settle(&mut self) -> Option<Settled> {
        if self.state == QuizState::Complete || self.resolution.take().is_none() {
            debug!(state = ?self.state, "settle ignored");
            return None;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.time_remaining = self.config.time_budget_secs();
            Some(Settled::Advanced {
                index: self.current,
            })
        } else {
            self.state = QuizState::Complete;
            info!(
                topic = %self.topic,
                score = self.score,
                total = self.questions.len(),
                "quiz complete"
            );
            Some(Settled::Completed)
        }
    }

    /// The terminal result. Returns `Some` exactly once, after completion.
    pub fn take_outcome(&mut self) -> Option<QuizOutcome> {
        if self.state != QuizState::Complete || self.outcome_emitted {
            return None;
        }
        self.outcome_emitted = true;
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Some(QuizOutcome::from_score(
            self.topic,
            self.score,
            total,
            self.config.reward(),
        ))
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            topic: self.topic,
            question_index: self.current,
            total_questions: self.questions.len(),
            question: self.current_question().clone(),
            score: self.score,
            time_remaining: self.time_remaining,
            time_budget: self.config.time_budget_secs(),
            resolution: self.resolution,
            state: self.state,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic", &self.topic)
            .field("current", &self.current)
            .field("total", &self.questions.len())
            .field("score", &self.score)
            .field("time_remaining", &self.time_remaining)
            .field("resolution", &self.resolution)
            .field("state", &self.state)
            .field("outcome_emitted", &self.outcome_emitted)
            .finish_non_exhaustive()
    }
}
