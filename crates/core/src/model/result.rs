use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Topic, UserId};

/// Share of correct answers as a whole percentage, rounded half up.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn accuracy_percent(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    // round(100 * correct / total) in integer arithmetic
    let pct = (correct * 200 + total) / (total * 2);
    u8::try_from(pct).unwrap_or(100)
}

//
// ─── TERMINAL RESULT ──────────────────────────────────────────────────────────
//

/// Terminal result of a quiz session, emitted exactly once when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub topic: Topic,
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
}

impl QuizOutcome {
    /// Builds an outcome from a score, deriving the number of correct answers from `reward`.
    #[must_use]
    pub fn from_score(topic: Topic, score: u32, total_questions: u32, reward: u32) -> Self {
        let correct_answers = score.checked_div(reward).unwrap_or(0).min(total_questions);
        Self {
            topic,
            score,
            total_questions,
            correct_answers,
        }
    }

    #[must_use]
    pub fn wrong_answers(&self) -> u32 {
        self.total_questions.saturating_sub(self.correct_answers)
    }

    #[must_use]
    pub fn accuracy(&self) -> u8 {
        accuracy_percent(self.correct_answers, self.total_questions)
    }

    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_accuracy(self.accuracy())
    }
}

//
// ─── PERFORMANCE TIER ─────────────────────────────────────────────────────────
//

/// Feedback tier shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Excellent,
    VeryGood,
    Good,
    KeepPracticing,
}

impl Performance {
    #[must_use]
    pub fn from_accuracy(accuracy: u8) -> Self {
        match accuracy {
            90.. => Performance::Excellent,
            70..=89 => Performance::VeryGood,
            50..=69 => Performance::Good,
            _ => Performance::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Performance::Excellent => "Excelente!",
            Performance::VeryGood => "Muito Bom!",
            Performance::Good => "Bom trabalho!",
            Performance::KeepPracticing => "Continue praticando!",
        }
    }

    #[must_use]
    pub fn stars(self) -> u8 {
        match self {
            Performance::Excellent => 3,
            Performance::VeryGood => 2,
            Performance::Good => 1,
            Performance::KeepPracticing => 0,
        }
    }

    #[must_use]
    pub fn encouragement(self) -> &'static str {
        match self {
            Performance::Excellent | Performance::VeryGood => {
                "Parabéns! Você demonstra um ótimo domínio dos conceitos!"
            }
            Performance::Good | Performance::KeepPracticing => {
                "Continue praticando para melhorar suas habilidades de lógica!"
            }
        }
    }
}

//
// ─── PERSISTED RECORD ─────────────────────────────────────────────────────────
//

/// A quiz result as stored in a user's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub user_id: UserId,
    pub topic: Topic,
    pub score: u32,
    pub accuracy: u8,
    pub total_questions: u32,
    pub recorded_at: DateTime<Utc>,
}

impl ResultRecord {
    #[must_use]
    pub fn from_outcome(user_id: UserId, outcome: &QuizOutcome, recorded_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            topic: outcome.topic,
            score: outcome.score,
            accuracy: outcome.accuracy(),
            total_questions: outcome.total_questions,
            recorded_at,
        }
    }
}
