use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least {min} options, got {len}")]
    TooFewOptions { min: usize, len: usize },

    #[error("a question supports at most {max} options, got {len}")]
    TooManyOptions { max: usize, len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// An immutable multiple-choice question.
///
/// Options are displayed in order and labelled `A`, `B`, `C`… by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    prompt: String,
    snippet: Option<String>,
    options: Vec<String>,
    correct_index: usize,
}

impl Question {
    pub const MIN_OPTIONS: usize = 2;
    pub const MAX_OPTIONS: usize = 26;

    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt or an option is blank, the option count is
    /// outside `2..=26`, or `correct_index` does not point at an option.
    pub fn new(
        prompt: impl Into<String>,
        snippet: Option<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < Self::MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                min: Self::MIN_OPTIONS,
                len: options.len(),
            });
        }
        if options.len() > Self::MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions {
                max: Self::MAX_OPTIONS,
                len: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }

        // A blank snippet is the same as no snippet.
        let snippet = snippet.filter(|s| !s.trim().is_empty());

        Ok(Self {
            prompt,
            snippet,
            options,
            correct_index,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Source code shown verbatim in a monospace block, if any.
    #[must_use]
    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Whether `selected` is the right answer. Out-of-range indices are simply wrong.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }

    /// Display label for the option at `index` (`0 -> 'A'`).
    #[must_use]
    pub fn option_label(index: usize) -> Option<char> {
        if index < Self::MAX_OPTIONS {
            u8::try_from(index).ok().map(|i| char::from(b'A' + i))
        } else {
            None
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in bank content files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(default, alias = "code", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_index: usize,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn validate(self) -> Result<Question, QuestionError> {
        Question::new(self.prompt, self.snippet, self.options, self.correct_index)
    }
}

impl From<&Question> for QuestionDraft {
    fn from(question: &Question) -> Self {
        Self {
            prompt: question.prompt.clone(),
            snippet: question.snippet.clone(),
            options: question.options.clone(),
            correct_index: question.correct_index,
        }
    }
}
