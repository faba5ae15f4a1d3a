use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{ResultRecord, UserId, accuracy_percent};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("display name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("unknown main language: {0:?}")]
    UnknownLanguage(String),
}

//
// ─── MAIN LANGUAGE ─────────────────────────────────────────────────────────────
//

/// The language a user picks as their main one when signing up.
///
/// Wider than the quiz tracks: it is profile metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainLanguage {
    #[default]
    JavaScript,
    Python,
    Java,
    CSharp,
    Php,
    Ruby,
    Go,
    Swift,
}

impl MainLanguage {
    pub const ALL: [MainLanguage; 8] = [
        MainLanguage::JavaScript,
        MainLanguage::Python,
        MainLanguage::Java,
        MainLanguage::CSharp,
        MainLanguage::Php,
        MainLanguage::Ruby,
        MainLanguage::Go,
        MainLanguage::Swift,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MainLanguage::JavaScript => "javascript",
            MainLanguage::Python => "python",
            MainLanguage::Java => "java",
            MainLanguage::CSharp => "csharp",
            MainLanguage::Php => "php",
            MainLanguage::Ruby => "ruby",
            MainLanguage::Go => "go",
            MainLanguage::Swift => "swift",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MainLanguage::JavaScript => "JavaScript",
            MainLanguage::Python => "Python",
            MainLanguage::Java => "Java",
            MainLanguage::CSharp => "C#",
            MainLanguage::Php => "PHP",
            MainLanguage::Ruby => "Ruby",
            MainLanguage::Go => "Go",
            MainLanguage::Swift => "Swift",
        }
    }
}

impl fmt::Display for MainLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MainLanguage {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.key() == key)
            .ok_or_else(|| ProfileError::UnknownLanguage(s.to_owned()))
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// Public profile attached to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    user_id: UserId,
    display_name: String,
    main_language: MainLanguage,
    created_at: DateTime<Utc>,
}

impl Profile {
    pub const MAX_NAME_LEN: usize = 64;
    pub const DEFAULT_DISPLAY_NAME: &'static str = "Desenvolvedor";

    /// # Errors
    ///
    /// Returns `ProfileError::NameTooLong` if the trimmed name exceeds `MAX_NAME_LEN` chars.
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        main_language: MainLanguage,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        let display_name = display_name.into().trim().to_owned();
        if display_name.chars().count() > Self::MAX_NAME_LEN {
            return Err(ProfileError::NameTooLong {
                max: Self::MAX_NAME_LEN,
            });
        }
        Ok(Self {
            user_id,
            display_name,
            main_language,
            created_at,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The stored name, or the generic greeting name when none was given.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            Self::DEFAULT_DISPLAY_NAME
        } else {
            &self.display_name
        }
    }

    /// The name exactly as stored (possibly empty).
    #[must_use]
    pub fn raw_display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn main_language(&self) -> MainLanguage {
        self.main_language
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

/// Aggregates shown at the top of the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub best_score: u32,
    pub average_accuracy: u8,
    pub total_quizzes: u32,
}

impl ProfileStats {
    #[must_use]
    pub fn from_records(records: &[ResultRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let best_score = records.iter().map(|r| r.score).max().unwrap_or(0);
        let total_quizzes = u32::try_from(records.len()).unwrap_or(u32::MAX);
        let accuracy_sum: u32 = records.iter().map(|r| u32::from(r.accuracy)).sum();
        // Mean of percentages, rounded: reuse the percentage rounding on sum / (100 * n).
        let average_accuracy = accuracy_percent(accuracy_sum, total_quizzes.saturating_mul(100));

        Self {
            best_score,
            average_accuracy,
            total_quizzes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, Topic};
    use crate::time::fixed_now;

    fn record(score: u32, accuracy: u8) -> ResultRecord {
        ResultRecord {
            user_id: UserId::random(),
            topic: Topic::Language(Language::Python),
            score,
            accuracy,
            total_questions: 3,
            recorded_at: fixed_now(),
        }
    }

    #[test]
    fn blank_name_falls_back_to_default_greeting() {
        let profile =
            Profile::new(UserId::random(), "   ", MainLanguage::Go, fixed_now()).unwrap();
        assert_eq!(profile.display_name(), "Desenvolvedor");
        assert_eq!(profile.raw_display_name(), "");
    }

    #[test]
    fn long_name_is_rejected() {
        let name = "x".repeat(Profile::MAX_NAME_LEN + 1);
        let err = Profile::new(UserId::random(), name, MainLanguage::Go, fixed_now()).unwrap_err();
        assert_eq!(err, ProfileError::NameTooLong { max: 64 });
    }

    #[test]
    fn main_language_parses_and_labels() {
        let lang: MainLanguage = "csharp".parse().unwrap();
        assert_eq!(lang.label(), "C#");
        assert!("cobol".parse::<MainLanguage>().is_err());
    }

    #[test]
    fn stats_for_empty_history_are_zero() {
        assert_eq!(ProfileStats::from_records(&[]), ProfileStats::default());
    }

    #[test]
    fn stats_aggregate_history() {
        let records = vec![record(200, 67), record(300, 100), record(0, 0)];
        let stats = ProfileStats::from_records(&records);
        assert_eq!(stats.best_score, 300);
        assert_eq!(stats.total_quizzes, 3);
        // (67 + 100 + 0) / 3 = 55.67
        assert_eq!(stats.average_accuracy, 56);
    }
}
