use std::collections::BTreeMap;
use std::sync::Arc;

use decifra_core::model::{Language, Question, QuestionDraft, QuestionError, Topic};
use thiserror::Error;

/// Question content compiled into the binary.
const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");

/// Errors raised while loading bank content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("malformed question content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown track in question content: {0:?}")]
    UnknownTrack(String),

    #[error("`random` is a pooled topic and cannot hold its own questions")]
    PooledTopicHasContent,

    #[error("invalid question #{index} in track {track}: {source}")]
    InvalidQuestion {
        track: &'static str,
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Read-only source of questions per topic.
///
/// Implementations hand out shared immutable views; callers shuffle a copy.
pub trait QuestionBank: Send + Sync {
    /// Questions for `topic`. `Topic::Random` yields every track concatenated.
    fn questions(&self, topic: Topic) -> Arc<[Question]>;

    /// Number of questions a quiz on `topic` would contain.
    fn pool_size(&self, topic: Topic) -> usize {
        self.questions(topic).len()
    }
}

/// Bank backed by fixed in-memory pools.
#[derive(Clone)]
pub struct StaticQuestionBank {
    pools: BTreeMap<Language, Arc<[Question]>>,
    pooled: Arc<[Question]>,
    empty: Arc<[Question]>,
}

impl StaticQuestionBank {
    /// The question set shipped with the application.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the embedded content is malformed.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    /// Parses a JSON object keyed by track (`"java"`, `"python"`, …).
    ///
    /// # Errors
    ///
    /// Returns `BankError` on malformed JSON, unknown track keys, or questions that fail
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let raw: BTreeMap<String, Vec<QuestionDraft>> = serde_json::from_str(json)?;
        let mut pools = Vec::with_capacity(raw.len());
        for (key, drafts) in raw {
            let language = match key.parse::<Topic>() {
                Ok(Topic::Language(language)) => language,
                Ok(Topic::Random) => return Err(BankError::PooledTopicHasContent),
                Err(_) => return Err(BankError::UnknownTrack(key)),
            };
            let questions = drafts
                .into_iter()
                .enumerate()
                .map(|(index, draft)| {
                    draft.validate().map_err(|source| BankError::InvalidQuestion {
                        track: language.key(),
                        index,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            pools.push((language, questions));
        }
        Ok(Self::from_pools(pools))
    }

    /// Builds a bank from already validated pools. Tracks not listed are empty.
    #[must_use]
    pub fn from_pools(pools: impl IntoIterator<Item = (Language, Vec<Question>)>) -> Self {
        let mut by_language: BTreeMap<Language, Vec<Question>> = BTreeMap::new();
        for (language, questions) in pools {
            by_language.entry(language).or_default().extend(questions);
        }

        // Pooled order follows the home screen track order.
        let pooled: Vec<Question> = Language::ALL
            .iter()
            .filter_map(|language| by_language.get(language))
            .flat_map(|questions| questions.iter().cloned())
            .collect();

        Self {
            pools: by_language
                .into_iter()
                .map(|(language, questions)| (language, Arc::from(questions)))
                .collect(),
            pooled: Arc::from(pooled),
            empty: Arc::from(Vec::new()),
        }
    }
}

impl QuestionBank for StaticQuestionBank {
    fn questions(&self, topic: Topic) -> Arc<[Question]> {
        match topic {
            Topic::Language(language) => self
                .pools
                .get(&language)
                .map_or_else(|| Arc::clone(&self.empty), Arc::clone),
            Topic::Random => Arc::clone(&self.pooled),
        }
    }
}

impl std::fmt::Debug for StaticQuestionBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes: BTreeMap<&str, usize> = self
            .pools
            .iter()
            .map(|(language, questions)| (language.key(), questions.len()))
            .collect();
        f.debug_struct("StaticQuestionBank")
            .field("pools", &sizes)
            .field("pooled", &self.pooled.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str, correct: usize) -> Question {
        Question::new(prompt, None, vec!["a".into(), "b".into(), "c".into()], correct).unwrap()
    }

    #[test]
    fn builtin_content_loads() {
        let bank = StaticQuestionBank::builtin().expect("builtin bank");
        for language in Language::ALL {
            assert!(bank.pool_size(Topic::Language(language)) > 0, "{language:?}");
        }
    }

    #[test]
    fn builtin_java_starts_with_preincrement_question() {
        let bank = StaticQuestionBank::builtin().unwrap();
        let java = bank.questions(Topic::Language(Language::Java));
        let first = &java[0];
        assert!(first.snippet().unwrap().contains("++x * 2"));
        assert_eq!(first.correct_index(), 1);
        assert_eq!(first.options()[1], "12");
    }

    #[test]
    fn random_is_concatenation_of_every_track() {
        let bank = StaticQuestionBank::builtin().unwrap();
        let sum: usize = Language::ALL
            .into_iter()
            .map(|language| bank.pool_size(Topic::Language(language)))
            .sum();
        assert_eq!(bank.pool_size(Topic::Random), sum);

        let pooled = bank.questions(Topic::Random);
        let java = bank.questions(Topic::Language(Language::Java));
        assert_eq!(&pooled[..java.len()], &java[..]);
    }

    #[test]
    fn repeated_calls_share_the_same_pool() {
        let bank = StaticQuestionBank::builtin().unwrap();
        let a = bank.questions(Topic::Language(Language::Sql));
        let b = bank.questions(Topic::Language(Language::Sql));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_track_is_empty() {
        let bank =
            StaticQuestionBank::from_pools([(Language::Python, vec![question("p1", 0)])]);
        assert!(bank.questions(Topic::Language(Language::Java)).is_empty());
        assert_eq!(bank.pool_size(Topic::Random), 1);
    }

    #[test]
    fn from_json_accepts_legacy_field_names() {
        let json = r#"{
            "sql": [
                { "question": "Q?", "options": ["x", "y"], "correctAnswer": 1 }
            ]
        }"#;
        let bank = StaticQuestionBank::from_json(json).unwrap();
        let sql = bank.questions(Topic::Language(Language::Sql));
        assert_eq!(sql.len(), 1);
        assert_eq!(sql[0].correct_index(), 1);
    }

    #[test]
    fn from_json_rejects_unknown_track() {
        let err = StaticQuestionBank::from_json(r#"{ "cobol": [] }"#).unwrap_err();
        assert!(matches!(err, BankError::UnknownTrack(key) if key == "cobol"));
    }

    #[test]
    fn from_json_rejects_random_pool() {
        let err = StaticQuestionBank::from_json(r#"{ "random": [] }"#).unwrap_err();
        assert!(matches!(err, BankError::PooledTopicHasContent));
    }

    #[test]
    fn from_json_reports_invalid_question() {
        let json = r#"{ "java": [ { "prompt": "Q", "options": ["a", "b"], "correct_index": 5 } ] }"#;
        let err = StaticQuestionBank::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            BankError::InvalidQuestion {
                track: "java",
                index: 0,
                ..
            }
        ));
    }
}
