use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("unknown topic key: {0:?}")]
    Unknown(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty label shown on a language track card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Médio",
            Difficulty::Hard => "Difícil",
        }
    }
}

//
// ─── LANGUAGE TRACKS ───────────────────────────────────────────────────────────
//

/// A language track with its own question pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    Sql,
    JavaScript,
}

impl Language {
    /// Every track, in the order the home screen lists them.
    pub const ALL: [Language; 4] = [
        Language::Java,
        Language::Python,
        Language::Sql,
        Language::JavaScript,
    ];

    /// Stable key used in routes, storage and the question bank.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::Sql => "sql",
            Language::JavaScript => "javascript",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Python => "Python",
            Language::Sql => "SQL",
            Language::JavaScript => "JavaScript",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Language::Java => {
                "Conceitos de orientação a objetos, estruturas de dados e algoritmos em Java"
            }
            Language::Python => {
                "Lógica de programação, estruturas de controle e manipulação de dados"
            }
            Language::Sql => {
                "Consultas, joins, agregações e otimização de queries de banco de dados"
            }
            Language::JavaScript => "Funções, closures, promises e manipulação do DOM",
        }
    }

    #[must_use]
    pub fn difficulty(self) -> Difficulty {
        match self {
            Language::Python => Difficulty::Easy,
            Language::Java | Language::Sql | Language::JavaScript => Difficulty::Medium,
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.key() == key)
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// What a quiz draws its questions from: one track, or all of them pooled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Topic {
    Language(Language),
    Random,
}

/// Outcome of resolving a free-form topic key from routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicResolution {
    Exact(Topic),
    Fallback { requested: String, topic: Topic },
}

impl TopicResolution {
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            TopicResolution::Exact(topic) | TopicResolution::Fallback { topic, .. } => *topic,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, TopicResolution::Fallback { .. })
    }
}

impl Topic {
    pub const RANDOM_KEY: &'static str = "random";

    /// Track used when a requested key is not recognised.
    pub const FALLBACK: Topic = Topic::Language(Language::Java);

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Topic::Language(lang) => lang.key(),
            Topic::Random => Self::RANDOM_KEY,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Topic::Language(lang) => lang.title(),
            Topic::Random => "Modo Rápido",
        }
    }

    #[must_use]
    pub fn language(self) -> Option<Language> {
        match self {
            Topic::Language(lang) => Some(lang),
            Topic::Random => None,
        }
    }

    /// Resolves a routing key, falling back to [`Topic::FALLBACK`] for unknown keys.
    #[must_use]
    pub fn resolve(raw: &str) -> TopicResolution {
        match raw.parse::<Topic>() {
            Ok(topic) => TopicResolution::Exact(topic),
            Err(_) => TopicResolution::Fallback {
                requested: raw.to_owned(),
                topic: Self::FALLBACK,
            },
        }
    }
}

impl From<Language> for Topic {
    fn from(lang: Language) -> Self {
        Topic::Language(lang)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Topic {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == Self::RANDOM_KEY {
            return Ok(Topic::Random);
        }
        Language::from_key(&key)
            .map(Topic::Language)
            .ok_or_else(|| TopicError::Unknown(s.to_owned()))
    }
}

impl TryFrom<String> for Topic {
    type Error = TopicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.key().to_owned()
    }
}
