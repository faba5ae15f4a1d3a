//! Shared error types for the services crate.

use thiserror::Error;

use decifra_core::model::{ProfileError, Topic};
use storage::bank::BankError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted when starting a quiz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot start quiz: no questions available for {topic}")]
    EmptyQuestionSet { topic: Topic },
}

/// Errors emitted by `ResultRecorder`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecorderError {
    #[error("could not save quiz result: {0}")]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RemoteScoreStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteStoreError {
    #[error("remote score store returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("remote score store returned no rows")]
    EmptyResponse,
    #[error("remote score row is invalid: {0}")]
    InvalidRow(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<RemoteStoreError> for StorageError {
    fn from(err: RemoteStoreError) -> Self {
        match err {
            RemoteStoreError::InvalidRow(msg) => StorageError::Serialization(msg),
            other => StorageError::Connection(other.to_string()),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
