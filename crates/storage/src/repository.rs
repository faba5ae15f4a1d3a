use async_trait::async_trait;
use decifra_core::model::{Profile, ResultId, ResultRecord, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A stored result together with the id the backend assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub id: ResultId,
    pub record: ResultRecord,
}

/// Append-only history of quiz results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Persist one result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, record: &ResultRecord) -> Result<ResultId, StorageError>;

    /// Results for `user_id`, newest first, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn list_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or replace the profile for its user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError>;

    /// Fetch a profile; `Ok(None)` when the user has none yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StorageError>;
}

/// Newest first; ties broken by insertion order, latest first.
pub(crate) fn sort_newest_first(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| {
        b.record
            .recorded_at
            .cmp(&a.record.recorded_at)
            .then_with(|| b.id.value().cmp(&a.id.value()))
    });
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<Vec<ResultRow>>>,
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn append_result(&self, record: &ResultRecord) -> Result<ResultId, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next = u64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("result id overflow".into()))?
            + 1;
        let id = ResultId::new(next);
        guard.push(ResultRow {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn list_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<ResultRow> = guard
            .iter()
            .filter(|row| row.record.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut rows);
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(profile.user_id(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StorageError> {
        let guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&user_id).cloned())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub results: Arc<dyn ResultRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let results: Arc<dyn ResultRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { results, profiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use decifra_core::model::{Language, MainLanguage, Topic};
    use decifra_core::time::fixed_now;

    fn record(user_id: UserId, score: u32, minutes: i64) -> ResultRecord {
        ResultRecord {
            user_id,
            topic: Topic::Language(Language::Java),
            score,
            accuracy: 50,
            total_questions: 4,
            recorded_at: fixed_now() + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn results_are_listed_newest_first_per_user() {
        let repo = InMemoryRepository::new();
        let alice = UserId::random();
        let bob = UserId::random();

        repo.append_result(&record(alice, 100, 0)).await.unwrap();
        repo.append_result(&record(bob, 400, 1)).await.unwrap();
        repo.append_result(&record(alice, 300, 5)).await.unwrap();
        repo.append_result(&record(alice, 200, 2)).await.unwrap();

        let rows = repo.list_results(alice, 10).await.unwrap();
        let scores: Vec<u32> = rows.iter().map(|r| r.record.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
    }

    #[tokio::test]
    async fn list_respects_limit_and_ids_increase() {
        let repo = InMemoryRepository::new();
        let user = UserId::random();
        let first = repo.append_result(&record(user, 100, 0)).await.unwrap();
        let second = repo.append_result(&record(user, 200, 0)).await.unwrap();
        assert!(second.value() > first.value());

        let rows = repo.list_results(user, 1).await.unwrap();
        assert_eq!(rows.len(), 1);
        // same timestamp: the later insert wins
        assert_eq!(rows[0].id, second);
    }

    #[tokio::test]
    async fn profile_upsert_replaces_existing() {
        let storage = Storage::in_memory();
        let user = UserId::random();
        assert!(storage.profiles.get_profile(user).await.unwrap().is_none());

        let first = Profile::new(user, "Ana", MainLanguage::Python, fixed_now()).unwrap();
        storage.profiles.upsert_profile(&first).await.unwrap();
        let second = Profile::new(user, "Ana Maria", MainLanguage::Go, fixed_now()).unwrap();
        storage.profiles.upsert_profile(&second).await.unwrap();

        let fetched = storage.profiles.get_profile(user).await.unwrap().unwrap();
        assert_eq!(fetched, second);
    }
}
