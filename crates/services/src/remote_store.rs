use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use decifra_core::model::{ResultId, ResultRecord, Topic, UserId};
use storage::repository::{ResultRepository, ResultRow, StorageError};

use crate::error::RemoteStoreError;

#[derive(Clone, Debug)]
pub struct RemoteScoreConfig {
    /// Project URL; the PostgREST endpoint lives under `/rest/v1`.
    pub base_url: String,
    pub api_key: String,
}

impl RemoteScoreConfig {
    /// Reads `DECIFRA_REMOTE_URL` and `DECIFRA_REMOTE_KEY`; `None` unless both are set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("DECIFRA_REMOTE_URL").ok()?;
        let api_key = env::var("DECIFRA_REMOTE_KEY").ok()?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        Some(Self { base_url, api_key })
    }

    fn scores_url(&self) -> String {
        format!("{}/rest/v1/scores", self.base_url.trim_end_matches('/'))
    }
}

/// Result history kept in a hosted `scores` table.
#[derive(Clone)]
pub struct RemoteScoreStore {
    client: Client,
    config: RemoteScoreConfig,
}

impl RemoteScoreStore {
    #[must_use]
    pub fn new(config: RemoteScoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn insert(&self, record: &ResultRecord) -> Result<ResultId, RemoteStoreError> {
        let response = self
            .client
            .post(self.config.scores_url())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=representation")
            .json(&NewScoreRow::from_record(record))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteStoreError::HttpStatus(response.status()));
        }

        let rows: Vec<ScoreRow> = response.json().await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(RemoteStoreError::EmptyResponse)?;
        row.into_result_row().map(|stored| stored.id)
    }

    async fn fetch(&self, user_id: UserId, limit: u32) -> Result<Vec<ResultRow>, RemoteStoreError> {
        let response = self
            .client
            .get(self.config.scores_url())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(&history_query(user_id, limit))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteStoreError::HttpStatus(response.status()));
        }

        let rows: Vec<ScoreRow> = response.json().await?;
        rows.into_iter().map(ScoreRow::into_result_row).collect()
    }
}

#[async_trait]
impl ResultRepository for RemoteScoreStore {
    async fn append_result(&self, record: &ResultRecord) -> Result<ResultId, StorageError> {
        Ok(self.insert(record).await?)
    }

    async fn list_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError> {
        Ok(self.fetch(user_id, limit).await?)
    }
}

fn history_query(user_id: UserId, limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("user_id", format!("eq.{user_id}")),
        ("order", "created_at.desc".to_string()),
        ("limit", limit.to_string()),
    ]
}

#[derive(Debug, Serialize)]
struct NewScoreRow {
    user_id: String,
    language: String,
    score: u32,
    accuracy: u8,
    total_questions: u32,
    created_at: DateTime<Utc>,
}

impl NewScoreRow {
    fn from_record(record: &ResultRecord) -> Self {
        Self {
            user_id: record.user_id.to_string(),
            language: record.topic.key().to_string(),
            score: record.score,
            accuracy: record.accuracy,
            total_questions: record.total_questions,
            created_at: record.recorded_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    id: u64,
    user_id: String,
    language: String,
    score: u32,
    accuracy: u8,
    total_questions: u32,
    created_at: DateTime<Utc>,
}

impl ScoreRow {
    fn into_result_row(self) -> Result<ResultRow, RemoteStoreError> {
        let invalid = |e: &dyn std::fmt::Display| RemoteStoreError::InvalidRow(e.to_string());
        let user_id = self.user_id.parse::<UserId>().map_err(|e| invalid(&e))?;
        let topic = self.language.parse::<Topic>().map_err(|e| invalid(&e))?;
        if self.accuracy > 100 {
            return Err(RemoteStoreError::InvalidRow(format!(
                "accuracy out of range: {}",
                self.accuracy
            )));
        }
        Ok(ResultRow {
            id: ResultId::new(self.id),
            record: ResultRecord {
                user_id,
                topic,
                score: self.score,
                accuracy: self.accuracy,
                total_questions: self.total_questions,
                recorded_at: self.created_at,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decifra_core::model::Language;
    use decifra_core::time::fixed_now;

    #[test]
    fn scores_url_trims_trailing_slash() {
        let config = RemoteScoreConfig {
            base_url: "https://example.supabase.co/".into(),
            api_key: "k".into(),
        };
        assert_eq!(config.scores_url(), "https://example.supabase.co/rest/v1/scores");
    }

    #[test]
    fn history_query_orders_newest_first() {
        let user = UserId::random();
        let query = history_query(user, 20);
        assert!(query.contains(&("user_id", format!("eq.{user}"))));
        assert!(query.contains(&("order", "created_at.desc".to_string())));
        assert!(query.contains(&("limit", "20".to_string())));
    }

    #[test]
    fn insert_payload_uses_language_column() {
        let record = ResultRecord {
            user_id: UserId::random(),
            topic: Topic::Random,
            score: 300,
            accuracy: 75,
            total_questions: 4,
            recorded_at: fixed_now(),
        };
        let json = serde_json::to_value(NewScoreRow::from_record(&record)).unwrap();
        assert_eq!(json["language"], "random");
        assert_eq!(json["accuracy"], 75);
        assert_eq!(json["total_questions"], 4);
    }

    #[test]
    fn score_row_maps_into_result_row() {
        let user = UserId::random();
        let json = serde_json::json!({
            "id": 9,
            "user_id": user.to_string(),
            "language": "python",
            "score": 200,
            "accuracy": 40,
            "total_questions": 5,
            "created_at": "2023-11-14T22:13:20Z"
        });
        let row: ScoreRow = serde_json::from_value(json).unwrap();
        let mapped = row.into_result_row().unwrap();
        assert_eq!(mapped.id, ResultId::new(9));
        assert_eq!(mapped.record.user_id, user);
        assert_eq!(mapped.record.topic, Topic::Language(Language::Python));
        assert_eq!(mapped.record.recorded_at, fixed_now());
    }

    #[test]
    fn score_row_with_unknown_language_is_invalid() {
        let json = serde_json::json!({
            "id": 1,
            "user_id": UserId::random().to_string(),
            "language": "cobol",
            "score": 0,
            "accuracy": 0,
            "total_questions": 1,
            "created_at": "2023-11-14T22:13:20Z"
        });
        let row: ScoreRow = serde_json::from_value(json).unwrap();
        assert!(matches!(row.into_result_row(), Err(RemoteStoreError::InvalidRow(_))));
    }
}
