use decifra_core::model::{ResultId, ResultRecord, UserId};

use super::{
    SqliteRepository,
    mapping::{map_result_row, result_id_from_i64, u32_to_i64},
};
use crate::repository::{ResultRepository, ResultRow, StorageError};

#[async_trait::async_trait]
impl ResultRepository for SqliteRepository {
    async fn append_result(&self, record: &ResultRecord) -> Result<ResultId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO scores (
                    user_id, language, score, accuracy, total_questions, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(record.user_id.to_string())
        .bind(record.topic.key())
        .bind(u32_to_i64(record.score))
        .bind(i64::from(record.accuracy))
        .bind(u32_to_i64(record.total_questions))
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        result_id_from_i64(res.last_insert_rowid())
    }

    async fn list_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<ResultRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, user_id, language, score, accuracy, total_questions, created_at
                FROM scores
                WHERE user_id = ?1
                ORDER BY created_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(u32_to_i64(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_result_row(&row)?);
        }
        Ok(out)
    }
}
