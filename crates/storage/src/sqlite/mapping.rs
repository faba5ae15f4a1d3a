use decifra_core::model::{MainLanguage, Profile, ResultId, ResultRecord, Topic, UserId};
use sqlx::Row;

use crate::repository::{ResultRow, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u32_to_i64(v: u32) -> i64 {
    i64::from(v)
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn result_id_from_i64(v: i64) -> Result<ResultId, StorageError> {
    u64::try_from(v)
        .map(ResultId::new)
        .map_err(|_| StorageError::Serialization("result id sign overflow".into()))
}

pub(crate) fn user_id_from_str(s: &str) -> Result<UserId, StorageError> {
    s.parse::<UserId>().map_err(ser)
}

pub(crate) fn parse_topic(s: &str) -> Result<Topic, StorageError> {
    s.parse::<Topic>().map_err(ser)
}

pub(crate) fn parse_main_language(s: &str) -> Result<MainLanguage, StorageError> {
    s.parse::<MainLanguage>().map_err(ser)
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<ResultRow, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let language: String = row.try_get("language").map_err(ser)?;
    let accuracy: i64 = row.try_get("accuracy").map_err(ser)?;
    let accuracy = u8::try_from(accuracy)
        .ok()
        .filter(|a| *a <= 100)
        .ok_or_else(|| StorageError::Serialization(format!("invalid accuracy: {accuracy}")))?;

    Ok(ResultRow {
        id: result_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        record: ResultRecord {
            user_id: user_id_from_str(&user_id)?,
            topic: parse_topic(&language)?,
            score: u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?,
            accuracy,
            total_questions: u32_from_i64(
                "total_questions",
                row.try_get::<i64, _>("total_questions").map_err(ser)?,
            )?,
            recorded_at: row.try_get("created_at").map_err(ser)?,
        },
    })
}

pub(crate) fn map_profile_row(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let display_name: String = row.try_get("display_name").map_err(ser)?;
    let main_language: String = row.try_get("main_language").map_err(ser)?;

    Profile::new(
        user_id_from_str(&user_id)?,
        display_name,
        parse_main_language(&main_language)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}
