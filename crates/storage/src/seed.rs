use chrono::{DateTime, Duration, Utc};
use decifra_core::model::{
    Language, MainLanguage, Profile, ProfileError, QuizOutcome, ResultRecord, Topic, UserId,
};
use decifra_core::QuizConfig;
use thiserror::Error;

use crate::repository::{Storage, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What to write into a fresh or existing database.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    /// Existing user to update; a new id is generated when absent.
    pub user_id: Option<UserId>,
    pub display_name: String,
    pub main_language: MainLanguage,
    /// Number of sample results to append.
    pub results: u32,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub user_id: UserId,
    pub results: u32,
}

const SAMPLE_TOPICS: [Topic; 5] = [
    Topic::Language(Language::Java),
    Topic::Language(Language::Python),
    Topic::Language(Language::Sql),
    Topic::Language(Language::JavaScript),
    Topic::Random,
];

/// Upserts a profile and appends sample results, one day apart, oldest last.
///
/// The profile keeps its original `created_at` when it already exists.
///
/// # Errors
///
/// Returns `SeedError` if the profile is invalid or a write fails.
pub async fn seed_sample_data(storage: &Storage, plan: &SeedPlan) -> Result<SeedReport, SeedError> {
    let user_id = plan.user_id.unwrap_or_else(UserId::random);
    let created_at = match storage.profiles.get_profile(user_id).await? {
        Some(existing) => existing.created_at(),
        None => plan.now,
    };
    let profile = Profile::new(
        user_id,
        plan.display_name.clone(),
        plan.main_language,
        created_at,
    )?;
    storage.profiles.upsert_profile(&profile).await?;

    for i in 0..plan.results {
        let topic = SAMPLE_TOPICS[(i as usize) % SAMPLE_TOPICS.len()];
        let total = 5;
        let correct = (i * 3 + 2) % (total + 1);
        let reward = QuizConfig::DEFAULT_REWARD;
        let outcome = QuizOutcome::from_score(topic, correct * reward, total, reward);
        let recorded_at = plan.now - Duration::days(i64::from(i)) - Duration::minutes(10);
        let record = ResultRecord::from_outcome(user_id, &outcome, recorded_at);
        storage.results.append_result(&record).await?;
    }

    Ok(SeedReport {
        user_id,
        results: plan.results,
    })
}
