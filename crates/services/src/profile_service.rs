use std::sync::Arc;

use decifra_core::model::{MainLanguage, Profile, ProfileStats, ResultRecord, UserId};
use storage::repository::{ProfileRepository, ResultRepository, ResultRow};

use crate::Clock;
use crate::error::ProfileServiceError;

/// Everything the profile page shows for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOverview {
    pub user_id: UserId,
    pub profile: Option<Profile>,
    /// Newest first.
    pub results: Vec<ResultRow>,
    pub stats: ProfileStats,
}

impl ProfileOverview {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map_or(Profile::DEFAULT_DISPLAY_NAME, Profile::display_name)
    }

    #[must_use]
    pub fn main_language(&self) -> MainLanguage {
        self.profile
            .as_ref()
            .map(Profile::main_language)
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
    results: Arc<dyn ResultRepository>,
    history_limit: u32,
}

impl ProfileService {
    pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

    #[must_use]
    pub fn new(
        clock: Clock,
        profiles: Arc<dyn ProfileRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            clock,
            profiles,
            results,
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// Load the profile, recent results and aggregate stats.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` on repository failures.
    pub async fn overview(&self, user_id: UserId) -> Result<ProfileOverview, ProfileServiceError> {
        let profile = self.profiles.get_profile(user_id).await?;
        let results = self.results.list_results(user_id, self.history_limit).await?;
        let records: Vec<ResultRecord> = results.iter().map(|row| row.record.clone()).collect();
        let stats = ProfileStats::from_records(&records);
        Ok(ProfileOverview {
            user_id,
            profile,
            results,
            stats,
        })
    }

    /// Create or update the profile, keeping the original creation time.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Profile` for an invalid name, or a storage error.
    pub async fn save_profile(
        &self,
        user_id: UserId,
        display_name: &str,
        main_language: MainLanguage,
    ) -> Result<Profile, ProfileServiceError> {
        let created_at = match self.profiles.get_profile(user_id).await? {
            Some(existing) => existing.created_at(),
            None => self.clock.now(),
        };
        let profile = Profile::new(user_id, display_name, main_language, created_at)?;
        self.profiles.upsert_profile(&profile).await?;
        Ok(profile)
    }
}
