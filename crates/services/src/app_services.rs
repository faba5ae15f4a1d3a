use std::sync::Arc;

use tracing::info;

use decifra_core::QuizConfig;
use decifra_core::model::Identity;
use storage::bank::{QuestionBank, StaticQuestionBank};
use storage::repository::{ResultRepository, Storage};

use crate::Clock;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::quiz::QuizLoopService;
use crate::recorder::{RecorderPolicy, ResultRecorder};
use crate::remote_store::{RemoteScoreConfig, RemoteScoreStore};
use crate::shuffle::Shuffler;

/// Inputs for assembling `AppServices`.
#[derive(Debug, Clone, Default)]
pub struct AppServicesConfig {
    pub clock: Clock,
    pub identity: Identity,
    pub quiz: QuizConfig,
    pub shuffler: Shuffler,
    pub recorder: RecorderPolicy,
    /// When set, results go to the hosted store instead of local storage.
    pub remote: Option<RemoteScoreConfig>,
}

/// Assembles app-facing services around one storage backend and the question bank.
#[derive(Clone)]
pub struct AppServices {
    identity: Identity,
    quiz: Arc<QuizLoopService>,
    recorder: Arc<ResultRecorder>,
    profiles: Arc<ProfileService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the built-in question bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or bank loading fails.
    pub async fn new_sqlite(db_url: &str, config: AppServicesConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let bank: Arc<dyn QuestionBank> = Arc::new(StaticQuestionBank::builtin()?);
        Ok(Self::from_parts(storage, bank, config))
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the built-in questions cannot be loaded.
    pub fn in_memory(config: AppServicesConfig) -> Result<Self, AppServicesError> {
        let bank: Arc<dyn QuestionBank> = Arc::new(StaticQuestionBank::builtin()?);
        Ok(Self::from_parts(Storage::in_memory(), bank, config))
    }

    #[must_use]
    pub fn from_parts(storage: Storage, bank: Arc<dyn QuestionBank>, config: AppServicesConfig) -> Self {
        let results: Arc<dyn ResultRepository> = match config.remote {
            Some(remote) => {
                info!(url = %remote.base_url, "recording results to remote score store");
                Arc::new(RemoteScoreStore::new(remote))
            }
            None => Arc::clone(&storage.results),
        };

        let quiz = Arc::new(
            QuizLoopService::new(config.clock, bank)
                .with_config(config.quiz)
                .with_shuffler(config.shuffler),
        );
        let recorder = Arc::new(
            ResultRecorder::new(config.clock, Arc::clone(&results)).with_policy(config.recorder),
        );
        let profiles = Arc::new(ProfileService::new(
            config.clock,
            Arc::clone(&storage.profiles),
            results,
        ));

        Self {
            identity: config.identity,
            quiz,
            recorder,
            profiles,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn recorder(&self) -> Arc<ResultRecorder> {
        Arc::clone(&self.recorder)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decifra_core::model::{Language, QuizOutcome, Topic, UserId};
    use decifra_core::time::fixed_clock;

    #[tokio::test]
    async fn recorded_results_show_up_in_profile_overview() {
        let user = UserId::random();
        let services = AppServices::in_memory(AppServicesConfig {
            clock: fixed_clock(),
            identity: Identity::User(user),
            ..AppServicesConfig::default()
        })
        .unwrap();

        let outcome = QuizOutcome::from_score(Topic::Language(Language::Java), 300, 5, 100);
        services
            .recorder()
            .record(&services.identity(), &outcome)
            .await
            .unwrap();

        let overview = services.profiles().overview(user).await.unwrap();
        assert_eq!(overview.results.len(), 1);
        assert_eq!(overview.stats.best_score, 300);
        assert_eq!(overview.stats.average_accuracy, 60);
    }

    #[test]
    fn default_config_is_anonymous() {
        let services = AppServices::in_memory(AppServicesConfig::default()).unwrap();
        assert!(services.identity().is_anonymous());
        assert_eq!(services.quiz().config(), &QuizConfig::default());
    }
}
