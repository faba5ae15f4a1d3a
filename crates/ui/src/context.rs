use std::sync::{Arc, Mutex, PoisonError};

use decifra_core::model::{Identity, QuizOutcome};
use services::{AppServices, ProfileService, QuizLoopService, ResultRecorder};

pub trait UiApp: Send + Sync {
    fn identity(&self) -> Identity;

    fn quiz(&self) -> Arc<QuizLoopService>;
    fn recorder(&self) -> Arc<ResultRecorder>;
    fn profiles(&self) -> Arc<ProfileService>;
}

impl UiApp for AppServices {
    fn identity(&self) -> Identity {
        AppServices::identity(self)
    }

    fn quiz(&self) -> Arc<QuizLoopService> {
        AppServices::quiz(self)
    }

    fn recorder(&self) -> Arc<ResultRecorder> {
        AppServices::recorder(self)
    }

    fn profiles(&self) -> Arc<ProfileService> {
        AppServices::profiles(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    identity: Identity,
    quiz: Arc<QuizLoopService>,
    recorder: Arc<ResultRecorder>,
    profiles: Arc<ProfileService>,
    // Handed from the quiz screen to the results screen, taken once.
    pending_outcome: Arc<Mutex<Option<QuizOutcome>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            identity: app.identity(),
            quiz: app.quiz(),
            recorder: app.recorder(),
            profiles: app.profiles(),
            pending_outcome: Arc::new(Mutex::new(None)),
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

    /// Park a finished quiz's result for the results screen to record.
    pub fn stash_outcome(&self, outcome: QuizOutcome) {
        let mut slot = self
            .pending_outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(outcome);
    }

    /// The parked result, at most once.
    #[must_use]
    pub fn take_pending_outcome(&self) -> Option<QuizOutcome> {
        self.pending_outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
