#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod profile_service;
pub mod quiz;
pub mod recorder;
pub mod remote_store;
pub mod shuffle;

pub use decifra_core::Clock;

pub use app_services::{AppServices, AppServicesConfig};
pub use error::{
    AppServicesError, ProfileServiceError, QuizError, RecorderError, RemoteStoreError,
};
pub use profile_service::{ProfileOverview, ProfileService};
pub use quiz::{
    QuizCompletion, QuizLoopService, QuizRun, QuizSession, QuizSnapshot, QuizState, Resolution,
    Settled,
};
pub use recorder::{RecordStatus, RecorderPolicy, ResultRecorder};
pub use remote_store::{RemoteScoreConfig, RemoteScoreStore};
pub use shuffle::Shuffler;
pub use storage::bank::QuestionBank;
