mod runner;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use runner::{QuizCompletion, QuizRun};
pub use session::{QuizSession, QuizSnapshot, QuizState, Resolution, Settled};
pub use workflow::QuizLoopService;
