use std::fmt;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::AbortHandle;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, info};

use decifra_core::model::QuizOutcome;

use super::session::{QuizSession, QuizSnapshot, QuizState, Settled};

/// Handle to a running quiz.
///
/// The driver task owns the session; this handle forwards answers and observes
/// snapshots. Dropping it stops the driver.
pub struct QuizRun {
    answers: mpsc::UnboundedSender<usize>,
    snapshots: watch::Receiver<QuizSnapshot>,
    driver: AbortHandle,
}

/// Resolves with the terminal result once the completion delay has elapsed.
pub struct QuizCompletion {
    outcome: oneshot::Receiver<QuizOutcome>,
}

impl QuizCompletion {
    /// `None` when the run was cancelled or replaced before completing.
    pub async fn wait(self) -> Option<QuizOutcome> {
        self.outcome.await.ok()
    }
}

impl fmt::Debug for QuizCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizCompletion").finish_non_exhaustive()
    }
}

impl QuizRun {
    /// Spawns the driver for `session` on the current tokio runtime.
    #[must_use]
    pub fn spawn(session: QuizSession) -> (Self, QuizCompletion) {
        let (answers_tx, answers_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(session.snapshot());
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let handle = tokio::spawn(drive(session, answers_rx, snapshots_tx, outcome_tx));

        (
            Self {
                answers: answers_tx,
                snapshots: snapshots_rx,
                driver: handle.abort_handle(),
            },
            QuizCompletion {
                outcome: outcome_rx,
            },
        )
    }

    /// Forwards the selected option. Ignored if the question is already resolved.
    pub fn submit_answer(&self, index: usize) {
        if self.answers.send(index).is_err() {
            debug!(index, "answer sent to a finished quiz");
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.snapshots.clone()
    }

    pub(crate) fn abort_handle(&self) -> AbortHandle {
        self.driver.clone()
    }

    /// Stops the driver. No further snapshots or outcome are produced.
    pub fn cancel(&self) {
        self.driver.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }
}

impl Drop for QuizRun {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

impl fmt::Debug for QuizRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRun")
            .field("snapshot", &*self.snapshots.borrow())
            .field("finished", &self.driver.is_finished())
            .finish()
    }
}

//
// ─── DRIVER ────────────────────────────────────────────────────────────────────
//

async fn drive(
    mut session: QuizSession,
    mut answers: mpsc::UnboundedReceiver<usize>,
    snapshots: watch::Sender<QuizSnapshot>,
    outcome: oneshot::Sender<QuizOutcome>,
) {
    let config = *session.config();
    let mut next_tick = Instant::now() + config.tick_interval();

    loop {
        match session.state() {
            QuizState::Complete => {
                sleep(config.completion_delay()).await;
                if let Some(result) = session.take_outcome() {
                    info!(
                        topic = %result.topic,
                        score = result.score,
                        total = result.total_questions,
                        "quiz result ready"
                    );
                    if outcome.send(result).is_err() {
                        debug!("quiz result dropped: nobody waiting");
                    }
                }
                return;
            }
            QuizState::Active if session.is_locked() => {
                let settle = sleep(config.settle_delay());
                tokio::pin!(settle);
                loop {
                    tokio::select! {
                        () = &mut settle => break,
                        answer = answers.recv() => match answer {
                            Some(index) => {
                                session.submit_answer(index);
                            }
                            None => return,
                        },
                    }
                }
                if let Some(Settled::Advanced { .. }) = session.settle() {
                    next_tick = Instant::now() + config.tick_interval();
                }
                snapshots.send_replace(session.snapshot());
            }
            QuizState::Active => {
                tokio::select! {
                    () = sleep_until(next_tick) => {
                        next_tick += config.tick_interval();
                        session.tick();
                        debug!(remaining = session.time_remaining(), "tick");
                        snapshots.send_replace(session.snapshot());
                    }
                    answer = answers.recv() => match answer {
                        Some(index) => {
                            session.submit_answer(index);
                            snapshots.send_replace(session.snapshot());
                        }
                        None => return,
                    },
                }
            }
        }
    }
}
