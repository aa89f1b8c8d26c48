use crate::config::Timing;
use crate::device::GamepadState;
use crate::error::{PadCycleError, Result};
use crate::pattern::PatternCursor;
use crate::platform::PadBackend;
use crate::session::Session;
use std::future::Future;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// How the loop stopped. There is no way back to running from either.
#[derive(Debug)]
pub enum LoopExit {
    Cancelled,
    Failed(PadCycleError),
}

#[derive(Debug, Clone, Default)]
pub struct LoopStats {
    pub face_ticks: u64,
    pub dpad_ticks: u64,
    /// Last report the bus accepted.
    pub last_report: Option<GamepadState>,
}

/// Everything the loop task hands back when it ends, including the session so
/// the caller controls when the pad is torn down.
pub struct LoopOutcome<B: PadBackend> {
    pub session: Session<B>,
    pub stats: LoopStats,
    pub exit: LoopExit,
}

/// Handle to the pattern loop running in a tokio task.
///
/// The task owns the [`Session`] while it runs, so nothing else can touch the
/// pad until the loop has stopped and returned it.
pub struct InputLoop<B: PadBackend> {
    shutdown_tx: oneshot::Sender<()>,
    task_handle: JoinHandle<LoopOutcome<B>>,
}

impl<B: PadBackend> InputLoop<B> {
    pub fn start(session: Session<B>, timing: Timing) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task_handle = tokio::spawn(run_until_shutdown(session, timing, shutdown_rx));
        Self {
            shutdown_tx,
            task_handle,
        }
    }

    /// Signal cancellation and wait for the task to hand the session back.
    pub async fn stop(self) -> Result<LoopOutcome<B>> {
        if self.shutdown_tx.send(()).is_err() {
            log::debug!("Input loop already finished before cancellation");
        }
        join(self.task_handle).await
    }

    /// Run until `shutdown` resolves or the loop exits on its own, whichever is
    /// first, then make sure the task has stopped.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<LoopOutcome<B>>
    where
        F: Future<Output = ()>,
    {
        let finished = tokio::select! {
            _ = shutdown => None,
            joined = &mut self.task_handle => Some(joined),
        };

        match finished {
            None => self.stop().await,
            Some(joined) => {
                log::warn!("Input loop exited before shutdown was requested");
                joined.map_err(join_error)
            }
        }
    }
}

async fn join<B: PadBackend>(handle: JoinHandle<LoopOutcome<B>>) -> Result<LoopOutcome<B>> {
    handle.await.map_err(join_error)
}

fn join_error(e: tokio::task::JoinError) -> PadCycleError {
    PadCycleError::Forwarding(format!("Input loop task failed: {}", e))
}

/// The loop body: one event per wake, strictly serialized.
async fn run_until_shutdown<B: PadBackend>(
    mut session: Session<B>,
    timing: Timing,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> LoopOutcome<B> {
    log::info!(
        "Input loop started (face every {:?}, d-pad every {:?})",
        timing.face,
        timing.dpad
    );

    let start = Instant::now();
    let mut face_timer = interval_at(start + timing.face, timing.face);
    face_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut dpad_timer = interval_at(start + timing.dpad, timing.dpad);
    dpad_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut face = PatternCursor::face();
    let mut dpad = PatternCursor::dpad();
    let mut state = GamepadState::default();
    let mut stats = LoopStats::default();

    let exit = loop {
        tokio::select! {
            biased;

            _ = &mut shutdown_rx => break LoopExit::Cancelled,

            _ = face_timer.tick() => {
                state.toggle_face(face.advance());
                if let Err(e) = session.update(&state) {
                    log::error!("Failed to update virtual controller: {}", e);
                    break LoopExit::Failed(e);
                }
                stats.face_ticks += 1;
                stats.last_report = Some(state);
                log::debug!("face tick {}: buttons={:#06x}", face.count(), state.buttons);
            }

            _ = dpad_timer.tick() => {
                state.set_dpad(dpad.advance());
                if let Err(e) = session.update(&state) {
                    log::error!("Failed to update virtual controller: {}", e);
                    break LoopExit::Failed(e);
                }
                stats.dpad_ticks += 1;
                stats.last_report = Some(state);
                log::debug!("d-pad tick {}: buttons={:#06x}", dpad.count(), state.buttons);
            }
        }
    };

    log::info!(
        "Input loop stopped after {} face and {} d-pad ticks",
        stats.face_ticks,
        stats.dpad_ticks
    );

    LoopOutcome {
        session,
        stats,
        exit,
    }
}
