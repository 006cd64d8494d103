//! Timer-driven reveal controller
//!
//! Each source text gets one tokio task that sleeps, ticks the
//! [`RevealState`], and publishes the result. Ticks never overlap: the next
//! sleep starts only after the previous tick's events are sent. The task is
//! the only timer a reveal holds and it is released on completion, on cancel,
//! on source replacement, and when the controller is dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::cancellation::RevealCancellation;
use super::events::{RevealEvent, RevealEventKind, RevealFrame, RevealId};
use super::pacing::RevealPacing;
use super::state::{RevealSnapshot, RevealState};
use crate::format::FormatterOptions;

/// Drives the reveal of one message at a time
pub struct RevealController {
    id: RevealId,
    pacing: RevealPacing,
    options: Arc<FormatterOptions>,
    events: mpsc::UnboundedSender<RevealEvent>,
    generation: u64,
    cancellation: RevealCancellation,
    snapshot: watch::Receiver<RevealSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl RevealController {
    pub fn new(
        id: RevealId,
        pacing: RevealPacing,
        options: Arc<FormatterOptions>,
        events: mpsc::UnboundedSender<RevealEvent>,
    ) -> Self {
        let (_, snapshot) = watch::channel(RevealSnapshot::default());
        Self {
            id,
            pacing,
            options,
            events,
            generation: 0,
            cancellation: RevealCancellation::new(),
            snapshot,
            task: None,
        }
    }

    pub fn id(&self) -> RevealId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start revealing `text`, silently discarding any reveal in progress
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.stop_task();
        self.generation += 1;
        self.cancellation.reset();

        let state = RevealState::new(text);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        self.snapshot = snapshot_rx;

        let task = RevealTask {
            reveal: self.id,
            generation: self.generation,
            pacing: self.pacing,
            options: Arc::clone(&self.options),
            events: self.events.clone(),
            snapshot: snapshot_tx,
            cancellation: self.cancellation.clone(),
        };
        self.task = Some(tokio::spawn(task.run(state)));
    }

    /// Stop at the last revealed character
    ///
    /// Safe at any time; a no-op once complete or already cancelled.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn snapshot(&self) -> RevealSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn is_typing(&self) -> bool {
        !self.cancellation.is_cancelled() && self.snapshot.borrow().is_typing()
    }

    /// Wait until the current reveal completes or is cancelled
    ///
    /// The handle is kept until the task ends, so dropping this future early
    /// leaves the task abortable.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            let _ = task.await;
            self.task = None;
        }
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RevealController {
    fn drop(&mut self) {
        self.stop_task();
    }
}

/// Everything the reveal task owns
struct RevealTask {
    reveal: RevealId,
    generation: u64,
    pacing: RevealPacing,
    options: Arc<FormatterOptions>,
    events: mpsc::UnboundedSender<RevealEvent>,
    snapshot: watch::Sender<RevealSnapshot>,
    cancellation: RevealCancellation,
}

impl RevealTask {
    async fn run(self, mut state: RevealState) {
        debug!(
            reveal = self.reveal,
            generation = self.generation,
            total = state.total_len(),
            "Reveal started"
        );
        self.emit(RevealEventKind::TypingStatus(state.is_typing()));

        while !state.phase().is_terminal() {
            let delay = self.pacing.delay_for(state.revealed_len());
            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => {
                    state.cancel();
                    self.snapshot.send_replace(state.snapshot());
                    let revealed = state.revealed_len();
                    info!(reveal = self.reveal, revealed, "Reveal cancelled");
                    self.emit(RevealEventKind::TypingStatus(false));
                    self.emit(RevealEventKind::Cancelled { revealed });
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            let Some(tick) = state.tick() else {
                break;
            };
            self.snapshot.send_replace(state.snapshot());
            let revealed = state.revealed_len();
            self.emit(RevealEventKind::Frame(RevealFrame {
                revealed,
                total: state.total_len(),
                segments: state.segments().to_vec(),
                options: Arc::clone(&self.options),
            }));
            if tick.checkpoint {
                self.emit(RevealEventKind::Checkpoint { revealed });
            }
            self.emit(RevealEventKind::TypingStatus(state.is_typing()));
        }

        self.snapshot.send_replace(state.snapshot());
        debug!(reveal = self.reveal, total = state.total_len(), "Reveal complete");
        self.emit(RevealEventKind::Complete);
    }

    fn emit(&self, kind: RevealEventKind) {
        // Host may have gone away; the reveal still runs to its end
        let _ = self.events.send(RevealEvent {
            reveal: self.reveal,
            generation: self.generation,
            kind,
        });
    }
}
