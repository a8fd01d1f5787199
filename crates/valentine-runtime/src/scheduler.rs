//! Tokio-backed timer scheduler.
//!
//! Each timer is a spawned task racing its delay against a cancellation
//! token. On expiry it posts the firing to the event loop's input channel,
//! where it queues behind any input that arrived first.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::trace;
use valentine_core::scheduler::{Scheduler, TimerId};
use valentine_narrative::domain::ports::StoryTimer;

use crate::event_loop::Input;

/// Schedules story timers on the current tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: UnboundedSender<Input>,
    next_id: u64,
    tokens: HashMap<TimerId, CancellationToken>,
}

impl TokioScheduler {
    /// Creates a scheduler that delivers firings to `tx`.
    #[must_use]
    pub fn new(tx: UnboundedSender<Input>) -> Self {
        Self {
            tx,
            next_id: 1,
            tokens: HashMap::new(),
        }
    }

    /// Forgets a timer whose firing has been received.
    pub fn complete(&mut self, id: TimerId) {
        self.tokens.remove(&id);
    }

    /// Number of timers neither fired nor cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tokens.len()
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        for (_, token) in self.tokens.drain() {
            token.cancel();
        }
    }
}

impl Scheduler<StoryTimer> for TokioScheduler {
    fn schedule(&mut self, delay: Duration, payload: StoryTimer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancelled.cancelled() => {
                    trace!(%id, "timer cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    // The loop may already be gone during shutdown.
                    let _ = tx.send(Input::Timer(id, payload));
                }
            }
        });

        self.tokens.insert(id, token);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(token) = self.tokens.remove(&id) {
            token.cancel();
        }
    }
}
