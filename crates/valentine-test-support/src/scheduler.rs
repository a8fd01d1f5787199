//! Manual scheduler: a virtual-time `Scheduler` for tests.

use std::time::Duration;

use valentine_core::scheduler::{Scheduler, TimerId};

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    due: Duration,
    payload: T,
}

/// A scheduler driven by an explicit virtual clock.
///
/// Nothing fires on its own: tests call [`ManualScheduler::advance`] and feed
/// the returned firings back into the code under test, in order.
#[derive(Debug)]
pub struct ManualScheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<T>>,
    cancelled: Vec<TimerId>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            pending: Vec::new(),
            cancelled: Vec::new(),
        }
    }
}

impl<T> ManualScheduler<T> {
    /// Creates a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Ids cancelled so far, in call order.
    #[must_use]
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Offsets (from now) of the pending timers, earliest first.
    #[must_use]
    pub fn pending_offsets(&self) -> Vec<Duration> {
        let mut offsets: Vec<Duration> = self
            .pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .collect();
        offsets.sort();
        offsets
    }

    /// Advances virtual time by `by` and returns every timer that came due,
    /// ordered by due time and then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, T)> {
        self.now += by;
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.id));
        due.into_iter().map(|p| (p.id, p.payload)).collect()
    }

    /// Jumps virtual time to the earliest pending timer and returns it along
    /// with its due time. Returns `None` when nothing is pending.
    pub fn fire_next(&mut self) -> Option<(Duration, TimerId, T)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(index, _)| index)?;
        let next = self.pending.remove(index);
        self.now = self.now.max(next.due);
        Some((next.due, next.id, next.payload))
    }
}

impl<T: Send> Scheduler<T> for ManualScheduler<T> {
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            payload,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.cancelled.push(id);
        self.pending.retain(|p| p.id != id);
    }
}
