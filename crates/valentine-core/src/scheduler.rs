//! One-shot timer abstraction.
//!
//! State owners schedule timers through this port and keep the returned
//! [`TimerId`] next to the state the timer belongs to. When that state is
//! left, the owner cancels every id it still holds. Firings are delivered
//! back to the owner by the runtime together with their id, so an owner can
//! recognise and drop a firing it no longer expects.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle identifying a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Schedules one-shot timers carrying a payload of type `T`.
pub trait Scheduler<T>: Send {
    /// Schedules `payload` to be delivered once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerId;

    /// Cancels a pending timer. Cancelling an unknown or already fired
    /// timer is a no-op.
    fn cancel(&mut self, id: TimerId);
}
