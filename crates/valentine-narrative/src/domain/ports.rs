//! Collaborators the session reaches through while handling an input.

use serde::{Deserialize, Serialize};
use valentine_core::audio::AudioOutput;
use valentine_core::clock::Clock;
use valentine_core::rng::DeterministicRng;
use valentine_core::scheduler::Scheduler;

/// Payload of every timer the session schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryTimer {
    /// Initial placement of the evasive control after entering `Confirm`.
    PlaceControl,
    /// Auto-hide of the transient notice.
    HideToast,
    /// Reveal of the given stage in `Success`.
    Reveal(u8),
    /// Next tick of the floating-hearts emitter.
    Heart,
}

/// Borrowed collaborators for one input.
pub struct Ports<'a> {
    pub clock: &'a dyn Clock,
    pub rng: &'a mut dyn DeterministicRng,
    pub scheduler: &'a mut dyn Scheduler<StoryTimer>,
    pub audio: &'a mut dyn AudioOutput,
}

impl std::fmt::Debug for Ports<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ports").finish_non_exhaustive()
    }
}
