//! Shared test doubles for the Valentine interaction engine.

mod audio;
mod clock;
mod rng;
mod scheduler;

pub use audio::{FailingAudio, RecordingAudio};
pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use scheduler::ManualScheduler;
