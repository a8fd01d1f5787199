//! Test audio outputs: mock `AudioOutput` implementations for tests.

use valentine_core::audio::AudioOutput;
use valentine_core::error::DomainError;

/// An audio output that records every call and always starts playing.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Volumes passed to `set_volume`, in call order.
    pub volumes: Vec<f32>,
    /// Number of `play` calls.
    pub plays: usize,
    /// Number of `pause` calls.
    pub pauses: usize,
}

impl AudioOutput for RecordingAudio {
    fn set_volume(&mut self, volume: f32) {
        self.volumes.push(volume);
    }

    fn play(&mut self) -> Result<(), DomainError> {
        self.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}

/// An audio output whose `play` always fails, like a player blocked by an
/// autoplay policy.
#[derive(Debug, Default)]
pub struct FailingAudio;

impl AudioOutput for FailingAudio {
    fn set_volume(&mut self, _volume: f32) {}

    fn play(&mut self) -> Result<(), DomainError> {
        Err(DomainError::Collaborator("playback blocked".into()))
    }

    fn pause(&mut self) {}
}
