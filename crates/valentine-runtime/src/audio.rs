//! Audio output for hosts without a sound device.

use tracing::{debug, info};
use valentine_core::audio::AudioOutput;
use valentine_core::error::DomainError;

/// Tracks the requested playback state and logs it instead of playing.
#[derive(Debug, Default)]
pub struct LoggingAudio {
    volume: f32,
    playing: bool,
}

impl LoggingAudio {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioOutput for LoggingAudio {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn play(&mut self) -> Result<(), DomainError> {
        if self.is_playing() {
            debug!("background music already playing");
            return Ok(());
        }
        self.playing = true;
        info!(volume = self.volume, "background music playing");
        Ok(())
    }

    fn pause(&mut self) {
        if !self.is_playing() {
            debug!("background music already paused");
            return;
        }
        self.playing = false;
        info!("background music paused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_and_pause_track_playback_state() {
        // Arrange
        let mut audio = LoggingAudio::default();
        audio.set_volume(0.55);

        // Act
        let played = audio.play();
        let replayed = audio.play();

        // Assert
        assert!(played.is_ok());
        assert!(replayed.is_ok());
        assert!(audio.is_playing());
        audio.pause();
        assert!(!audio.is_playing());
        audio.pause();
        assert!(!audio.is_playing());
    }
}
