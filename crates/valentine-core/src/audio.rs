//! Background audio port.

use crate::error::DomainError;

/// Toggle-only boundary to a background audio player.
pub trait AudioOutput: Send {
    /// Sets the playback volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Collaborator` if the player refused to start.
    fn play(&mut self) -> Result<(), DomainError>;

    /// Pauses playback.
    fn pause(&mut self);
}
