//! Valentine Core: shared collaborator ports.
//!
//! This crate defines the traits and types the interaction core depends on
//! to reach the outside world: time, randomness, timers and audio. It
//! contains no runtime code.

pub mod aggregate;
pub mod audio;
pub mod clock;
pub mod error;
pub mod event;
pub mod rng;
pub mod scheduler;
