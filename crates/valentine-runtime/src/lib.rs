//! Valentine runtime: drives the interaction core on a single-threaded
//! event loop.
//!
//! User actions and timer firings share one channel, so they are handled
//! strictly in arrival order and each is applied to completion before the
//! next one is looked at.

pub mod audio;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod render;
pub mod scheduler;
