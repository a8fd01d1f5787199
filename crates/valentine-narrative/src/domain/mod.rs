//! Domain model for the interaction state machine.

pub mod aggregates;
pub mod commands;
pub mod config;
pub mod events;
pub mod evasion;
pub mod hearts;
pub mod ports;
pub mod quiz;
pub mod reveal;
pub mod step;
