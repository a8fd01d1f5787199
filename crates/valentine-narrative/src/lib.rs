//! Valentine: interaction state machine.
//!
//! Responsible for the ordered progression of screens (story, confirmation,
//! quiz, success), the evasive confirmation control and its thresholds, quiz
//! validation, and the timed reveal of the success content.

pub mod application;
pub mod domain;
