//! Domain events for the interaction state machine.

use serde::{Deserialize, Serialize};
use valentine_core::event::{DomainEvent, EventMetadata};

use super::evasion::{ArenaBounds, Position};
use super::hearts::Heart;
use super::quiz::QuizError;
use super::step::Step;

/// Emitted on every change of the active step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepChanged {
    pub from: Step,
    pub to: Step,
}

/// Emitted when an attempt moves the evasive control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlEvaded {
    pub position: Position,
    pub attempt_count: u32,
}

/// Emitted when the control gets its initial spot in an episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPlaced {
    pub position: Position,
}

/// Emitted when the attempt count reached the escape threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdEscaped {
    pub attempt_count: u32,
    pub to: Step,
}

/// Emitted when a quiz answer was accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAccepted {
    pub question_index: usize,
    /// Index of the next question, `None` when the quiz is complete.
    pub next_question_index: Option<usize>,
}

/// Emitted when a quiz answer was rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRejected {
    pub question_index: usize,
    pub reason: QuizError,
}

/// Event payload variants for the interaction state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NarrativeEventKind {
    StepChanged(StepChanged),
    ControlEvaded(ControlEvaded),
    ControlPlaced(ControlPlaced),
    ToastShown,
    ToastHidden,
    ThresholdEscaped(ThresholdEscaped),
    QuizInputChanged { length: usize },
    AnswerAccepted(AnswerAccepted),
    AnswerRejected(AnswerRejected),
    QuizSkipped { question_index: usize },
    RevealAdvanced { stage: u8 },
    HeartSpawned(Heart),
    MusicToggled { playing: bool },
    CaptureModeToggled { enabled: bool },
    GiftToggled { open: bool },
    ArenaChanged { bounds: Option<ArenaBounds> },
}

/// Domain event envelope for the interaction state machine.
#[derive(Debug, Clone)]
pub struct NarrativeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NarrativeEventKind,
}

impl NarrativeEventKind {
    /// Routing name of the payload variant.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::StepChanged(_) => "narrative.step_changed",
            Self::ControlEvaded(_) => "narrative.control_evaded",
            Self::ControlPlaced(_) => "narrative.control_placed",
            Self::ToastShown => "narrative.toast_shown",
            Self::ToastHidden => "narrative.toast_hidden",
            Self::ThresholdEscaped(_) => "narrative.threshold_escaped",
            Self::QuizInputChanged { .. } => "narrative.quiz_input_changed",
            Self::AnswerAccepted(_) => "narrative.answer_accepted",
            Self::AnswerRejected(_) => "narrative.answer_rejected",
            Self::QuizSkipped { .. } => "narrative.quiz_skipped",
            Self::RevealAdvanced { .. } => "narrative.reveal_advanced",
            Self::HeartSpawned(_) => "narrative.heart_spawned",
            Self::MusicToggled { .. } => "narrative.music_toggled",
            Self::CaptureModeToggled { .. } => "narrative.capture_mode_toggled",
            Self::GiftToggled { .. } => "narrative.gift_toggled",
            Self::ArenaChanged { .. } => "narrative.arena_changed",
        }
    }
}

impl DomainEvent for NarrativeEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Derived Serialize with string keys cannot fail; fall back to null anyway.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
