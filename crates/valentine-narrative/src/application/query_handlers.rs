//! Query handlers for the interaction state machine.
//!
//! Builds the immutable snapshot the renderer draws after every input.

use serde::Serialize;
use uuid::Uuid;
use valentine_core::clock::Clock;

use crate::domain::aggregates::StorySession;
use crate::domain::evasion::{self, EvasionState};
use crate::domain::quiz::QuizError;
use crate::domain::step::{STORY_PAGES, Step};

/// Read-only view of the quiz screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizView {
    pub current_question_index: usize,
    pub question_count: usize,
    /// Prompt of the current question, `None` when no quiz is configured.
    pub prompt: Option<String>,
    pub pending_input: String,
    pub error: Option<QuizError>,
    /// User-facing text for `error`.
    pub error_message: Option<String>,
}

/// Read-only snapshot of a session, rendered after every transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    pub step: Step,
    /// Story page position (1-based) while on a story page.
    pub intro_index: Option<u8>,
    pub intro_total: u8,
    pub display_name: String,
    pub days_together: u32,
    pub evasion: EvasionState,
    pub decline_label: String,
    pub affirm_scale: f64,
    /// Transient notice text while it is showing.
    pub toast: Option<String>,
    pub quiz: QuizView,
    /// How many success blocks are visible, 0 through 4.
    pub reveal_stage: u8,
    pub music_on: bool,
    pub capture_mode: bool,
    pub show_footer: bool,
    pub gift_open: bool,
    /// Current version (committed event count).
    pub version: i64,
}

/// Builds the render snapshot for `session`.
#[must_use]
pub fn get_session_view(session: &StorySession, clock: &dyn Clock) -> SessionView {
    let config = &session.config;
    let quiz = &session.quiz;
    let attempt_count = session.evasion.attempt_count;

    SessionView {
        session_id: session.id,
        step: session.step,
        intro_index: session.step.intro_index(),
        intro_total: STORY_PAGES,
        display_name: config.display_name.clone(),
        days_together: config.days_together(clock.today()),
        evasion: session.evasion,
        decline_label: evasion::label_for(attempt_count).to_owned(),
        affirm_scale: evasion::affirm_scale(attempt_count),
        toast: session
            .toast_visible
            .then(|| config.messages.toast.clone()),
        quiz: QuizView {
            current_question_index: quiz.current_question_index,
            question_count: config.questions.len(),
            prompt: config
                .questions
                .get(quiz.current_question_index)
                .map(|q| q.prompt.clone()),
            pending_input: quiz.pending_input.clone(),
            error: quiz.last_error,
            error_message: quiz
                .last_error
                .map(|error| config.messages.for_error(error).to_owned()),
        },
        reveal_stage: session.reveal.stage(),
        music_on: session.music_on,
        capture_mode: session.capture_mode,
        show_footer: !session.capture_mode,
        gift_open: session.gift_open,
        version: session.version,
    }
}
