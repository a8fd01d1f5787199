//! Actions sent by the renderer.

use serde::{Deserialize, Serialize};

use super::evasion::ArenaBounds;

/// A discrete user or layout action. Actions that make no sense for the
/// current step are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// Jump from any story page straight to `Confirm`.
    SkipIntro,
    /// Move to the next story page, or to `Confirm` from the last one.
    NextIntro,
    /// Press the affirmative control.
    Affirm,
    /// Try to reach the evasive control.
    EvadeAttempt,
    /// The quiz answer box changed.
    QuizInputChanged(String),
    QuizSubmit,
    /// Bypass the quiz without answering.
    QuizSkip,
    /// Go back from `Success` to `Confirm` for a fresh episode.
    RepeatEpisode,
    /// The renderer laid out the arena with these bounds.
    ArenaMeasured(ArenaBounds),
    /// The arena is no longer on screen.
    ArenaDetached,
    ToggleMusic,
    ToggleCaptureMode,
    OpenGift,
    CloseGift,
}

impl Action {
    /// Wire name of the action, as used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SkipIntro => "skip_intro",
            Self::NextIntro => "next_intro",
            Self::Affirm => "affirm",
            Self::EvadeAttempt => "evade_attempt",
            Self::QuizInputChanged(_) => "quiz_input_changed",
            Self::QuizSubmit => "quiz_submit",
            Self::QuizSkip => "quiz_skip",
            Self::RepeatEpisode => "repeat_episode",
            Self::ArenaMeasured(_) => "arena_measured",
            Self::ArenaDetached => "arena_detached",
            Self::ToggleMusic => "toggle_music",
            Self::ToggleCaptureMode => "toggle_capture_mode",
            Self::OpenGift => "open_gift",
            Self::CloseGift => "close_gift",
        }
    }
}
