//! The screen currently presented to the user.

use serde::{Deserialize, Serialize};

/// Number of story pages shown before the question.
pub const STORY_PAGES: u8 = 3;

/// Exactly one step is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    StoryPage1,
    StoryPage2,
    StoryPage3,
    Confirm,
    Quiz,
    Success,
}

impl Step {
    /// Returns `true` for the three introductory story pages.
    #[must_use]
    pub fn is_story(self) -> bool {
        matches!(self, Self::StoryPage1 | Self::StoryPage2 | Self::StoryPage3)
    }

    /// 1-based position within the story pages, `None` elsewhere.
    #[must_use]
    pub fn intro_index(self) -> Option<u8> {
        match self {
            Self::StoryPage1 => Some(1),
            Self::StoryPage2 => Some(2),
            Self::StoryPage3 => Some(3),
            _ => None,
        }
    }

    /// The step `NextIntro` leads to from a story page.
    #[must_use]
    pub fn next_intro(self) -> Option<Self> {
        match self {
            Self::StoryPage1 => Some(Self::StoryPage2),
            Self::StoryPage2 => Some(Self::StoryPage3),
            Self::StoryPage3 => Some(Self::Confirm),
            _ => None,
        }
    }

    /// Steps that show the toolbar with the music and capture toggles.
    #[must_use]
    pub fn has_toolbar(self) -> bool {
        matches!(self, Self::Confirm | Self::Quiz | Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_intro_walks_story_pages_into_confirm() {
        assert_eq!(Step::StoryPage1.next_intro(), Some(Step::StoryPage2));
        assert_eq!(Step::StoryPage2.next_intro(), Some(Step::StoryPage3));
        assert_eq!(Step::StoryPage3.next_intro(), Some(Step::Confirm));
        assert_eq!(Step::Confirm.next_intro(), None);
        assert_eq!(Step::Success.next_intro(), None);
    }

    #[test]
    fn test_intro_index_only_on_story_pages() {
        assert_eq!(Step::StoryPage2.intro_index(), Some(2));
        assert_eq!(Step::Quiz.intro_index(), None);
        assert!(Step::StoryPage3.is_story());
        assert!(!Step::Confirm.is_story());
    }
}
