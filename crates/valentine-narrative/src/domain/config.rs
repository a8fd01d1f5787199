//! Static session configuration, fixed for the lifetime of a session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use valentine_core::error::DomainError;

use super::quiz::{QuizError, QuizQuestion, normalize};

/// User-facing messages the core surfaces in its render views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryMessages {
    /// Shown when a quiz answer is blank.
    pub empty_answer: String,
    /// Shown when a quiz answer matches nothing.
    pub wrong_answer: String,
    /// Transient notice shown at the toast threshold.
    pub toast: String,
}

impl Default for StoryMessages {
    fn default() -> Self {
        Self {
            empty_answer: "No fair leaving it blank 😶".to_owned(),
            wrong_answer: "Hmm… nope 😅 (hint: think about us)".to_owned(),
            toast: "Okay, okay… I get it. I still like you. Now press “Yes” 😤❤️".to_owned(),
        }
    }
}

impl StoryMessages {
    /// Message for a rejected quiz answer.
    #[must_use]
    pub fn for_error(&self, error: QuizError) -> &str {
        match error {
            QuizError::EmptyInput => &self.empty_answer,
            QuizError::NoMatch => &self.wrong_answer,
        }
    }
}

/// Everything a session treats as constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Name used in the story and letter.
    pub display_name: String,
    /// Start of the relationship, for the days-together counter.
    pub start_date: NaiveDate,
    /// Whether `Confirm` passes through the quiz.
    pub quiz_enabled: bool,
    /// Questions asked in order.
    pub questions: Vec<QuizQuestion>,
    /// Attempt count that forces the session out of `Confirm`.
    pub evasion_threshold: u32,
    /// Attempt count that shows the transient notice.
    pub toast_threshold: u32,
    /// Volume applied before playback starts.
    pub initial_volume: f32,
    pub messages: StoryMessages,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            display_name: "Caroline".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 6).unwrap_or_default(),
            quiz_enabled: true,
            questions: vec![
                QuizQuestion::new(
                    "Where was our first date? (with or without the space)",
                    &["jardin japones", "jardinjapones", "jardín japonés", "jardinjaponés"],
                ),
                QuizQuestion::new(
                    "What do we always order? (one word)",
                    &["hamburguesas", "hamburguesa"],
                ),
            ],
            evasion_threshold: 12,
            toast_threshold: 8,
            initial_volume: 0.55,
            messages: StoryMessages::default(),
        }
    }
}

impl StoryConfig {
    /// Whether `Confirm` leads to the quiz rather than straight to success.
    #[must_use]
    pub fn has_quiz(&self) -> bool {
        self.quiz_enabled && !self.questions.is_empty()
    }

    /// Checks the configuration for values the state machine cannot honor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a zero threshold, a toast
    /// threshold the escape would always pre-empt, a volume outside `[0, 1]`,
    /// or a question with no usable accepted answer.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.evasion_threshold == 0 {
            return Err(DomainError::Validation(
                "evasion_threshold must be at least 1".to_owned(),
            ));
        }
        if self.toast_threshold == 0 {
            return Err(DomainError::Validation(
                "toast_threshold must be at least 1".to_owned(),
            ));
        }
        if self.toast_threshold >= self.evasion_threshold {
            return Err(DomainError::Validation(format!(
                "toast_threshold ({}) must be below evasion_threshold ({})",
                self.toast_threshold, self.evasion_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(DomainError::Validation(format!(
                "initial_volume must be within [0, 1], got {}",
                self.initial_volume
            )));
        }
        for (index, question) in self.questions.iter().enumerate() {
            if !question
                .accepted_answers
                .iter()
                .any(|answer| !normalize(answer).is_empty())
            {
                return Err(DomainError::Validation(format!(
                    "question {} has no non-empty accepted answer",
                    index + 1
                )));
            }
        }
        Ok(())
    }

    /// Whole days together as of `today`.
    #[must_use]
    pub fn days_together(&self, today: NaiveDate) -> u32 {
        days_between(self.start_date, today)
    }
}

/// Whole calendar days from `start` to `end`, clamped to zero.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    u32::try_from((end - start).num_days()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_config_is_valid_and_has_quiz() {
        let config = StoryConfig::default();

        assert!(config.validate().is_ok());
        assert!(config.has_quiz());
        assert_eq!(config.evasion_threshold, 12);
        assert_eq!(config.toast_threshold, 8);
    }

    #[test]
    fn test_has_quiz_requires_questions_and_flag() {
        let mut config = StoryConfig::default();
        config.quiz_enabled = false;
        assert!(!config.has_quiz());

        config.quiz_enabled = true;
        config.questions.clear();
        assert!(!config.has_quiz());
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = StoryConfig {
            evasion_threshold: 0,
            ..StoryConfig::default()
        };

        match config.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("evasion_threshold")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_toast_threshold_not_below_escape() {
        // Arrange
        let config = StoryConfig {
            toast_threshold: 12,
            evasion_threshold: 12,
            ..StoryConfig::default()
        };

        // Act
        let result = config.validate();

        // Assert
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("toast_threshold")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_question_without_usable_answer() {
        let config = StoryConfig {
            questions: vec![QuizQuestion::new("?", &["   "])],
            ..StoryConfig::default()
        };

        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_volume() {
        let config = StoryConfig {
            initial_volume: 1.5,
            ..StoryConfig::default()
        };

        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_days_between_counts_whole_days_and_clamps() {
        assert_eq!(days_between(date(2025, 6, 6), date(2025, 6, 6)), 0);
        assert_eq!(days_between(date(2025, 6, 6), date(2026, 2, 14)), 253);
        assert_eq!(days_between(date(2026, 2, 14), date(2025, 6, 6)), 0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "display_name: Sam\nstart_date: 2024-01-01\nquiz_enabled: false\n";

        let config: StoryConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.display_name, "Sam");
        assert_eq!(config.start_date, date(2024, 1, 1));
        assert!(!config.quiz_enabled);
        assert_eq!(config.evasion_threshold, 12);
        assert_eq!(config.messages, StoryMessages::default());
    }
}
