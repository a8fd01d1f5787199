//! Startup configuration read from the environment.
//!
//! - `VALENTINE_CONFIG`: optional path to a YAML story file. Missing keys
//!   keep their defaults.
//! - `VALENTINE_ARENA_WIDTH` / `VALENTINE_ARENA_HEIGHT`: arena size reported
//!   to the core (default 600 x 360).

use valentine_narrative::domain::config::StoryConfig;
use valentine_narrative::domain::evasion::ArenaBounds;

use crate::error::AppError;

const DEFAULT_ARENA: ArenaBounds = ArenaBounds {
    width: 600,
    height: 360,
};

/// Everything the binary needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub story: StoryConfig,
    pub arena: ArenaBounds,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` or `AppError::Yaml` if the story file cannot be
    /// read or parsed, `AppError::Config` for a malformed arena size, and
    /// `AppError::Domain` if the story fails validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let story = match lookup("VALENTINE_CONFIG") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)?;
                parse_story(&raw)?
            }
            None => StoryConfig::default(),
        };
        story.validate()?;

        let width = parse_dimension(&lookup, "VALENTINE_ARENA_WIDTH", DEFAULT_ARENA.width)?;
        let height = parse_dimension(&lookup, "VALENTINE_ARENA_HEIGHT", DEFAULT_ARENA.height)?;

        Ok(Self {
            story,
            arena: ArenaBounds::new(width, height),
        })
    }
}

/// Parses a YAML story file.
///
/// # Errors
///
/// Returns `AppError::Yaml` if the text is not a valid story.
pub fn parse_story(raw: &str) -> Result<StoryConfig, AppError> {
    if raw.trim().is_empty() {
        return Ok(StoryConfig::default());
    }
    Ok(serde_yaml::from_str(raw)?)
}

fn parse_dimension(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> Result<u32, AppError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid u32: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.story, StoryConfig::default());
        assert_eq!(config.arena, ArenaBounds::new(600, 360));
    }

    #[test]
    fn test_arena_size_from_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("VALENTINE_ARENA_WIDTH", "480"),
            ("VALENTINE_ARENA_HEIGHT", " 300 "),
        ]))
        .unwrap();

        assert_eq!(config.arena, ArenaBounds::new(480, 300));
        assert!(config.arena.is_compact());
    }

    #[test]
    fn test_malformed_arena_size_is_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("VALENTINE_ARENA_WIDTH", "wide")]));

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("VALENTINE_ARENA_WIDTH")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_story_file_is_io_error() {
        let result = AppConfig::from_lookup(lookup_from(&[(
            "VALENTINE_CONFIG",
            "/nonexistent/valentine/story.yaml",
        )]));

        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_parse_story_reads_questions() {
        let raw = r#"
display_name: Alex
quiz_enabled: true
questions:
  - prompt: "Favourite dessert?"
    accepted_answers: ["crème brûlée"]
evasion_threshold: 6
toast_threshold: 4
"#;

        let story = parse_story(raw).unwrap();

        assert_eq!(story.display_name, "Alex");
        assert_eq!(story.questions.len(), 1);
        assert_eq!(story.evasion_threshold, 6);
        assert!(story.validate().is_ok());
    }

    #[test]
    fn test_parse_story_rejects_wrong_types() {
        let result = parse_story("evasion_threshold: lots\n");

        assert!(matches!(result, Err(AppError::Yaml(_))));
    }
}
