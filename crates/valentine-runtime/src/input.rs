//! Line-oriented terminal commands.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use valentine_narrative::domain::commands::Action;

use crate::event_loop::Input;

/// Help line printed for unknown commands.
pub const USAGE: &str =
    "commands: next, skip, yes, no, type <answer>, submit, cheat, repeat, music, capture, gift, close, quit";

/// Errors from parsing a terminal command.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0}")]
    Unknown(String),
}

/// Maps one line of terminal input to a loop input. Returns `Ok(None)` for a
/// blank line.
///
/// # Errors
///
/// Returns `InputError::Unknown` when the first word is not a command.
pub fn parse_command(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let action = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "quit" | "exit" => return Ok(Some(Input::Shutdown)),
        "next" => Action::NextIntro,
        "skip" => Action::SkipIntro,
        "yes" => Action::Affirm,
        "no" => Action::EvadeAttempt,
        "type" => Action::QuizInputChanged(rest.trim_start().to_owned()),
        "submit" => Action::QuizSubmit,
        "cheat" => Action::QuizSkip,
        "repeat" => Action::RepeatEpisode,
        "music" => Action::ToggleMusic,
        "capture" => Action::ToggleCaptureMode,
        "gift" => Action::OpenGift,
        "close" => Action::CloseGift,
        _ => return Err(InputError::Unknown(word.to_owned())),
    };
    Ok(Some(Input::Action(action)))
}

/// Reads commands from stdin and forwards them to the loop. Sends
/// `Shutdown` at end of input.
pub fn spawn_stdin_reader(tx: UnboundedSender<Input>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Some(input)) => {
                        let stop = input == Input::Shutdown;
                        if tx.send(input).is_err() || stop {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(error) => warn!(%error, "{USAGE}"),
                },
                Ok(None) => {
                    debug!("stdin closed");
                    break;
                }
                Err(error) => {
                    warn!(%error, "failed to read stdin");
                    break;
                }
            }
        }
        let _ = tx.send(Input::Shutdown);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_commands() {
        assert_eq!(
            parse_command("next"),
            Ok(Some(Input::Action(Action::NextIntro)))
        );
        assert_eq!(
            parse_command("  NO "),
            Ok(Some(Input::Action(Action::EvadeAttempt)))
        );
        assert_eq!(parse_command("quit"), Ok(Some(Input::Shutdown)));
    }

    #[test]
    fn test_type_keeps_the_rest_of_the_line() {
        // Act
        let parsed = parse_command("type  Jardín   japonés");

        // Assert
        assert_eq!(
            parsed,
            Ok(Some(Input::Action(Action::QuizInputChanged(
                "Jardín   japonés".to_owned()
            ))))
        );
    }

    #[test]
    fn test_blank_line_is_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert_eq!(
            parse_command("dance now"),
            Err(InputError::Unknown("dance".to_owned()))
        );
    }
}
