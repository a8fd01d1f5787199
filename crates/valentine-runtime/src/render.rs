//! Renderers: the collaborator that turns snapshots into something visible.

use std::io::{self, Write};

use tracing::warn;
use valentine_narrative::application::query_handlers::SessionView;
use valentine_narrative::domain::events::{NarrativeEvent, NarrativeEventKind};
use valentine_narrative::domain::step::Step;

/// Receives the fresh snapshot, plus the events that produced it, after
/// every input that changed something. The first call carries no events.
pub trait Renderer: Send {
    fn render(&mut self, view: &SessionView, events: &[NarrativeEvent]);
}

const FOOTER: &str = "Made with love and the bare minimum of professional dignity.";

/// Success-screen letter block revealed at `stage`.
fn letter_block(stage: u8, name: &str) -> Option<String> {
    let text = match stage {
        1 => format!(
            "{name}, thank you for being my safe place. I love the way you are, \
             your smile, and how you make everything feel lovelier."
        ),
        2 => "My favourite memory: the day we went to the Japanese Garden.".to_owned(),
        3 => "And my plan: an afternoon of ice cream together, then two whole \
              nights just for us. 💞\n  With love, your programmer 💘"
            .to_owned(),
        4 => "[ gallery: three photos of us ]".to_owned(),
        _ => return None,
    };
    Some(text)
}

/// Plain-text renderer for a terminal.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write + Send> TerminalRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, view: &SessionView, events: &[NarrativeEvent]) -> io::Result<()> {
        let step_changed = events
            .iter()
            .any(|e| matches!(e.kind, NarrativeEventKind::StepChanged(_)));
        if events.is_empty() || step_changed {
            return self.draw_screen(view);
        }
        for event in events {
            self.draw_update(view, event)?;
        }
        self.out.flush()
    }

    fn draw_screen(&mut self, view: &SessionView) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        match view.step {
            Step::StoryPage1 | Step::StoryPage2 | Step::StoryPage3 => {
                let (title, subtitle) = match view.step {
                    Step::StoryPage1 => (
                        format!("Hey {}…", view.display_name),
                        "I have something important to tell you. It isn't a lie. For once.",
                    ),
                    Step::StoryPage2 => (
                        "Thank you for everything ❤️".to_owned(),
                        "For your patience, your affection, and for putting up with my moods.",
                    ),
                    _ => (
                        "Last screen before the big moment".to_owned(),
                        "Okay… here comes the official question. Breathe.",
                    ),
                };
                writeln!(out, "A little story 💌")?;
                writeln!(out, "{title}")?;
                writeln!(out, "  {subtitle}")?;
                writeln!(out, "[next] Next ➜   [skip] Skip")?;
                if let Some(index) = view.intro_index {
                    writeln!(out, "{index} / {}", view.intro_total)?;
                }
            }
            Step::Confirm => {
                writeln!(out, "Will you be my Valentine? 💘")?;
                writeln!(out, "  We've been together {} days ❤️", view.days_together)?;
                writeln!(
                    out,
                    "[yes] Yes 💞 (x{:.2})   [no] {}",
                    view.affirm_scale, view.decline_label
                )?;
            }
            Step::Quiz => {
                writeln!(out, "Secret unlock 🔐")?;
                writeln!(out, "Before you go on…")?;
                if let Some(prompt) = &view.quiz.prompt {
                    writeln!(out, "  {prompt}")?;
                }
                writeln!(
                    out,
                    "[type <answer>] [submit] [cheat]   {} / {}",
                    view.quiz.current_question_index + 1,
                    view.quiz.question_count
                )?;
            }
            Step::Success => {
                writeln!(out, "I knew you'd say yes ❤️")?;
                for stage in 1..=view.reveal_stage {
                    if let Some(block) = letter_block(stage, &view.display_name) {
                        writeln!(out, "  {block}")?;
                    }
                }
                writeln!(out, "[gift] Open gift 🎁   [repeat] Again")?;
            }
        }
        if view.show_footer {
            writeln!(out, "~ {FOOTER}")?;
        }
        out.flush()
    }

    fn draw_update(&mut self, view: &SessionView, event: &NarrativeEvent) -> io::Result<()> {
        let out = &mut self.out;
        match &event.kind {
            NarrativeEventKind::ControlEvaded(evaded) => writeln!(
                out,
                "  \"{}\" slipped to ({}, {}). Yes is now x{:.2}",
                view.decline_label, evaded.position.x, evaded.position.y, view.affirm_scale
            ),
            NarrativeEventKind::ToastShown => {
                if let Some(toast) = &view.toast {
                    writeln!(out, "  >> {toast}")?;
                }
                Ok(())
            }
            NarrativeEventKind::AnswerRejected(_) => {
                if let Some(message) = &view.quiz.error_message {
                    writeln!(out, "  {message}")?;
                }
                Ok(())
            }
            NarrativeEventKind::AnswerAccepted(accepted) if accepted.next_question_index.is_some() => {
                if let Some(prompt) = &view.quiz.prompt {
                    writeln!(out, "  {prompt}")?;
                }
                Ok(())
            }
            NarrativeEventKind::RevealAdvanced { stage } => {
                if let Some(block) = letter_block(*stage, &view.display_name) {
                    writeln!(out, "  {block}")?;
                }
                Ok(())
            }
            NarrativeEventKind::MusicToggled { playing } => {
                writeln!(out, "  {}", if *playing { "Pause 🎶" } else { "Play 🎶" })
            }
            NarrativeEventKind::CaptureModeToggled { enabled } => writeln!(
                out,
                "  {}",
                if *enabled { "Capture mode 📸" } else { "Capture mode off" }
            ),
            NarrativeEventKind::GiftToggled { open: true } => {
                writeln!(out, "  🎁 For you ❤️  If you made it this far, I already won.")
            }
            _ => Ok(()),
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &SessionView, events: &[NarrativeEvent]) {
        if let Err(error) = self.draw(view, events) {
            warn!(%error, "terminal render failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use valentine_core::event::EventMetadata;
    use valentine_narrative::application::query_handlers::get_session_view;
    use valentine_narrative::domain::aggregates::StorySession;
    use valentine_narrative::domain::config::StoryConfig;
    use valentine_narrative::domain::events::StepChanged;
    use valentine_test_support::FixedClock;

    fn view() -> SessionView {
        let clock = FixedClock::on_date(2026, 2, 14);
        let session = StorySession::new(Uuid::new_v4(), StoryConfig::default());
        get_session_view(&session, &clock)
    }

    fn event(kind: NarrativeEventKind) -> NarrativeEvent {
        NarrativeEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: Uuid::new_v4(),
                sequence_number: 1,
                occurred_at: Utc::now(),
            },
            kind,
        }
    }

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_first_render_draws_the_whole_screen() {
        // Arrange
        let mut renderer = TerminalRenderer::new(Vec::new());

        // Act
        renderer.render(&view(), &[]);

        // Assert
        let text = output(renderer);
        assert!(text.contains("Hey Caroline…"));
        assert!(text.contains("1 / 3"));
        assert!(text.contains(FOOTER));
    }

    #[test]
    fn test_step_change_redraws_screen() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let mut view = view();
        view.step = Step::Confirm;
        view.intro_index = None;

        renderer.render(
            &view,
            &[event(NarrativeEventKind::StepChanged(StepChanged {
                from: Step::StoryPage1,
                to: Step::Confirm,
            }))],
        );

        let text = output(renderer);
        assert!(text.contains("Will you be my Valentine?"));
        assert!(text.contains("253 days"));
    }

    #[test]
    fn test_reveal_update_prints_only_the_new_block() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let mut view = view();
        view.step = Step::Success;
        view.reveal_stage = 2;

        renderer.render(&view, &[event(NarrativeEventKind::RevealAdvanced { stage: 2 })]);

        let text = output(renderer);
        assert!(text.contains("Japanese Garden"));
        assert!(!text.contains("safe place"));
    }

    #[test]
    fn test_capture_mode_hides_footer_on_redraw() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let mut view = view();
        view.show_footer = false;

        renderer.render(&view, &[]);

        assert!(!output(renderer).contains(FOOTER));
    }

    #[test]
    fn test_letter_blocks_cover_four_stages() {
        assert!(letter_block(0, "Sam").is_none());
        assert!(letter_block(1, "Sam").unwrap().starts_with("Sam, thank you"));
        assert!(letter_block(4, "Sam").is_some());
        assert!(letter_block(5, "Sam").is_none());
    }
}
