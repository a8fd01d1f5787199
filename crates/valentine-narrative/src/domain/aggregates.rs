//! Aggregate root for the interaction state machine.

use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;
use valentine_core::aggregate::AggregateRoot;
use valentine_core::clock::Clock;
use valentine_core::event::EventMetadata;
use valentine_core::scheduler::TimerId;

use super::commands::Action;
use super::config::StoryConfig;
use super::evasion::{self, ArenaBounds, EvasionState, Milestone};
use super::events::{
    AnswerAccepted, AnswerRejected, ControlEvaded, ControlPlaced, NarrativeEvent,
    NarrativeEventKind, StepChanged, ThresholdEscaped,
};
use super::hearts::HeartEmitter;
use super::ports::{Ports, StoryTimer};
use super::quiz::{QuizOutcome, QuizProgress, validate};
use super::reveal::RevealSequencer;
use super::step::Step;

/// Delay between entering `Confirm` and the control's initial placement.
pub const PLACE_CONTROL_DELAY: Duration = Duration::from_millis(50);
/// How long the transient notice stays up.
pub const TOAST_DURATION: Duration = Duration::from_millis(2_800);

/// The aggregate root for one user's session. Owns the single source of
/// truth for the current step and every timer tied to it.
#[derive(Debug)]
pub struct StorySession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (committed event count).
    pub(crate) version: i64,
    pub(crate) config: StoryConfig,
    pub(crate) step: Step,
    pub(crate) evasion: EvasionState,
    pub(crate) toast_visible: bool,
    pub(crate) quiz: QuizProgress,
    pub(crate) reveal: RevealSequencer,
    pub(crate) hearts: HeartEmitter,
    pub(crate) arena: Option<ArenaBounds>,
    pub(crate) music_on: bool,
    pub(crate) capture_mode: bool,
    pub(crate) gift_open: bool,
    place_timer: Option<TimerId>,
    toast_timer: Option<TimerId>,
    /// Uncommitted events pending delivery.
    uncommitted_events: Vec<NarrativeEvent>,
}

impl StorySession {
    /// Creates a session on the first story page.
    #[must_use]
    pub fn new(id: Uuid, config: StoryConfig) -> Self {
        Self {
            id,
            version: 0,
            config,
            step: Step::StoryPage1,
            evasion: EvasionState::default(),
            toast_visible: false,
            quiz: QuizProgress::default(),
            reveal: RevealSequencer::default(),
            hearts: HeartEmitter::default(),
            arena: None,
            music_on: false,
            capture_mode: false,
            gift_open: false,
            place_timer: None,
            toast_timer: None,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn evasion(&self) -> EvasionState {
        self.evasion
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizProgress {
        &self.quiz
    }

    #[must_use]
    pub fn reveal_stage(&self) -> u8 {
        self.reveal.stage()
    }

    #[must_use]
    pub fn toast_visible(&self) -> bool {
        self.toast_visible
    }

    #[must_use]
    pub fn music_on(&self) -> bool {
        self.music_on
    }

    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, clock: &dyn Clock, kind: NarrativeEventKind) {
        let event = NarrativeEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.id,
                sequence_number: self.next_sequence_number(),
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Applies one renderer action. Actions not permitted in the current
    /// step leave the session untouched.
    pub fn dispatch(&mut self, action: Action, ports: &mut Ports<'_>) {
        match action {
            Action::SkipIntro if self.step.is_story() => self.transition(Step::Confirm, ports),
            Action::NextIntro if self.step.is_story() => {
                if let Some(next) = self.step.next_intro() {
                    self.transition(next, ports);
                }
            }
            Action::Affirm if self.step == Step::Confirm => {
                let target = self.after_confirm();
                self.transition(target, ports);
            }
            Action::EvadeAttempt if self.step == Step::Confirm => self.evade(ports),
            Action::QuizInputChanged(text) if self.step == Step::Quiz => {
                let length = text.chars().count();
                self.quiz.edit(text);
                self.record(ports.clock, NarrativeEventKind::QuizInputChanged { length });
            }
            Action::QuizSubmit if self.step == Step::Quiz => self.submit_answer(ports),
            Action::QuizSkip if self.step == Step::Quiz => {
                let question_index = self.quiz.current_question_index;
                self.record(ports.clock, NarrativeEventKind::QuizSkipped { question_index });
                self.transition(Step::Success, ports);
            }
            Action::RepeatEpisode if self.step == Step::Success => {
                self.transition(Step::Confirm, ports);
            }
            Action::ArenaMeasured(bounds) => self.set_arena(Some(bounds), ports.clock),
            Action::ArenaDetached => self.set_arena(None, ports.clock),
            Action::ToggleMusic if self.step.has_toolbar() => self.toggle_music(ports),
            Action::ToggleCaptureMode if self.step.has_toolbar() => {
                self.toggle_capture_mode(ports);
            }
            Action::OpenGift if self.step == Step::Success && !self.gift_open => {
                self.gift_open = true;
                self.record(ports.clock, NarrativeEventKind::GiftToggled { open: true });
            }
            Action::CloseGift if self.gift_open => {
                self.gift_open = false;
                self.record(ports.clock, NarrativeEventKind::GiftToggled { open: false });
            }
            other => debug!(step = ?self.step, action = ?other, "action ignored in this step"),
        }
    }

    /// Applies a fired timer. Firings whose id the session no longer holds
    /// belong to an exited state and are dropped.
    pub fn on_timer(&mut self, id: TimerId, timer: StoryTimer, ports: &mut Ports<'_>) {
        match timer {
            StoryTimer::PlaceControl if self.place_timer == Some(id) => {
                self.place_timer = None;
                self.place_control(ports);
            }
            StoryTimer::HideToast if self.toast_timer == Some(id) => {
                self.toast_timer = None;
                self.toast_visible = false;
                self.record(ports.clock, NarrativeEventKind::ToastHidden);
            }
            StoryTimer::Reveal(_) => match self.reveal.on_fired(id) {
                Some(stage) => {
                    self.record(ports.clock, NarrativeEventKind::RevealAdvanced { stage });
                }
                None => debug!(
                    %id,
                    ?timer,
                    reveal_running = self.reveal.is_running(),
                    "stale timer dropped"
                ),
            },
            StoryTimer::Heart => match self.hearts.on_fired(id, ports.rng, ports.scheduler) {
                Some(heart) => {
                    self.record(ports.clock, NarrativeEventKind::HeartSpawned(heart));
                }
                None => debug!(
                    %id,
                    ?timer,
                    hearts_running = self.hearts.is_running(),
                    "stale timer dropped"
                ),
            },
            _ => debug!(%id, ?timer, "stale timer dropped"),
        }
    }

    /// Where `Confirm` leads: the quiz when one is configured.
    fn after_confirm(&self) -> Step {
        if self.config.has_quiz() {
            Step::Quiz
        } else {
            Step::Success
        }
    }

    fn transition(&mut self, to: Step, ports: &mut Ports<'_>) {
        let from = self.step;
        if from == to {
            return;
        }
        self.exit(from, ports);
        self.step = to;
        self.record(ports.clock, NarrativeEventKind::StepChanged(StepChanged { from, to }));
        self.enter(to, ports);
    }

    fn exit(&mut self, step: Step, ports: &mut Ports<'_>) {
        match step {
            Step::Confirm => {
                if let Some(id) = self.place_timer.take() {
                    ports.scheduler.cancel(id);
                }
                if let Some(id) = self.toast_timer.take() {
                    ports.scheduler.cancel(id);
                }
                self.toast_visible = false;
            }
            Step::Success => {
                self.reveal.cancel(ports.scheduler);
                self.hearts.stop(ports.scheduler);
                self.gift_open = false;
            }
            _ => {}
        }
    }

    fn enter(&mut self, step: Step, ports: &mut Ports<'_>) {
        match step {
            Step::Confirm => {
                self.evasion = EvasionState::default();
                self.place_timer = Some(
                    ports
                        .scheduler
                        .schedule(PLACE_CONTROL_DELAY, StoryTimer::PlaceControl),
                );
            }
            Step::Quiz => self.quiz = QuizProgress::default(),
            Step::Success => {
                self.reveal.start(ports.scheduler);
                if !self.capture_mode {
                    self.hearts.start(ports.scheduler);
                }
            }
            _ => {}
        }
    }

    fn place_control(&mut self, ports: &mut Ports<'_>) {
        let Some(bounds) = self.arena else {
            debug!("arena not laid out yet; initial placement skipped");
            return;
        };
        self.evasion.position = evasion::place(bounds, bounds.is_compact(), ports.rng);
        let position = self.evasion.position;
        self.record(
            ports.clock,
            NarrativeEventKind::ControlPlaced(ControlPlaced { position }),
        );
    }

    fn evade(&mut self, ports: &mut Ports<'_>) {
        let Some(bounds) = self.arena else {
            debug!("arena not laid out yet; attempt ignored");
            return;
        };
        // The control is moving now; a pending initial placement is moot.
        if let Some(id) = self.place_timer.take() {
            ports.scheduler.cancel(id);
        }
        self.evasion = self.evasion.relocate(bounds, bounds.is_compact(), ports.rng);
        let EvasionState {
            position,
            attempt_count,
        } = self.evasion;
        self.record(
            ports.clock,
            NarrativeEventKind::ControlEvaded(ControlEvaded {
                position,
                attempt_count,
            }),
        );

        match self
            .evasion
            .milestone(self.config.toast_threshold, self.config.evasion_threshold)
        {
            Milestone::Toast => self.show_toast(ports),
            Milestone::Escape => {
                let to = self.after_confirm();
                self.record(
                    ports.clock,
                    NarrativeEventKind::ThresholdEscaped(ThresholdEscaped { attempt_count, to }),
                );
                self.transition(to, ports);
            }
            Milestone::None => {}
        }
    }

    fn show_toast(&mut self, ports: &mut Ports<'_>) {
        if let Some(id) = self.toast_timer.take() {
            ports.scheduler.cancel(id);
        }
        self.toast_visible = true;
        self.toast_timer = Some(ports.scheduler.schedule(TOAST_DURATION, StoryTimer::HideToast));
        self.record(ports.clock, NarrativeEventKind::ToastShown);
    }

    fn submit_answer(&mut self, ports: &mut Ports<'_>) {
        let question_index = self.quiz.current_question_index;
        let Some(question) = self.config.questions.get(question_index) else {
            // Quiz without questions is never entered; nothing to validate.
            return;
        };
        let verdict = validate(question, &self.quiz.pending_input);
        match verdict {
            Err(reason) => {
                self.quiz.reject(reason);
                self.record(
                    ports.clock,
                    NarrativeEventKind::AnswerRejected(AnswerRejected {
                        question_index,
                        reason,
                    }),
                );
            }
            Ok(proof) => {
                let outcome = self.quiz.advance(proof, self.config.questions.len());
                let next_question_index = match outcome {
                    QuizOutcome::NextQuestion(next) => Some(next),
                    QuizOutcome::Completed => None,
                };
                self.record(
                    ports.clock,
                    NarrativeEventKind::AnswerAccepted(AnswerAccepted {
                        question_index,
                        next_question_index,
                    }),
                );
                if outcome == QuizOutcome::Completed {
                    self.transition(Step::Success, ports);
                }
            }
        }
    }

    fn set_arena(&mut self, bounds: Option<ArenaBounds>, clock: &dyn Clock) {
        if self.arena != bounds {
            self.arena = bounds;
            self.record(clock, NarrativeEventKind::ArenaChanged { bounds });
        }
    }

    fn toggle_music(&mut self, ports: &mut Ports<'_>) {
        if self.music_on {
            ports.audio.pause();
            self.music_on = false;
        } else {
            ports.audio.set_volume(self.config.initial_volume);
            self.music_on = match ports.audio.play() {
                Ok(()) => true,
                Err(error) => {
                    warn!(%error, "background music did not start");
                    false
                }
            };
        }
        let playing = self.music_on;
        self.record(ports.clock, NarrativeEventKind::MusicToggled { playing });
    }

    fn toggle_capture_mode(&mut self, ports: &mut Ports<'_>) {
        self.capture_mode = !self.capture_mode;
        if self.step == Step::Success {
            if self.capture_mode {
                self.hearts.stop(ports.scheduler);
            } else {
                self.hearts.start(ports.scheduler);
            }
        }
        let enabled = self.capture_mode;
        self.record(ports.clock, NarrativeEventKind::CaptureModeToggled { enabled });
    }
}

impl AggregateRoot for StorySession {
    type Event = NarrativeEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    #[allow(clippy::cast_possible_wrap)]
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        self.version += self.uncommitted_events.len() as i64;
        std::mem::take(&mut self.uncommitted_events)
    }
}
