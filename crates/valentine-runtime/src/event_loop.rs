//! The single logical event loop.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use uuid::Uuid;
use valentine_core::audio::AudioOutput;
use valentine_core::clock::Clock;
use valentine_core::rng::DeterministicRng;
use valentine_core::scheduler::TimerId;
use valentine_narrative::application::command_handlers::{handle_action, handle_timer};
use valentine_narrative::application::query_handlers::get_session_view;
use valentine_narrative::domain::aggregates::StorySession;
use valentine_narrative::domain::commands::Action;
use valentine_narrative::domain::config::StoryConfig;
use valentine_narrative::domain::events::NarrativeEvent;
use valentine_narrative::domain::ports::{Ports, StoryTimer};

use crate::render::Renderer;
use crate::scheduler::TokioScheduler;

/// Everything the loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A renderer action.
    Action(Action),
    /// A scheduled timer came due.
    Timer(TimerId, StoryTimer),
    /// Stop the loop.
    Shutdown,
}

/// Owns the session and its collaborators and applies inputs one at a time.
pub struct EventLoop<R> {
    session: StorySession,
    clock: Box<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    audio: Box<dyn AudioOutput>,
    scheduler: TokioScheduler,
    renderer: R,
    rx: UnboundedReceiver<Input>,
}

impl<R: Renderer> EventLoop<R> {
    /// Creates a loop for a fresh session and returns the sender that feeds
    /// it.
    #[must_use]
    pub fn new(
        config: StoryConfig,
        clock: Box<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
        audio: Box<dyn AudioOutput>,
        renderer: R,
    ) -> (Self, UnboundedSender<Input>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_loop = Self {
            session: StorySession::new(Uuid::new_v4(), config),
            clock,
            rng,
            audio,
            scheduler: TokioScheduler::new(tx.clone()),
            renderer,
            rx,
        };
        (event_loop, tx)
    }

    /// Renders the initial screen, then handles inputs until `Shutdown`.
    /// Pending timers are cancelled on the way out. Returns the renderer.
    pub async fn run(mut self) -> R {
        info!(session_id = %self.session.id, "event loop started");
        self.render(&[]);
        while let Some(input) = self.rx.recv().await {
            if !self.handle(input) {
                break;
            }
        }
        self.scheduler.cancel_all();
        info!(session_id = %self.session.id, "event loop stopped");
        self.renderer
    }

    /// Applies one input to completion and renders the result. Returns
    /// `false` once the loop should stop.
    pub fn handle(&mut self, input: Input) -> bool {
        if let Input::Timer(id, _) = &input {
            self.scheduler.complete(*id);
        }
        let mut ports = Ports {
            clock: self.clock.as_ref(),
            rng: self.rng.as_mut(),
            scheduler: &mut self.scheduler,
            audio: self.audio.as_mut(),
        };
        let events = match input {
            Input::Action(action) => handle_action(&mut self.session, action, &mut ports),
            Input::Timer(id, timer) => handle_timer(&mut self.session, id, timer, &mut ports),
            Input::Shutdown => return false,
        };
        if events.is_empty() {
            debug!("input changed nothing; render skipped");
        } else {
            self.render(&events);
        }
        true
    }

    #[must_use]
    pub fn session(&self) -> &StorySession {
        &self.session
    }

    fn render(&mut self, events: &[NarrativeEvent]) {
        let view = get_session_view(&self.session, self.clock.as_ref());
        self.renderer.render(&view, events);
    }
}
