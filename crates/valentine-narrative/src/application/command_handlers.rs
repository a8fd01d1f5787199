//! Command handlers for the interaction state machine.
//!
//! Each handler applies one input to the session aggregate, commits the
//! events it produced, logs them, and hands them back for rendering.

use tracing::{debug, info, instrument};
use valentine_core::aggregate::AggregateRoot;
use valentine_core::event::DomainEvent;
use valentine_core::scheduler::TimerId;

use crate::domain::aggregates::StorySession;
use crate::domain::commands::Action;
use crate::domain::events::{NarrativeEvent, NarrativeEventKind};
use crate::domain::ports::{Ports, StoryTimer};

fn commit(session: &mut StorySession) -> Vec<NarrativeEvent> {
    let events = session.take_uncommitted_events();
    for event in &events {
        let meta = event.metadata();
        if let NarrativeEventKind::StepChanged(change) = &event.kind {
            info!(
                from = ?change.from,
                to = ?change.to,
                sequence_number = meta.sequence_number,
                "step changed"
            );
        } else {
            debug!(
                event_type = event.event_type(),
                sequence_number = meta.sequence_number,
                payload = %event.to_payload(),
                "event recorded"
            );
        }
    }
    events
}

/// Handles a renderer action and returns the committed events.
#[instrument(skip_all, fields(session_id = %session.id, action = action.name()))]
pub fn handle_action(
    session: &mut StorySession,
    action: Action,
    ports: &mut Ports<'_>,
) -> Vec<NarrativeEvent> {
    session.dispatch(action, ports);
    commit(session)
}

/// Handles a fired timer and returns the committed events.
#[instrument(skip_all, fields(session_id = %session.id, %timer_id, timer = ?timer))]
pub fn handle_timer(
    session: &mut StorySession,
    timer_id: TimerId,
    timer: StoryTimer,
    ports: &mut Ports<'_>,
) -> Vec<NarrativeEvent> {
    session.on_timer(timer_id, timer, ports);
    commit(session)
}
