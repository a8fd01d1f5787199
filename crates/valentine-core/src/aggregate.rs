//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// A state owner that records each change as a domain event and hands the
/// batch over once the triggering input has been applied.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Number of events handed over so far.
    fn version(&self) -> i64;

    /// Events recorded since the last hand-over, oldest first.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Hands over the recorded events and advances the version past them.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;
}
