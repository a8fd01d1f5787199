//! Progressive disclosure of the success content.

use std::time::Duration;

use valentine_core::scheduler::{Scheduler, TimerId};

use super::ports::StoryTimer;

/// Highest reveal stage; all content blocks visible.
pub const FINAL_STAGE: u8 = 4;

/// Offsets from entering `Success` at which stages 1 through 4 appear.
pub const STAGE_OFFSETS_MS: [u64; FINAL_STAGE as usize] = [180, 650, 1150, 1600];

/// Owns the reveal stage and the timers that raise it.
#[derive(Debug, Default)]
pub struct RevealSequencer {
    stage: u8,
    pending: Vec<(TimerId, u8)>,
}

impl RevealSequencer {
    /// Currently visible stage, 0 through 4.
    #[must_use]
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Whether stage timers are still outstanding.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Schedules the four stage timers, relative to now.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler<StoryTimer>) {
        self.cancel(scheduler);
        for (stage, offset) in (1..=FINAL_STAGE).zip(STAGE_OFFSETS_MS) {
            let id = scheduler.schedule(Duration::from_millis(offset), StoryTimer::Reveal(stage));
            self.pending.push((id, stage));
        }
    }

    /// Cancels outstanding timers and hides everything again.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler<StoryTimer>) {
        for (id, _) in self.pending.drain(..) {
            scheduler.cancel(id);
        }
        self.stage = 0;
    }

    /// Applies a fired stage timer. Returns the new stage when it rose;
    /// `None` for unknown ids or stages already reached.
    pub fn on_fired(&mut self, id: TimerId) -> Option<u8> {
        let index = self.pending.iter().position(|(pending, _)| *pending == id)?;
        let (_, stage) = self.pending.remove(index);
        if stage > self.stage {
            self.stage = stage;
            Some(stage)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valentine_test_support::ManualScheduler;

    #[test]
    fn test_start_schedules_stages_at_fixed_offsets() {
        // Arrange
        let mut scheduler = ManualScheduler::<StoryTimer>::new();
        let mut reveal = RevealSequencer::default();

        // Act
        reveal.start(&mut scheduler);

        // Assert
        let offsets: Vec<u64> = scheduler
            .pending_offsets()
            .iter()
            .map(|d| u64::try_from(d.as_millis()).unwrap())
            .collect();
        assert_eq!(offsets, vec![180, 650, 1150, 1600]);
        assert_eq!(reveal.stage(), 0);
    }

    #[test]
    fn test_stages_rise_one_by_one() {
        let mut scheduler = ManualScheduler::<StoryTimer>::new();
        let mut reveal = RevealSequencer::default();
        reveal.start(&mut scheduler);

        let mut seen = Vec::new();
        while let Some((_, id, _)) = scheduler.fire_next() {
            seen.push(reveal.on_fired(id));
        }

        assert_eq!(seen, vec![Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(reveal.stage(), FINAL_STAGE);
        assert!(!reveal.is_running());
    }

    #[test]
    fn test_cancel_resets_stage_and_drops_timers() {
        // Arrange
        let mut scheduler = ManualScheduler::<StoryTimer>::new();
        let mut reveal = RevealSequencer::default();
        reveal.start(&mut scheduler);
        let fired = scheduler.advance(Duration::from_millis(700));
        for (id, _) in fired {
            reveal.on_fired(id);
        }
        assert_eq!(reveal.stage(), 2);

        // Act
        reveal.cancel(&mut scheduler);

        // Assert
        assert_eq!(reveal.stage(), 0);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.cancelled().len(), 2);
    }

    #[test]
    fn test_stale_id_is_ignored() {
        let mut scheduler = ManualScheduler::<StoryTimer>::new();
        let mut reveal = RevealSequencer::default();
        reveal.start(&mut scheduler);
        let (_, stale, _) = scheduler.fire_next().unwrap();

        reveal.start(&mut scheduler);

        assert_eq!(reveal.on_fired(stale), None);
        assert_eq!(reveal.stage(), 0);
    }
}
