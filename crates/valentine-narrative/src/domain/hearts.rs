//! Floating hearts shown while the success screen is up.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use valentine_core::rng::DeterministicRng;
use valentine_core::scheduler::{Scheduler, TimerId};

use super::ports::StoryTimer;

/// Interval between two hearts.
pub const HEART_INTERVAL: Duration = Duration::from_millis(320);
/// How long the renderer keeps a heart before removing it.
pub const HEART_LIFETIME_MS: u32 = 6_500;

const GLYPHS: [&str; 4] = ["💖", "💘", "💕", "❤️"];

/// One heart for the renderer to animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heart {
    /// Horizontal start, in percent of viewport width.
    pub left_vw: u32,
    pub font_px: u32,
    pub fall_ms: u32,
    pub glyph: String,
    /// Time after which the renderer removes the heart.
    pub lifetime_ms: u32,
}

impl Heart {
    fn random(rng: &mut dyn DeterministicRng) -> Self {
        let left_vw = rng.next_u32_range(0, 100);
        let font_px = rng.next_u32_range(16, 30);
        let fall_ms = rng.next_u32_range(3_200, 5_600);
        let glyph = rng.next_u32_range(0, 3);
        Self {
            left_vw,
            font_px,
            fall_ms,
            glyph: GLYPHS[usize::try_from(glyph).unwrap_or(0).min(GLYPHS.len() - 1)].to_owned(),
            lifetime_ms: HEART_LIFETIME_MS,
        }
    }
}

/// Repeating emitter built from re-armed one-shot timers.
#[derive(Debug, Default)]
pub struct HeartEmitter {
    pending: Option<TimerId>,
}

impl HeartEmitter {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts emitting unless already running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler<StoryTimer>) {
        if self.pending.is_none() {
            self.pending = Some(scheduler.schedule(HEART_INTERVAL, StoryTimer::Heart));
        }
    }

    pub fn stop(&mut self, scheduler: &mut dyn Scheduler<StoryTimer>) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Handles a tick: produces a heart and re-arms. Stale ids yield `None`.
    pub fn on_fired(
        &mut self,
        id: TimerId,
        rng: &mut dyn DeterministicRng,
        scheduler: &mut dyn Scheduler<StoryTimer>,
    ) -> Option<Heart> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = Some(scheduler.schedule(HEART_INTERVAL, StoryTimer::Heart));
        Some(Heart::random(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valentine_test_support::{ManualScheduler, SequenceRng};

    #[test]
    fn test_tick_emits_heart_and_rearms() {
        // Arrange
        let mut scheduler = ManualScheduler::<StoryTimer>::new();
        let mut rng = SequenceRng::new(vec![50, 20, 4_000, 2]);
        let mut hearts = HeartEmitter::default();
        hearts.start(&mut scheduler);

        // Act
        let (_, id, _) = scheduler.fire_next().unwrap();
        let heart = hearts.on_fired(id, &mut rng, &mut scheduler);

        // Assert
        assert_eq!(
            heart,
            Some(Heart {
                left_vw: 50,
                font_px: 20,
                fall_ms: 4_000,
                glyph: "💕".to_owned(),
                lifetime_ms: HEART_LIFETIME_MS,
            })
        );
        assert!(hearts.is_running());
        assert_eq!(scheduler.pending_offsets(), vec![HEART_INTERVAL]);
    }

    #[test]
    fn test_stop_cancels_and_ignores_late_tick() {
        let mut scheduler = ManualScheduler::<StoryTimer>::new();
        let mut hearts = HeartEmitter::default();
        hearts.start(&mut scheduler);
        let (_, id, _) = scheduler.fire_next().unwrap();

        hearts.stop(&mut scheduler);

        assert!(!hearts.is_running());
        assert_eq!(hearts.on_fired(id, &mut SequenceRng::new(vec![]), &mut scheduler), None);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
