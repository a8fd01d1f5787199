//! The evasive decline control.
//!
//! Every interaction attempt moves the control to a new random spot inside
//! the arena and bumps the attempt count. The count drives the control's
//! label, the growth of the affirmative control, and two thresholds the
//! session reacts to: a transient notice and a forced escape from the
//! confirmation screen.

use serde::{Deserialize, Serialize};
use valentine_core::rng::DeterministicRng;

/// Width of the evasive control.
pub const CONTROL_WIDTH: u32 = 140;
/// Height of the evasive control.
pub const CONTROL_HEIGHT: u32 = 52;
/// Gap kept between the control and every arena edge.
pub const ARENA_PADDING: u32 = 12;
/// Arenas narrower than this use the compact layout.
pub const COMPACT_WIDTH: u32 = 520;
/// Horizontal cap on the usable range in the compact layout.
pub const COMPACT_MAX_X: u32 = 240;
/// Vertical cap on the usable range in the compact layout.
pub const COMPACT_MAX_Y: u32 = 190;

/// Labels shown on the decline control, by attempt count. Saturates at the
/// last entry.
pub const DECLINE_LABELS: [&str; 8] = [
    "No",
    "Are you sure?",
    "Think it over",
    "Don't be mean",
    "Come on, say yes",
    "Last chance",
    "Okay but look how pretty",
    "You're making a mistake 😤",
];

const SCALE_STEP: f64 = 0.06;
const SCALE_MAX: f64 = 1.6;

/// Size of the area the control moves in, as reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub width: u32,
    pub height: u32,
}

impl ArenaBounds {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Small viewports get a capped placement range.
    #[must_use]
    pub fn is_compact(self) -> bool {
        self.width < COMPACT_WIDTH
    }
}

/// Offset of the control's top-left corner within the arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// Position and attempt count for one confirmation episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvasionState {
    pub position: Position,
    pub attempt_count: u32,
}

/// What the session must do after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// Nothing special.
    None,
    /// Show the transient notice.
    Toast,
    /// Leave the confirmation screen.
    Escape,
}

/// Inclusive placement range along one axis.
fn axis_range(extent: u32, control: u32, compact_cap: Option<u32>) -> (u32, u32) {
    let lo = ARENA_PADDING;
    let mut hi = extent.saturating_sub(control + ARENA_PADDING);
    if let Some(cap) = compact_cap {
        hi = hi.min(cap);
    }
    (lo, hi.max(lo))
}

/// Picks a uniformly random position keeping the control's whole box inside
/// the padded arena (and inside the compact caps when `compact` is set).
pub fn place(bounds: ArenaBounds, compact: bool, rng: &mut dyn DeterministicRng) -> Position {
    let (x_lo, x_hi) = axis_range(bounds.width, CONTROL_WIDTH, compact.then_some(COMPACT_MAX_X));
    let (y_lo, y_hi) = axis_range(
        bounds.height,
        CONTROL_HEIGHT,
        compact.then_some(COMPACT_MAX_Y),
    );
    Position {
        x: rng.next_u32_range(x_lo, x_hi),
        y: rng.next_u32_range(y_lo, y_hi),
    }
}

impl EvasionState {
    /// Moves the control and counts one more attempt. The count never
    /// decreases; a fresh episode starts from `EvasionState::default()`.
    #[must_use]
    pub fn relocate(
        self,
        bounds: ArenaBounds,
        compact: bool,
        rng: &mut dyn DeterministicRng,
    ) -> Self {
        Self {
            position: place(bounds, compact, rng),
            attempt_count: self.attempt_count + 1,
        }
    }

    /// Classifies the current count against the configured thresholds.
    #[must_use]
    pub fn milestone(self, toast_threshold: u32, evasion_threshold: u32) -> Milestone {
        if self.attempt_count == evasion_threshold {
            Milestone::Escape
        } else if self.attempt_count == toast_threshold {
            Milestone::Toast
        } else {
            Milestone::None
        }
    }
}

/// Label for the decline control after `attempt_count` attempts.
#[must_use]
pub fn label_for(attempt_count: u32) -> &'static str {
    let index = usize::try_from(attempt_count).map_or(DECLINE_LABELS.len() - 1, |n| {
        n.min(DECLINE_LABELS.len() - 1)
    });
    DECLINE_LABELS[index]
}

/// Presentation scale of the affirmative control.
#[must_use]
pub fn affirm_scale(attempt_count: u32) -> f64 {
    (1.0 + f64::from(attempt_count) * SCALE_STEP).min(SCALE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use valentine_core::rng::SystemRng;
    use valentine_test_support::{MockRng, SequenceRng};

    #[test]
    fn test_first_eight_labels_follow_the_list() {
        for (n, expected) in DECLINE_LABELS.iter().enumerate() {
            assert_eq!(label_for(u32::try_from(n).unwrap()), *expected);
        }
    }

    #[test]
    fn test_affirm_scale_grows_then_caps() {
        assert!((affirm_scale(0) - 1.0).abs() < f64::EPSILON);
        assert!((affirm_scale(5) - 1.3).abs() < 1e-9);
        assert!((affirm_scale(10) - 1.6).abs() < 1e-9);
        assert!((affirm_scale(40) - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_relocate_increments_attempt_count_by_one() {
        // Arrange
        let bounds = ArenaBounds::new(600, 360);
        let mut state = EvasionState::default();

        // Act
        for _ in 0..5 {
            state = state.relocate(bounds, false, &mut MockRng);
        }

        // Assert
        assert_eq!(state.attempt_count, 5);
        assert_eq!(state.position, Position { x: 12, y: 12 });
    }

    #[test]
    fn test_relocate_uses_full_padded_range_on_wide_arena() {
        let bounds = ArenaBounds::new(600, 360);
        let mut rng = SequenceRng::new(vec![10_000, 10_000]);

        let state = EvasionState::default().relocate(bounds, false, &mut rng);

        assert_eq!(state.position, Position { x: 448, y: 296 });
    }

    #[test]
    fn test_relocate_caps_range_on_compact_layout() {
        let bounds = ArenaBounds::new(480, 600);
        let mut rng = SequenceRng::new(vec![10_000, 10_000]);

        let state = EvasionState::default().relocate(bounds, bounds.is_compact(), &mut rng);

        assert_eq!(state.position, Position { x: 240, y: 190 });
    }

    #[test]
    fn test_place_pins_to_padding_when_arena_is_too_small() {
        let bounds = ArenaBounds::new(100, 40);
        let mut rng = SequenceRng::new(vec![10_000, 10_000]);

        let position = place(bounds, true, &mut rng);

        assert_eq!(position, Position { x: 12, y: 12 });
    }

    #[test]
    fn test_milestone_reports_thresholds() {
        let at = |attempt_count| EvasionState {
            position: Position::default(),
            attempt_count,
        };

        assert_eq!(at(7).milestone(8, 12), Milestone::None);
        assert_eq!(at(8).milestone(8, 12), Milestone::Toast);
        assert_eq!(at(12).milestone(8, 12), Milestone::Escape);
    }

    proptest! {
        #[test]
        fn prop_label_saturates_at_last_entry(n in any::<u32>()) {
            prop_assert_eq!(label_for(n), label_for(n.min(7)));
        }

        #[test]
        fn prop_relocated_box_stays_inside_padded_arena(
            width in 164u32..2_000,
            height in 76u32..2_000,
            seed in any::<u64>(),
        ) {
            let bounds = ArenaBounds::new(width, height);
            let compact = bounds.is_compact();
            let mut rng = SystemRng::seeded(seed);

            let state = EvasionState::default().relocate(bounds, compact, &mut rng);
            let Position { x, y } = state.position;

            prop_assert!(x >= ARENA_PADDING);
            prop_assert!(y >= ARENA_PADDING);
            prop_assert!(x + CONTROL_WIDTH + ARENA_PADDING <= width);
            prop_assert!(y + CONTROL_HEIGHT + ARENA_PADDING <= height);
            if compact {
                prop_assert!(x <= COMPACT_MAX_X);
                prop_assert!(y <= COMPACT_MAX_Y);
            }
        }
    }
}
