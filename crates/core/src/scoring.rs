//! Scoring module - score, level, combo and fall-speed arithmetic
//!
//! Pure functions over plain numbers. The engine feeds each placement's
//! cleared-line count through [`Progress::after_placement`].

use serde::{Deserialize, Serialize};

use crate::types::{FALL_INTERVAL_FLOOR_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_FALL_INTERVAL_MS};

/// Points for one placement.
///
/// `level` is the level in effect before the cleared lines are counted.
///
/// # Panics
///
/// Panics if `lines_cleared > 4`; a single piece cannot complete more rows.
pub fn score_delta(lines_cleared: u8, level: u32) -> u32 {
    assert!(
        (lines_cleared as usize) < LINE_SCORES.len(),
        "a placement cannot clear {lines_cleared} lines"
    );
    LINE_SCORES[lines_cleared as usize].saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines (starts at 1)
pub fn next_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Combo after a placement: grows on any clear, resets to 0 otherwise
pub fn next_combo(combo: u32, lines_cleared: u8) -> u32 {
    if lines_cleared > 0 {
        combo.saturating_add(1)
    } else {
        0
    }
}

/// Milliseconds between automatic one-row gravity steps.
///
/// `max(50, floor(max(100, base - (level - 1) * step) / multiplier))`
pub fn fall_interval_ms(
    level: u32,
    speed_multiplier: f64,
    base_speed_ms: u32,
    speed_step_ms: u32,
) -> u64 {
    let reduction = i64::from(level.saturating_sub(1)) * i64::from(speed_step_ms);
    let level_interval = (i64::from(base_speed_ms) - reduction).max(i64::from(FALL_INTERVAL_FLOOR_MS));
    // `as` saturates for out-of-range floats
    let scaled = (level_interval as f64 / speed_multiplier).floor() as u64;
    scaled.max(u64::from(MIN_FALL_INTERVAL_MS))
}

/// Running totals for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub tetris_count: u32,
    pub combo: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            tetris_count: 0,
            combo: 0,
        }
    }

    /// Totals after a placement that cleared `lines_cleared` rows
    pub fn after_placement(&self, lines_cleared: u8) -> PlacementOutcome {
        let delta = score_delta(lines_cleared, self.level);
        let lines = self.lines.saturating_add(u32::from(lines_cleared));
        let tetris_count = if lines_cleared == 4 {
            self.tetris_count.saturating_add(1)
        } else {
            self.tetris_count
        };

        PlacementOutcome {
            progress: Progress {
                score: self.score.saturating_add(delta),
                level: next_level(lines),
                lines,
                tetris_count,
                combo: next_combo(self.combo, lines_cleared),
            },
            lines_cleared,
            score_delta: delta,
            previous_level: self.level,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// What one placement did to the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Totals after the placement
    pub progress: Progress,
    pub lines_cleared: u8,
    pub score_delta: u32,
    pub previous_level: u32,
}

impl PlacementOutcome {
    pub fn is_tetris(&self) -> bool {
        self.lines_cleared == 4
    }

    pub fn leveled_up(&self) -> bool {
        self.progress.level > self.previous_level
    }

    pub fn combo_reset(&self) -> bool {
        self.lines_cleared == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_score_table() {
        assert_eq!(score_delta(0, 1), 0);
        assert_eq!(score_delta(1, 1), 100);
        assert_eq!(score_delta(2, 1), 300);
        assert_eq!(score_delta(3, 1), 500);
        assert_eq!(score_delta(4, 1), 800);
        assert_eq!(score_delta(4, 3), 2400);
    }

    #[test]
    #[should_panic]
    fn test_five_lines_is_a_defect() {
        score_delta(5, 1);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(next_level(0), 1);
        assert_eq!(next_level(9), 1);
        assert_eq!(next_level(10), 2);
        assert_eq!(next_level(27), 3);
        assert_eq!(next_level(100), 11);
    }

    #[test]
    fn test_combo_sequence() {
        let mut progress = Progress::new();
        let mut combos = Vec::new();
        for lines in [1, 2, 0, 4] {
            progress = progress.after_placement(lines).progress;
            combos.push(progress.combo);
        }
        assert_eq!(combos, vec![1, 2, 0, 1]);
        assert_eq!(progress.tetris_count, 1);
    }

    #[test]
    fn test_tetris_at_level_one() {
        let outcome = Progress::new().after_placement(4);
        assert_eq!(outcome.score_delta, 800);
        assert_eq!(outcome.progress.tetris_count, 1);
        assert_eq!(outcome.progress.combo, 1);
        assert!(outcome.is_tetris());
        assert!(!outcome.leveled_up());
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let progress = Progress {
            lines: 8,
            ..Progress::new()
        };
        let outcome = progress.after_placement(2);
        assert_eq!(outcome.score_delta, 300);
        assert_eq!(outcome.progress.level, 2);
        assert_eq!(outcome.previous_level, 1);
        assert!(outcome.leveled_up());
    }

    #[test]
    fn test_fall_interval_clamps() {
        assert_eq!(fall_interval_ms(1, 1.0, 1000, 100), 1000);
        assert_eq!(fall_interval_ms(5, 1.0, 1000, 100), 600);
        // Level floor at 100ms
        assert_eq!(fall_interval_ms(10, 1.0, 1000, 100), 100);
        assert_eq!(fall_interval_ms(50, 1.0, 1000, 100), 100);
        // Multiplier applies after the level floor, absolute floor 50ms
        assert_eq!(fall_interval_ms(50, 1.5, 1000, 100), 66);
        assert_eq!(fall_interval_ms(50, 4.0, 1000, 100), 50);
        assert_eq!(fall_interval_ms(1, 0.5, 1000, 100), 2000);
        assert_eq!(fall_interval_ms(1, 3.0, 1000, 100), 333);
    }

    proptest! {
        #[test]
        fn fall_interval_never_speeds_up_with_level(
            level in 1u32..200,
            multiplier in 0.1f64..20.0,
        ) {
            let now = fall_interval_ms(level, multiplier, 1000, 100);
            let next = fall_interval_ms(level + 1, multiplier, 1000, 100);
            prop_assert!(next <= now);
            prop_assert!(now >= u64::from(MIN_FALL_INTERVAL_MS));
        }

        #[test]
        fn progress_totals_only_grow(clears in prop::collection::vec(0u8..5, 0..64)) {
            let mut progress = Progress::new();
            for lines in clears {
                let outcome = progress.after_placement(lines);
                prop_assert!(outcome.progress.score >= progress.score);
                prop_assert_eq!(outcome.progress.lines, progress.lines + u32::from(lines));
                prop_assert_eq!(outcome.progress.level, next_level(outcome.progress.lines));
                progress = outcome.progress;
            }
        }
    }
}
