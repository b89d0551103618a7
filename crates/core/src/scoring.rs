//! Scoring module - line clear points, level progression, gravity intervals
//!
//! Two rule sets are supported: the classic base-points table
//! multiplied by the current level, and a flat 100-points-per-line rule.
//! Level is 1-based and derived from cumulative cleared lines.

use crate::types::{
    ScoreRules, BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_PER_LEVEL_MS, FLAT_LINE_SCORE,
    LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_DIVISOR,
};

/// Points awarded for clearing `lines` rows in one lock event
///
/// `level` is the level in effect when the lock happened (1-based). The
/// classic rule multiplies the `[40, 100, 300, 1200]` table by the level;
/// the flat rule pays 100 per line regardless of level.
pub fn line_clear_score(lines: usize, level: u32, rules: ScoreRules) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    match rules {
        ScoreRules::Classic => LINE_SCORES[lines].saturating_mul(level),
        ScoreRules::Flat => FLAT_LINE_SCORE * lines as u32,
    }
}

/// Level for a cumulative line count: one level per ten lines, starting at 1
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds
///
/// `max(100, 800 - (level - 1) * 50)`; levels past 15 all sit on the floor.
pub fn drop_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1).saturating_mul(DROP_STEP_PER_LEVEL_MS);
    BASE_DROP_MS.saturating_sub(steps).max(DROP_INTERVAL_MIN_MS)
}

/// Gravity interval while a soft drop is held
pub fn soft_drop_interval_ms(base_interval: u32) -> u32 {
    (base_interval / SOFT_DROP_DIVISOR).max(1)
}
