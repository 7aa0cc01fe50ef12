//! Difficulty: scroll speed as a saturating function of score

use crate::tuning::Tuning;

/// Scroll speed for a score: linear ramp from the base speed, capped
#[inline]
pub fn current_speed(score: u64, tuning: &Tuning) -> f32 {
    (tuning.base_speed + score as f32 * tuning.speed_gain).min(tuning.max_speed)
}
