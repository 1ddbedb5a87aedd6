//! Difficulty curve
//!
//! Everything here is a pure function of the current score (or of the speed
//! multiplier derived from it), so difficulty is always reproducible from
//! `score` alone.

use crate::consts::{BASE_SPEED, SPEED_MUL_MAX};

/// Score needed for each `SPEED_STEP` of extra speed
const SCORE_PER_STEP: f64 = 1200.0;
const SPEED_STEP: f64 = 0.18;

/// Speed multiplier for a cumulative score, in `[1, SPEED_MUL_MAX]`
pub fn speed_mul(score: f64) -> f32 {
    let mul = 1.0 + (score / SCORE_PER_STEP) * SPEED_STEP;
    if mul.is_nan() {
        return 1.0;
    }
    (mul as f32).clamp(1.0, SPEED_MUL_MAX)
}

/// Horizontal scroll rate applied to every obstacle (px/s)
#[inline]
pub fn world_speed(speed_mul: f32) -> f32 {
    BASE_SPEED * speed_mul
}

/// Probability that a spawn is a bird. Zero until the multiplier passes 1.2.
pub fn bird_chance(speed_mul: f32) -> f32 {
    ((speed_mul - 1.2) / 2.2).clamp(0.0, 0.55)
}

/// Probability that a ground obstacle is the tall variant
pub fn tall_chance(speed_mul: f32) -> f32 {
    ((speed_mul - 1.0) / 2.0).clamp(0.0, 0.6)
}

/// Spawn gap scale; shrinks with speed down to a floor of 0.55
pub fn spawn_density(speed_mul: f32) -> f32 {
    (1.15 - (speed_mul - 1.0) * 0.22).clamp(0.55, 1.15)
}

/// Seconds until the next spawn attempt. `jitter` is drawn from `[0.75, 1.25)`.
pub fn spawn_interval(speed_mul: f32, jitter: f32) -> f32 {
    jitter * spawn_density(speed_mul) * (520.0 / world_speed(speed_mul))
}
