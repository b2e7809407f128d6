//! Damped spring pulling the displayed level toward its target.
//!
//! `a = k (target - level) - c v`, integrated with semi-implicit Euler. With
//! `c < 2 sqrt(k)` the level overshoots and settles, which is what gives
//! the liquid its weight. The step is only stable for small `dt`, so the
//! engine clamps `dt` to `MAX_STEP_SEC` before calling in here.

use crate::constants::{BASELINE_EMPTY_FRAC, BASELINE_FULL_FRAC};
use crate::noise::lerp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelDynamics {
    pub stiffness: f64,
    pub damping: f64,
}

impl LevelDynamics {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }

    #[inline]
    pub fn acceleration(&self, level: f64, velocity: f64, target: f64) -> f64 {
        self.stiffness * (target - level) - self.damping * velocity
    }

    /// Advance `(level, velocity)` by one step of `dt` seconds.
    pub fn step(&self, level: &mut f64, velocity: &mut f64, target: f64, dt: f64) {
        let a = self.acceleration(*level, *velocity, target);
        *velocity += a * dt;
        *level += *velocity * dt;
    }

    /// Damping ratio `c / (2 sqrt(k))`; 1 is critical.
    pub fn damping_ratio(&self) -> f64 {
        if self.stiffness <= 0.0 {
            return f64::INFINITY;
        }
        self.damping / (2.0 * self.stiffness.sqrt())
    }
}

/// Fill fraction of the visual column, `0` when the goal is degenerate.
///
/// Unclamped above: during overshoot this exceeds `1`.
#[inline]
pub fn fill_fraction(level: f64, goal: f64, normalization: f64) -> f64 {
    let full = goal * normalization;
    if goal <= 0.0 || !full.is_finite() || full <= 0.0 {
        return 0.0;
    }
    level.max(0.0) / full
}

/// Displayed percent, `round(100 * level / (goal * normalization))`.
///
/// Not clamped to 100, so it can read e.g. 103 while the level bounces.
pub fn displayed_percent(level: f64, goal: f64, normalization: f64) -> u32 {
    let p = fill_fraction(level, goal, normalization) * 100.0;
    if p.is_finite() {
        p.round() as u32
    } else {
        0
    }
}

/// Vertical pixel position of the resting surface for the given level.
pub fn baseline_y(height: f64, level: f64, goal: f64, normalization: f64) -> f64 {
    lerp(
        height * BASELINE_EMPTY_FRAC,
        height * BASELINE_FULL_FRAC,
        fill_fraction(level, goal, normalization),
    )
}

/// `|velocity|` relative to the goal, in `[0, 1]`.
pub fn velocity_norm(velocity: f64, goal: f64) -> f64 {
    let scale = if goal != 0.0 { goal } else { 1.0 };
    let n = velocity.abs() / scale;
    if n.is_finite() {
        n.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
