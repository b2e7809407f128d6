//! Simulation and target records.
//!
//! `SimulationState` is written only by the per-frame step. Control
//! operations write to `TargetState`, which the step reads.

use crate::noise::lerp;
use serde::{Deserialize, Serialize};

/// Per-frame physical state owned by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationState {
    pub level: f64,
    pub velocity: f64,
    pub time: f64,
    pub scroll_back: f64,
    pub scroll_front: f64,
    pub running: bool,
}

/// An explicit eased move of the target value.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub elapsed: f64,
}

impl Transition {
    /// Advance by `dt` and return the interpolated value plus whether the
    /// transition has run to completion.
    pub fn advance(&mut self, dt: f64) -> (f64, bool) {
        self.elapsed += dt;
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        (lerp(self.from, self.to, t), t >= 1.0)
    }
}

/// What the liquid is being driven toward.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetState {
    pub goal: f64,
    pub value: f64,
    pub transition: Option<Transition>,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            goal: 100.0,
            value: 0.0,
            transition: None,
        }
    }
}

/// Transferable state, as returned by `LiquidGoal::state`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub goal: f64,
    pub value: f64,
    #[serde(alias = "percent")]
    pub displayed_percent: u32,
    pub level: f64,
    pub velocity: f64,
}

/// Partial state accepted by `LiquidGoal::restore`. Missing fields are left
/// untouched; the displayed percent is always derived, never restored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreState {
    pub goal: Option<f64>,
    pub value: Option<f64>,
    pub level: Option<f64>,
    pub velocity: Option<f64>,
}

impl From<Snapshot> for RestoreState {
    fn from(s: Snapshot) -> Self {
        Self {
            goal: Some(s.goal),
            value: Some(s.value),
            level: Some(s.level),
            velocity: Some(s.velocity),
        }
    }
}

/// Coerce host input to a finite, non-negative number.
#[inline]
pub fn coerce_non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Coerce host input to a finite number, keeping the sign.
#[inline]
pub fn coerce_finite(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
