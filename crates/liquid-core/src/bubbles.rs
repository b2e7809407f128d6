//! Rising bubbles inside the liquid body.
//!
//! Spawning uses a fractional accumulator so the long-run count matches
//! `rate * t` whatever the frame rate. Bubbles rise at a constant speed with
//! a sinusoidal sideways wobble and are culled once they leave the liquid.

use crate::color::shade;
use crate::config::{BubbleColor, BubbleConfig};
use crate::constants::{BUBBLE_AUTO_SHADE, BUBBLE_PHASE_RATE, MAX_SPAWN_PER_STEP};
use crate::state::coerce_non_negative;
use glam::DVec2;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub pos: DVec2,
    pub radius: f64,
    /// Negative is upward.
    pub vertical_velocity: f64,
    pub drift: f64,
    pub phase: f64,
    pub alpha: f64,
    pub color: String,
}

impl Bubble {
    fn advance(&mut self, dt: f64) {
        self.phase += dt * BUBBLE_PHASE_RATE;
        self.pos.x += self.phase.sin() * self.drift * dt;
        self.pos.y += self.vertical_velocity * dt;
    }

    /// Fully above the liquid surface, or off the top of the surface.
    pub fn has_left(&self, baseline: f64) -> bool {
        self.pos.y < baseline - self.radius || self.pos.y + self.radius < 0.0
    }
}

/// Geometry the spawner needs from the current frame.
#[derive(Clone, Copy, Debug)]
pub struct SpawnArea<'a> {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
    pub baseline: f64,
    /// Source for the `auto` bubble color.
    pub gradient_from: &'a str,
}

#[derive(Clone, Debug, Default)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    accumulator: f64,
    spawned: u64,
}

// `a + r * (b - a)`; tolerates `b < a` where a range sampler would panic.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    a + rng.gen::<f64>() * (b - a)
}

impl BubbleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Total bubbles emitted since construction.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
        self.accumulator = 0.0;
    }

    /// Spawn, move and cull for one step. Does nothing while disabled.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        config: &BubbleConfig,
        area: &SpawnArea<'_>,
        rng: &mut R,
    ) {
        if !config.enabled {
            return;
        }
        self.accumulator += coerce_non_negative(config.rate) * coerce_non_negative(dt);
        let mut budget = MAX_SPAWN_PER_STEP;
        while self.accumulator >= 1.0 {
            if budget == 0 {
                self.accumulator = self.accumulator.fract();
                break;
            }
            let bubble = Self::spawn_one(config, area, rng);
            self.bubbles.push(bubble);
            self.spawned += 1;
            self.accumulator -= 1.0;
            budget -= 1;
        }

        let baseline = area.baseline;
        self.bubbles.retain_mut(|b| {
            b.advance(dt);
            !b.has_left(baseline)
        });
    }

    fn spawn_one<R: Rng + ?Sized>(config: &BubbleConfig, area: &SpawnArea<'_>, rng: &mut R) -> Bubble {
        let d = area.dpr;
        let radius = uniform(rng, config.min_radius, config.max_radius) * d;
        let x = rng.gen::<f64>() * area.width;
        let y = uniform(rng, area.baseline + radius, area.height - radius);
        let vertical_velocity = -uniform(rng, config.min_rise_speed, config.max_rise_speed) * d;
        let phase = rng.gen::<f64>() * std::f64::consts::TAU;
        let color = match &config.color {
            BubbleColor::Auto => shade(area.gradient_from, BUBBLE_AUTO_SHADE),
            BubbleColor::Fixed(c) => c.clone(),
        };
        Bubble {
            pos: DVec2::new(x, y),
            radius,
            vertical_velocity,
            drift: config.drift * d,
            phase,
            alpha: config.alpha.clamp(0.0, 1.0),
            color,
        }
    }
}
