//! Noise-driven wave surface for the two parallax layers.

use crate::config::LiquidConfig;
use crate::constants::*;
use crate::dynamics::velocity_norm;
use crate::noise::NoiseField;
use glam::DVec2;

/// Per-layer parameters, derived fresh every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerConfig {
    pub vertical_lift: f64,
    pub amplitude_scale: f64,
    pub fill_alpha: f64,
    pub scroll_offset: f64,
}

impl LayerConfig {
    /// Higher on screen, slightly smaller and more transparent.
    pub fn back(back_lift: f64, dpr: f64, scroll_offset: f64) -> Self {
        Self {
            vertical_lift: back_lift * dpr,
            amplitude_scale: BACK_AMP_SCALE,
            fill_alpha: BACK_ALPHA,
            scroll_offset,
        }
    }

    pub fn front(scroll_offset: f64) -> Self {
        Self {
            vertical_lift: 0.0,
            amplitude_scale: 1.0,
            fill_alpha: FRONT_ALPHA,
            scroll_offset,
        }
    }
}

/// Frame-level wave amplitude in pixels. Faster level motion makes
/// visibly larger waves.
pub fn wave_amplitude(height: f64, velocity: f64, goal: f64, wave: f64) -> f64 {
    height * (BASE_AMP_FRAC + velocity_norm(velocity, goal) * VELOCITY_AMP_FRAC) * wave
}

/// Horizontal distance between samples, coarsened on wide surfaces.
pub fn sample_step(width: u32) -> u32 {
    (width / WAVE_SAMPLES_ACROSS).max(1)
}

/// Samples the surface height profile for one layer.
pub struct WaveSurface<'a> {
    noise: &'a NoiseField,
    spatial_scale: f64,
    time_scale: f64,
    lumps: f64,
}

impl<'a> WaveSurface<'a> {
    pub fn new(noise: &'a NoiseField, config: &LiquidConfig, dpr: f64) -> Self {
        let freq_scale = 1.0 + (config.turbulence - 1.0) * WAVE_TURBULENCE_FREQ_GAIN;
        Self {
            noise,
            spatial_scale: WAVE_SPATIAL_SCALE * dpr * freq_scale,
            time_scale: WAVE_TIME_SCALE * config.turbulence,
            lumps: config.lumps,
        }
    }

    /// Height at pixel column `x` for a layer resting at `level_y`.
    pub fn height_at(&self, x: f64, level_y: f64, amp: f64, scroll: f64, time: f64) -> f64 {
        let n = self.noise;
        let nx = (x + scroll) * self.spatial_scale;
        let ty = self.time_scale;
        let warp = n.fbm(
            nx * WARP_FREQ + WARP_OFFSET_X,
            time * WARP_TIME_SCALE + WARP_OFFSET_T,
            WARP_OCTAVES,
            WARP_PERSISTENCE,
        ) * self.lumps
            * WARP_GAIN;

        let [w0, w1, w2] = WAVE_TERM_WEIGHTS;
        let [o0, o1, o2] = WAVE_TERM_OCTAVES;
        let [p0, p1, p2] = WAVE_TERM_PERSISTENCE;
        let broad = n.fbm(nx + warp, time * ty, o0, p0);
        let mid = n.fbm(nx * 1.9 + 10.3 + warp * 0.8, time * ty * 0.63 + 3.7, o1, p1);
        let fine = n.fbm(nx * 3.3 - 5.1 + warp * 1.2, time * ty * 0.41 + 1.1, o2, p2);
        level_y + (broad * w0 + mid * w1 + fine * w2) * amp
    }

    /// Polyline across `0..=width`, one point per `sample_step(width)` pixels.
    pub fn profile(
        &self,
        width: u32,
        level_y: f64,
        amp: f64,
        scroll: f64,
        time: f64,
        out: &mut Vec<DVec2>,
    ) {
        out.clear();
        let step = sample_step(width) as usize;
        for x in (0..=width).step_by(step) {
            let xf = x as f64;
            out.push(DVec2::new(xf, self.height_at(xf, level_y, amp, scroll, time)));
        }
    }
}
