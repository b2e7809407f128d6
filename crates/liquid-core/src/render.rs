//! Frame compositing: background, back and front wave layers, bubbles.

use crate::bubbles::BubbleField;
use crate::color::{hex_to_rgba, shade};
use crate::config::{BackgroundConfig, BackgroundKind, LiquidConfig};
use crate::constants::BACK_SHADE;
use crate::dynamics::baseline_y;
use crate::noise::NoiseField;
use crate::state::SimulationState;
use crate::surface::{CompositeMode, LinearGradient, Paint, Path, Surface};
use crate::waves::{wave_amplitude, LayerConfig, WaveSurface};
use glam::DVec2;

/// Everything a frame is drawn from.
pub struct FrameView<'a> {
    pub config: &'a LiquidConfig,
    pub noise: &'a NoiseField,
    pub state: &'a SimulationState,
    pub goal: f64,
    pub bubbles: &'a BubbleField,
    pub dpr: f64,
}

/// Paints frames. Only a scratch sample buffer survives between frames.
#[derive(Default)]
pub struct Renderer {
    samples: Vec<DVec2>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S, view: &FrameView<'_>) {
        let (wpx, hpx) = surface.pixel_size();
        let (w, h) = (wpx as f64, hpx as f64);
        let dpr = view.dpr;
        let cfg = view.config;
        let s = view.state;

        surface.clear(0.0, 0.0, w, h);
        surface.save();
        surface.clip(&Path::rounded_rect(0.0, 0.0, w, h, cfg.radius * dpr));

        paint_background(surface, &cfg.background, w, h);

        let base = baseline_y(h, s.level, view.goal, cfg.normalization);
        let amp = wave_amplitude(h, s.velocity, view.goal, cfg.wave);

        let back_paint = Paint::Gradient(LinearGradient::across(
            w,
            h,
            cfg.gradient_angle,
            &shade(&cfg.gradient_from, BACK_SHADE),
            &shade(&cfg.gradient_to, BACK_SHADE),
        ));
        let front_paint = Paint::Gradient(LinearGradient::across(
            w,
            h,
            cfg.gradient_angle,
            &cfg.gradient_from,
            &cfg.gradient_to,
        ));

        let waves = WaveSurface::new(view.noise, cfg, dpr);
        let back = LayerConfig::back(cfg.back_lift, dpr, s.scroll_back);
        let front = LayerConfig::front(s.scroll_front);
        self.draw_layer(surface, &waves, &back, base, amp, s.time, &back_paint);
        self.draw_layer(surface, &waves, &front, base, amp, s.time, &front_paint);

        if cfg.bubbles.enabled {
            surface.save();
            surface.set_composite(CompositeMode::SourceAtop);
            draw_bubbles(surface, view.bubbles, base);
            surface.restore();
        }

        surface.restore();
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_layer<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        waves: &WaveSurface<'_>,
        layer: &LayerConfig,
        base: f64,
        amp: f64,
        time: f64,
        paint: &Paint,
    ) {
        let (wpx, hpx) = surface.pixel_size();
        let (w, h) = (wpx as f64, hpx as f64);
        let level_y = base - layer.vertical_lift;
        waves.profile(
            wpx,
            level_y,
            amp * layer.amplitude_scale,
            layer.scroll_offset,
            time,
            &mut self.samples,
        );

        let mut path = Path::with_capacity(self.samples.len() + 4);
        path.move_to(0.0, h).line_to(0.0, level_y);
        for p in &self.samples {
            path.line_to(p.x, p.y);
        }
        path.line_to(w, h).close();

        surface.set_global_alpha(layer.fill_alpha);
        surface.fill_path(&path, paint);
        surface.set_global_alpha(1.0);
    }
}

fn paint_background<S: Surface + ?Sized>(surface: &mut S, bg: &BackgroundConfig, w: f64, h: f64) {
    let paint = match bg.kind {
        BackgroundKind::None => return,
        BackgroundKind::Solid => Paint::Color(hex_to_rgba(&bg.color, 1.0)),
        BackgroundKind::Linear => {
            Paint::Gradient(LinearGradient::across(w, h, bg.angle, &bg.from, &bg.to))
        }
    };
    surface.save();
    surface.set_global_alpha(bg.alpha);
    surface.fill_rect(0.0, 0.0, w, h, &paint);
    surface.restore();
}

// Bubbles above the baseline are skipped; `source-atop` keeps the rest
// inside the painted liquid.
fn draw_bubbles<S: Surface + ?Sized>(surface: &mut S, field: &BubbleField, base: f64) {
    for b in field.bubbles() {
        if b.pos.y < base {
            continue;
        }
        let mut path = Path::with_capacity(1);
        path.circle(b.pos, b.radius);
        surface.set_global_alpha(b.alpha);
        surface.fill_path(&path, &Paint::Color(hex_to_rgba(&b.color, b.alpha)));
        surface.set_global_alpha(1.0);
    }
}
