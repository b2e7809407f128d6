//! The liquid-goal engine: control API plus the per-frame simulation loop.
//!
//! One host-driven `tick` per display refresh advances the level spring,
//! the bubbles and the wave scroll, emits lifecycle events and repaints.
//! Control operations only touch the target and configuration records;
//! the simulation state is written by `step` alone (plus the explicit
//! snap operations `reset`, `jump_to` and `restore`).

use crate::bubbles::{BubbleField, SpawnArea};
use crate::config::{BackgroundPatch, ConfigPatch, LiquidConfig};
use crate::constants::{
    DEFAULT_TRANSITION_SEC, MAX_STEP_SEC, MIN_SURFACE_PX, MIN_TRANSITION_SEC, PROGRESS_EPSILON,
};
use crate::dynamics::{baseline_y, displayed_percent, LevelDynamics};
use crate::events::{EventSink, LiquidEvent, StepPayload, ValuePayload};
use crate::noise::NoiseField;
use crate::render::{FrameView, Renderer};
use crate::state::{
    coerce_finite, coerce_non_negative, RestoreState, SimulationState, Snapshot, TargetState,
    Transition,
};
use crate::surface::{FrameHandle, FrameScheduler, Registration, Surface, SurfaceError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Clamp a frame delta to `[0, MAX_STEP_SEC]`.
#[inline]
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_STEP_SEC)
    } else {
        0.0
    }
}

pub struct LiquidGoal<S: Surface, F: FrameScheduler, E: EventSink> {
    config: LiquidConfig,
    target: TargetState,
    state: SimulationState,
    noise: NoiseField,
    bubbles: BubbleField,
    renderer: Renderer,
    rng: StdRng,
    surface: S,
    scheduler: F,
    events: E,
    last_ms: f64,
    pending: Option<FrameHandle>,
    resize_registration: Option<Box<dyn Registration>>,
    destroyed: bool,
}

impl<S: Surface, F: FrameScheduler, E: EventSink> LiquidGoal<S, F, E> {
    /// Build the engine, size the surface and schedule the first frame.
    ///
    /// `seed` drives both the noise permutation and bubble spawning.
    pub fn new(options: ConfigPatch, surface: S, scheduler: F, events: E, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = NoiseField::new(&mut rng);
        let config = LiquidConfig::default().with_patch(&options);
        let defaults = TargetState::default();
        let target = TargetState {
            goal: options.goal.map(coerce_non_negative).unwrap_or(defaults.goal),
            value: options.value.map(coerce_non_negative).unwrap_or(defaults.value),
            transition: None,
        };
        let state = SimulationState {
            level: target.value,
            running: true,
            ..SimulationState::default()
        };
        let mut engine = Self {
            config,
            target,
            state,
            noise,
            bubbles: BubbleField::new(),
            renderer: Renderer::new(),
            rng,
            surface,
            scheduler,
            events,
            last_ms: 0.0,
            pending: None,
            resize_registration: None,
            destroyed: false,
        };
        engine.resize();
        engine.last_ms = engine.scheduler.now_ms();
        engine.pending = engine.scheduler.request_frame();
        log::debug!(
            "liquid engine started: goal={} value={} seed={seed}",
            engine.target.goal,
            engine.target.value
        );
        engine
    }

    pub fn config(&self) -> &LiquidConfig {
        &self.config
    }

    pub fn target(&self) -> &TargetState {
        &self.target
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.state
    }

    pub fn bubbles(&self) -> &BubbleField {
        &self.bubbles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn dpr(&self) -> f64 {
        let d = self.surface.device_pixel_ratio();
        if d.is_finite() {
            d.max(1.0)
        } else {
            1.0
        }
    }

    /// Merge a configuration patch. A `value` that differs from the current
    /// one emits `valueChanged`.
    pub fn set_options(&mut self, patch: &ConfigPatch) {
        self.config.apply(patch);
        if let Some(goal) = patch.goal {
            self.set_goal(goal);
        }
        if let Some(value) = patch.value {
            self.set_progress(value);
        }
    }

    pub fn set_background(&mut self, patch: &BackgroundPatch) {
        self.config.background.apply(patch);
    }

    pub fn set_goal(&mut self, goal: f64) {
        self.target.goal = coerce_non_negative(goal);
    }

    /// Set the target value; negative or non-finite input becomes 0.
    pub fn set_progress(&mut self, value: f64) {
        let v = coerce_non_negative(value);
        if v != self.target.value {
            self.target.value = v;
            self.emit_value_changed();
        }
    }

    pub fn update_progress(&mut self, delta: f64) {
        self.set_progress(self.target.value + coerce_finite(delta));
    }

    pub fn reset(&mut self) {
        self.state.level = 0.0;
        self.state.velocity = 0.0;
        self.set_progress(0.0);
    }

    /// Set the value and snap the level to it, at rest.
    pub fn jump_to(&mut self, value: f64) {
        self.set_progress(value);
        self.state.level = self.target.value;
        self.state.velocity = 0.0;
    }

    /// Move the target linearly from the current value to `value` over
    /// `duration` seconds (default 0.8). While the transition runs it owns
    /// the target: direct `set_progress` writes are overwritten on the next
    /// step until the transition completes.
    pub fn animate_to(&mut self, value: f64, duration: Option<f64>) {
        let duration = match duration {
            Some(d) if d.is_finite() => d.max(MIN_TRANSITION_SEC),
            _ => DEFAULT_TRANSITION_SEC,
        };
        self.target.transition = Some(Transition {
            from: self.target.value,
            to: coerce_non_negative(value),
            duration,
            elapsed: 0.0,
        });
    }

    pub fn displayed_percent(&self) -> u32 {
        displayed_percent(self.state.level, self.target.goal, self.config.normalization)
    }

    pub fn state(&self) -> Snapshot {
        Snapshot {
            goal: self.target.goal,
            value: self.target.value,
            displayed_percent: self.displayed_percent(),
            level: self.state.level,
            velocity: self.state.velocity,
        }
    }

    /// Restore a snapshot. Goal and value go through the usual setters;
    /// level and velocity are written directly, no transition is started.
    pub fn restore(&mut self, s: RestoreState) {
        if let Some(goal) = s.goal {
            self.set_goal(goal);
        }
        if let Some(value) = s.value {
            self.set_progress(value);
        }
        if let Some(level) = s.level {
            self.state.level = coerce_non_negative(level);
        }
        if let Some(velocity) = s.velocity {
            self.state.velocity = coerce_finite(velocity);
        }
    }

    pub fn to_data_url(&self, format: &str, quality: Option<f64>) -> Result<String, SurfaceError> {
        self.surface.encode_image(format, quality)
    }

    pub fn play(&mut self) {
        if self.destroyed || self.state.running {
            return;
        }
        self.state.running = true;
        // fresh reference so the first resumed frame does not see the pause as dt
        self.last_ms = self.scheduler.now_ms();
        self.pending = self.scheduler.request_frame();
        log::debug!("liquid engine resumed");
    }

    pub fn pause(&mut self) {
        self.state.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::debug!("liquid engine paused");
    }

    pub fn toggle_pause(&mut self) {
        if self.state.running {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Keep a host registration (e.g. a resize listener) alive until
    /// `destroy`. Replacing one releases the previous handle.
    pub fn attach_registration(&mut self, registration: Box<dyn Registration>) {
        if let Some(old) = self.resize_registration.replace(registration) {
            old.release();
        }
    }

    /// Stop the loop and release host registrations. The engine stays
    /// readable but will not run again.
    pub fn destroy(&mut self) {
        self.pause();
        if let Some(reg) = self.resize_registration.take() {
            reg.release();
        }
        self.destroyed = true;
        log::debug!("liquid engine destroyed");
    }

    /// Recompute the backing pixel size from the host layout and dpr.
    pub fn resize(&mut self) {
        let (css_w, css_h) = self.surface.layout_size();
        let dpr = self.dpr();
        let px = |css: f64| -> u32 {
            let v = (css * dpr).floor();
            if v.is_finite() && v > MIN_SURFACE_PX as f64 {
                v as u32
            } else {
                MIN_SURFACE_PX
            }
        };
        let (w, h) = (px(css_w), px(css_h));
        self.surface.set_pixel_size(w, h);
        log::debug!("surface resized to {w}x{h} (dpr {dpr})");
    }

    /// One scheduled frame: step, report, paint, schedule the next.
    pub fn tick(&mut self, now_ms: f64) {
        self.pending = None;
        if !self.state.running {
            return;
        }
        let dt = clamp_dt((now_ms - self.last_ms) / 1000.0);
        self.last_ms = now_ms;
        self.step(dt);
        self.events
            .emit(LiquidEvent::AnimationStep(StepPayload { dt, time: now_ms }));
        self.render();
        self.pending = self.scheduler.request_frame();
    }

    /// Advance the simulation by `dt` seconds (clamped) and emit
    /// `valueChanged` (transition), `progress` and `goalReached` as due.
    pub fn step(&mut self, dt: f64) {
        let dt = clamp_dt(dt);

        if let Some(transition) = self.target.transition.as_mut() {
            let (value, done) = transition.advance(dt);
            self.target.value = value;
            if done {
                self.target.transition = None;
            }
            self.emit_value_changed();
        }

        let prev_level = self.state.level;
        let prev_percent = self.displayed_percent();

        let dynamics = LevelDynamics::new(self.config.stiffness, self.config.damping);
        let target = self.target.value.max(0.0);
        dynamics.step(&mut self.state.level, &mut self.state.velocity, target, dt);

        let dpr = self.dpr();
        let scroll = self.config.x_speed * dpr * dt;
        self.state.time += dt;
        self.state.scroll_front += scroll;
        self.state.scroll_back += scroll * (1.0 - self.config.parallax);

        let (w, h) = self.surface.pixel_size();
        let area = SpawnArea {
            width: w as f64,
            height: h as f64,
            dpr,
            baseline: baseline_y(
                h as f64,
                self.state.level,
                self.target.goal,
                self.config.normalization,
            ),
            gradient_from: &self.config.gradient_from,
        };
        self.bubbles
            .advance(dt, &self.config.bubbles, &area, &mut self.rng);

        let percent = self.displayed_percent();
        if (self.state.level - prev_level).abs() > PROGRESS_EPSILON {
            self.events.emit(LiquidEvent::Progress(ValuePayload {
                value: self.state.level,
                percent,
            }));
        }
        if prev_percent < 100 && percent >= 100 {
            self.events.emit(LiquidEvent::GoalReached(ValuePayload {
                value: self.state.level,
                percent,
            }));
        }
    }

    /// Paint the current state without advancing it.
    pub fn render(&mut self) {
        let view = FrameView {
            config: &self.config,
            noise: &self.noise,
            state: &self.state,
            goal: self.target.goal,
            bubbles: &self.bubbles,
            dpr: self.dpr(),
        };
        self.renderer.draw(&mut self.surface, &view);
    }

    fn emit_value_changed(&mut self) {
        let payload = ValuePayload {
            value: self.target.value,
            percent: self.displayed_percent(),
        };
        self.events.emit(LiquidEvent::ValueChanged(payload));
    }
}
