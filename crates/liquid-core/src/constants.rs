// Tuning constants for the liquid simulation and its compositing.
//
// Configurable tunables live in `config.rs`; the values here are fixed
// parts of the look and feel and are shared by the engine, the renderer
// and the tests.

// Frame timing
pub const MAX_STEP_SEC: f64 = 0.05; // upper bound on dt; explicit Euler diverges past this
pub const PROGRESS_EPSILON: f64 = 0.001; // minimum level change that emits `progress`

// Timed transitions
pub const DEFAULT_TRANSITION_SEC: f64 = 0.8;
pub const MIN_TRANSITION_SEC: f64 = 0.001;

// Baseline placement as fractions of the surface height
pub const BASELINE_EMPTY_FRAC: f64 = 0.96; // level 0 sits just above the bottom edge
pub const BASELINE_FULL_FRAC: f64 = 0.06; // "full" leaves a little headroom at the top

// Wave amplitude as fractions of the surface height
pub const BASE_AMP_FRAC: f64 = 0.02; // resting ripple
pub const VELOCITY_AMP_FRAC: f64 = 0.12; // extra swell at full normalized velocity

// Back layer
pub const BACK_AMP_SCALE: f64 = 0.88;
pub const BACK_ALPHA: f64 = 0.95;
pub const BACK_SHADE: f64 = -0.25; // darkens both gradient stops
pub const FRONT_ALPHA: f64 = 1.0;

// Wave sampling
pub const WAVE_SAMPLES_ACROSS: u32 = 360; // at most ~one sample per 1/360 of the width
pub const WAVE_SPATIAL_SCALE: f64 = 0.006; // noise units per device pixel at dpr 1
pub const WAVE_TURBULENCE_FREQ_GAIN: f64 = 0.8;
pub const WAVE_TIME_SCALE: f64 = 0.7;

// Horizontal warp field
pub const WARP_FREQ: f64 = 0.45;
pub const WARP_OFFSET_X: f64 = 2.7;
pub const WARP_TIME_SCALE: f64 = 0.23;
pub const WARP_OFFSET_T: f64 = 1.1;
pub const WARP_OCTAVES: u32 = 3;
pub const WARP_PERSISTENCE: f64 = 0.6;
pub const WARP_GAIN: f64 = 0.7;

// Height terms: (weight, octaves, persistence)
pub const WAVE_TERM_WEIGHTS: [f64; 3] = [0.70, 0.35, 0.15];
pub const WAVE_TERM_OCTAVES: [u32; 3] = [5, 3, 2];
pub const WAVE_TERM_PERSISTENCE: [f64; 3] = [0.55, 0.6, 0.6];

// Bubbles
pub const BUBBLE_PHASE_RATE: f64 = 2.0; // radians per second of sideways wobble
pub const BUBBLE_AUTO_SHADE: f64 = 0.4; // "auto" bubble color lightens gradient_from
pub const MAX_SPAWN_PER_STEP: u32 = 64; // backlog beyond this is dropped, not carried

// Fractal noise defaults for general use
pub const FBM_DEFAULT_OCTAVES: u32 = 4;
pub const FBM_DEFAULT_PERSISTENCE: f64 = 0.5;

// Surface sizing
pub const MIN_SURFACE_PX: u32 = 2;
