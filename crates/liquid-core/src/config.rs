//! Engine configuration and patch merging.
//!
//! `LiquidConfig` names every tunable. Hosts change it through a
//! `ConfigPatch`, whose nested background/bubble patches are merged field by
//! field so a partial patch never resets its siblings.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    None,
    Solid,
    #[default]
    Linear,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundConfig {
    pub kind: BackgroundKind,
    pub color: String,
    pub from: String,
    pub to: String,
    pub angle: f64,
    pub alpha: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Linear,
            color: "#000000".to_string(),
            from: "#150b10".to_string(),
            to: "#0e0a0d".to_string(),
            angle: 90.0,
            alpha: 1.0,
        }
    }
}

/// Bubble fill: derived from the liquid gradient, or a fixed CSS color.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BubbleColor {
    #[default]
    Auto,
    Fixed(String),
}

impl From<String> for BubbleColor {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("auto") {
            BubbleColor::Auto
        } else {
            BubbleColor::Fixed(s)
        }
    }
}

impl From<BubbleColor> for String {
    fn from(c: BubbleColor) -> Self {
        match c {
            BubbleColor::Auto => "auto".to_string(),
            BubbleColor::Fixed(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BubbleConfig {
    pub enabled: bool,
    pub rate: f64, // bubbles per second
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_rise_speed: f64,
    pub max_rise_speed: f64,
    pub drift: f64,
    pub alpha: f64,
    pub color: BubbleColor,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rate: 10.0,
            min_radius: 1.5,
            max_radius: 4.0,
            min_rise_speed: 20.0,
            max_rise_speed: 60.0,
            drift: 15.0,
            alpha: 0.6,
            color: BubbleColor::Auto,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiquidConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub turbulence: f64,
    pub wave: f64,
    pub lumps: f64,
    pub x_speed: f64,
    pub parallax: f64,
    pub back_lift: f64,
    pub gradient_from: String,
    pub gradient_to: String,
    pub gradient_angle: f64,
    pub radius: f64,
    /// Level, as a multiple of the goal, at which the surface reads "full".
    pub normalization: f64,
    pub auto_resize: bool,
    pub background: BackgroundConfig,
    pub bubbles: BubbleConfig,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self {
            stiffness: 12.0,
            damping: 9.0,
            turbulence: 1.0,
            wave: 1.0,
            lumps: 0.6,
            x_speed: 30.0,
            parallax: 0.35,
            back_lift: 10.0,
            gradient_from: "#7a0a10".to_string(),
            gradient_to: "#3a0003".to_string(),
            gradient_angle: 90.0,
            radius: 20.0,
            normalization: 1.2,
            auto_resize: true,
            background: BackgroundConfig::default(),
            bubbles: BubbleConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundPatch {
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<BackgroundKind>,
    pub color: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub angle: Option<f64>,
    pub alpha: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BubblePatch {
    pub enabled: Option<bool>,
    pub rate: Option<f64>,
    #[serde(alias = "minR")]
    pub min_radius: Option<f64>,
    #[serde(alias = "maxR")]
    pub max_radius: Option<f64>,
    #[serde(alias = "minVy")]
    pub min_rise_speed: Option<f64>,
    #[serde(alias = "maxVy")]
    pub max_rise_speed: Option<f64>,
    pub drift: Option<f64>,
    pub alpha: Option<f64>,
    pub color: Option<BubbleColor>,
}

/// A partial update to the configuration and, optionally, goal and value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub goal: Option<f64>,
    pub value: Option<f64>,
    #[serde(alias = "k")]
    pub stiffness: Option<f64>,
    #[serde(alias = "c")]
    pub damping: Option<f64>,
    pub turbulence: Option<f64>,
    pub wave: Option<f64>,
    pub lumps: Option<f64>,
    #[serde(alias = "xspeed")]
    pub x_speed: Option<f64>,
    pub parallax: Option<f64>,
    pub back_lift: Option<f64>,
    pub gradient_from: Option<String>,
    pub gradient_to: Option<String>,
    pub gradient_angle: Option<f64>,
    pub radius: Option<f64>,
    #[serde(alias = "norm100")]
    pub normalization: Option<f64>,
    pub auto_resize: Option<bool>,
    pub background: Option<BackgroundPatch>,
    pub bubbles: Option<BubblePatch>,
}

// Overwrite `dst` when the patch carries a value.
fn set<T: Clone>(dst: &mut T, src: &Option<T>) {
    if let Some(v) = src {
        *dst = v.clone();
    }
}

impl BackgroundConfig {
    pub fn apply(&mut self, p: &BackgroundPatch) {
        set(&mut self.kind, &p.kind);
        set(&mut self.color, &p.color);
        set(&mut self.from, &p.from);
        set(&mut self.to, &p.to);
        set(&mut self.angle, &p.angle);
        set(&mut self.alpha, &p.alpha);
    }
}

impl BubbleConfig {
    pub fn apply(&mut self, p: &BubblePatch) {
        set(&mut self.enabled, &p.enabled);
        set(&mut self.rate, &p.rate);
        set(&mut self.min_radius, &p.min_radius);
        set(&mut self.max_radius, &p.max_radius);
        set(&mut self.min_rise_speed, &p.min_rise_speed);
        set(&mut self.max_rise_speed, &p.max_rise_speed);
        set(&mut self.drift, &p.drift);
        set(&mut self.alpha, &p.alpha);
        set(&mut self.color, &p.color);
    }
}

impl LiquidConfig {
    /// Merge a patch. `goal` and `value` are not configuration and are
    /// left for the engine to route through its coercing setters.
    pub fn apply(&mut self, p: &ConfigPatch) {
        set(&mut self.stiffness, &p.stiffness);
        set(&mut self.damping, &p.damping);
        set(&mut self.turbulence, &p.turbulence);
        set(&mut self.wave, &p.wave);
        set(&mut self.lumps, &p.lumps);
        set(&mut self.x_speed, &p.x_speed);
        set(&mut self.parallax, &p.parallax);
        set(&mut self.back_lift, &p.back_lift);
        set(&mut self.gradient_from, &p.gradient_from);
        set(&mut self.gradient_to, &p.gradient_to);
        set(&mut self.gradient_angle, &p.gradient_angle);
        set(&mut self.radius, &p.radius);
        set(&mut self.normalization, &p.normalization);
        set(&mut self.auto_resize, &p.auto_resize);
        if let Some(bg) = &p.background {
            self.background.apply(bg);
        }
        if let Some(b) = &p.bubbles {
            self.bubbles.apply(b);
        }
    }

    pub fn with_patch(mut self, p: &ConfigPatch) -> Self {
        self.apply(p);
        self
    }
}
