//! Seams to the host: drawing surface, frame scheduler and teardown handles.
//!
//! The core speaks a small canvas-like vocabulary and never touches a
//! concrete backend. The web front-end maps it onto
//! `CanvasRenderingContext2d`; `headless` records it for tests.

use glam::DVec2;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("image export is not supported by this surface")]
    ExportUnsupported,
    #[error("host surface call failed: {0}")]
    Host(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Tangent arc through the corner `ctrl` toward `to`.
    ArcTo { ctrl: DVec2, to: DVec2, radius: f64 },
    /// Full or partial circle arc, angles in radians.
    Arc {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    },
    Close,
}

/// A path built with move/line/arc/close commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub ops: Vec<PathOp>,
}

impl Path {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ops: Vec::with_capacity(n),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.ops.push(PathOp::MoveTo(DVec2::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.ops.push(PathOp::LineTo(DVec2::new(x, y)));
        self
    }

    pub fn arc_to(&mut self, ctrl: DVec2, to: DVec2, radius: f64) -> &mut Self {
        self.ops.push(PathOp::ArcTo { ctrl, to, radius });
        self
    }

    pub fn circle(&mut self, center: DVec2, radius: f64) -> &mut Self {
        self.ops.push(PathOp::Arc {
            center,
            radius,
            start: 0.0,
            end: std::f64::consts::TAU,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.ops.push(PathOp::Close);
        self
    }

    /// Rounded rectangle from four tangent-arc corners, radius capped at
    /// half of each side.
    pub fn rounded_rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let mut p = Path::with_capacity(6);
        p.move_to(x + r, y)
            .arc_to(DVec2::new(x + w, y), DVec2::new(x + w, y + h), r)
            .arc_to(DVec2::new(x + w, y + h), DVec2::new(x, y + h), r)
            .arc_to(DVec2::new(x, y + h), DVec2::new(x, y), r)
            .arc_to(DVec2::new(x, y), DVec2::new(x + w, y), r)
            .close();
        p
    }
}

/// Two-stop linear gradient between `start` and `end`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: DVec2,
    pub end: DVec2,
    pub stops: SmallVec<[(f64, String); 2]>,
}

impl LinearGradient {
    /// Gradient across a `w` x `h` surface at `degrees`, passing through the
    /// centre and spanning the surface's projected extent on that axis.
    pub fn across(w: f64, h: f64, degrees: f64, from: &str, to: &str) -> Self {
        let rad = (degrees % 360.0).to_radians();
        let dir = DVec2::new(rad.cos(), rad.sin());
        let centre = DVec2::new(w / 2.0, h / 2.0);
        let extent = (w * dir.x).abs() + (h * dir.y).abs();
        let half = dir * (extent / 2.0);
        let mut stops = SmallVec::new();
        stops.push((0.0, from.to_string()));
        stops.push((1.0, to.to_string()));
        Self {
            start: centre - half,
            end: centre + half,
            stops,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Color(String),
    Gradient(LinearGradient),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    /// Only paint where the destination is already opaque.
    SourceAtop,
}

impl CompositeMode {
    pub fn as_css(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::SourceAtop => "source-atop",
        }
    }
}

/// Host drawing surface. `save`/`restore` bracket clip, alpha and
/// composite changes the way a 2D canvas state stack does.
pub trait Surface {
    /// Backing size in device pixels.
    fn pixel_size(&self) -> (u32, u32);
    fn set_pixel_size(&mut self, width: u32, height: u32);
    /// Layout size of the host container in CSS pixels.
    fn layout_size(&self) -> (f64, f64);
    fn device_pixel_ratio(&self) -> f64;

    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn clip(&mut self, path: &Path);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, mode: CompositeMode);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint);
    fn fill_path(&mut self, path: &Path, paint: &Paint);

    /// Encode the visible surface, e.g. as a data URL.
    fn encode_image(&self, format: &str, quality: Option<f64>) -> Result<String, SurfaceError> {
        let _ = (format, quality);
        Err(SurfaceError::ExportUnsupported)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// "Call me back before the next repaint." The host calls
/// `LiquidGoal::tick` with a millisecond timestamp when the frame fires.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// High-resolution clock on the same base as frame timestamps.
    fn now_ms(&self) -> f64;
}

/// Handle returned by a host registration (e.g. a resize listener);
/// releasing it unregisters.
pub trait Registration {
    fn release(self: Box<Self>);
}
