//! Browser-free collaborators: a surface that records draw calls and a
//! scheduler whose clock and frames are advanced by hand.

use crate::surface::{
    CompositeMode, FrameHandle, FrameScheduler, Paint, Path, Surface, SurfaceError,
};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear { w: f64, h: f64 },
    Save,
    Restore,
    Clip(Path),
    GlobalAlpha(f64),
    Composite(CompositeMode),
    FillRect { w: f64, h: f64, paint: Paint },
    FillPath { path: Path, paint: Paint },
}

/// Records every call in order. Layout and dpr are set by the test/host.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    pub css_size: (f64, f64),
    pub dpr: f64,
    pub pixels: (u32, u32),
    pub calls: Vec<DrawCall>,
    pub global_alpha: f64,
    pub composite: CompositeMode,
    stack: Vec<(f64, CompositeMode)>,
}

impl RecordingSurface {
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        Self {
            css_size: (css_width, css_height),
            dpr,
            pixels: (0, 0),
            calls: Vec::new(),
            global_alpha: 1.0,
            composite: CompositeMode::SourceOver,
            stack: Vec::new(),
        }
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Nesting depth of `save` without a matching `restore`.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RecordingSurface {
    fn pixel_size(&self) -> (u32, u32) {
        self.pixels
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.pixels = (width, height);
    }

    fn layout_size(&self) -> (f64, f64) {
        self.css_size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn clear(&mut self, _x: f64, _y: f64, w: f64, h: f64) {
        self.calls.push(DrawCall::Clear { w, h });
    }

    fn save(&mut self) {
        self.stack.push((self.global_alpha, self.composite));
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        if let Some((alpha, mode)) = self.stack.pop() {
            self.global_alpha = alpha;
            self.composite = mode;
        }
        self.calls.push(DrawCall::Restore);
    }

    fn clip(&mut self, path: &Path) {
        self.calls.push(DrawCall::Clip(path.clone()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha;
        self.calls.push(DrawCall::GlobalAlpha(alpha));
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.composite = mode;
        self.calls.push(DrawCall::Composite(mode));
    }

    fn fill_rect(&mut self, _x: f64, _y: f64, w: f64, h: f64, paint: &Paint) {
        self.calls.push(DrawCall::FillRect {
            w,
            h,
            paint: paint.clone(),
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.calls.push(DrawCall::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn encode_image(&self, format: &str, _quality: Option<f64>) -> Result<String, SurfaceError> {
        let (w, h) = self.pixels;
        Ok(format!("data:{format};recording,{w}x{h},{}", self.calls.len()))
    }
}

/// Frames fire only when the host calls `LiquidGoal::tick`; this records
/// what was requested and cancelled.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pub now_ms: f64,
    next_id: i32,
    pub pending: Option<FrameHandle>,
    pub requested: u32,
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, ms: f64) -> f64 {
        self.now_ms += ms;
        self.now_ms
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
