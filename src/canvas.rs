use liquid_core::{CompositeMode, Paint, Path, PathOp, Surface, SurfaceError};
use web_sys as web;

/// `Surface` over a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn trace(&self, path: &Path) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for op in &path.ops {
            let res = match *op {
                PathOp::MoveTo(p) => {
                    ctx.move_to(p.x, p.y);
                    Ok(())
                }
                PathOp::LineTo(p) => {
                    ctx.line_to(p.x, p.y);
                    Ok(())
                }
                PathOp::ArcTo { ctrl, to, radius } => ctx.arc_to(ctrl.x, ctrl.y, to.x, to.y, radius),
                PathOp::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => ctx.arc(center.x, center.y, radius, start, end),
                PathOp::Close => {
                    ctx.close_path();
                    Ok(())
                }
            };
            if let Err(e) = res {
                log::warn!("path op {:?} rejected: {:?}", op, e);
            }
        }
    }

    fn set_paint(&self, paint: &Paint) {
        match paint {
            Paint::Color(css) => self.ctx.set_fill_style_str(css),
            Paint::Gradient(g) => {
                let grad = self
                    .ctx
                    .create_linear_gradient(g.start.x, g.start.y, g.end.x, g.end.y);
                for (offset, color) in &g.stops {
                    // invalid colors are the host's problem; keep the other stop
                    _ = grad.add_color_stop(*offset as f32, color);
                }
                self.ctx.set_fill_style_canvas_gradient(&grad);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn layout_size(&self) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        (rect.width(), rect.height())
    }

    // read live: moving the window between displays changes it
    fn device_pixel_ratio(&self) -> f64 {
        crate::dom::device_pixel_ratio()
    }

    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip(&mut self, path: &Path) {
        self.trace(path);
        self.ctx.clip();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        if let Err(e) = self.ctx.set_global_composite_operation(mode.as_css()) {
            log::warn!("composite {:?} rejected: {:?}", mode, e);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        self.set_paint(paint);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.set_paint(paint);
        self.trace(path);
        self.ctx.fill();
    }

    fn encode_image(&self, format: &str, quality: Option<f64>) -> Result<String, SurfaceError> {
        let quality = quality
            .map(wasm_bindgen::JsValue::from_f64)
            .unwrap_or(wasm_bindgen::JsValue::UNDEFINED);
        self.canvas
            .to_data_url_with_type_and_encoder_options(format, &quality)
            .map_err(|e| SurfaceError::Host(format!("{:?}", e)))
    }
}
