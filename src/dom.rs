use liquid_core::Registration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Use `target` if it is a canvas, otherwise append a canvas that fills it.
pub fn canvas_for(target: &web::Element) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(canvas) = target.dyn_ref::<web::HtmlCanvasElement>() {
        return Ok(canvas.clone());
    }
    let document = target
        .owner_document()
        .ok_or_else(|| anyhow::anyhow!("target is not attached to a document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a canvas: {:?}", e))?;
    target
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = style.set_property("display", "block");
    Ok(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .max(1.0)
}

/// A window `resize` listener; releasing it removes the listener.
pub struct ResizeListener {
    window: web::Window,
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn listen(handler: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        if let Err(e) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::warn!("resize listener not registered: {:?}", e);
            return None;
        }
        Some(Self { window, closure })
    }
}

impl Registration for ResizeListener {
    fn release(self: Box<Self>) {
        _ = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}
