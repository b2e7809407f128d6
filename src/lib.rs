#![cfg(target_arch = "wasm32")]
//! Browser binding for the liquid-goal engine.
//!
//! Exposes a `LiquidGoal` class to JavaScript that owns a canvas, drives the
//! engine from `requestAnimationFrame` and reports progress as DOM
//! `CustomEvent`s (`valueChanged`, `progress`, `goalReached`,
//! `animationStep`) dispatched on the canvas.

use liquid_core::{BackgroundPatch, ConfigPatch, LiquidGoal as Core, RestoreState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;

pub(crate) type Engine = Core<canvas::CanvasSurface, frame::RafScheduler, events::QueuedEvents>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("liquid-goal ready");
    Ok(())
}

fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

// `Number(v)`; NaN and friends are coerced to 0 by the engine.
fn js_number(v: &JsValue) -> f64 {
    v.as_f64()
        .unwrap_or_else(|| js_sys::Number::new(v).value_of())
}

fn decode<T: serde::de::DeserializeOwned + Default>(v: JsValue) -> Result<T, JsValue> {
    if v.is_undefined() || v.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(v)
        .map_err(|e| JsValue::from_str(&format!("options deserialize error: {e}")))
}

#[wasm_bindgen(js_name = LiquidGoal)]
pub struct LiquidGoalHandle {
    engine: Rc<RefCell<Engine>>,
    dispatcher: events::Dispatcher,
}

impl LiquidGoalHandle {
    // Run against the engine, then deliver whatever it emitted.
    fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let out = {
            let mut engine = self.engine.borrow_mut();
            f(&mut *engine)
        };
        self.dispatcher.flush();
        out
    }

    fn build(target: web::Element, options: ConfigPatch) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let canvas = dom::canvas_for(&target)?;
        let ctx = dom::context_2d(&canvas)?;
        let surface = canvas::CanvasSurface::new(canvas.clone(), ctx);
        let (dispatcher, sink) = events::Dispatcher::new(canvas);
        let seed: u64 = rand::random();

        let engine = frame::spawn_engine(window, dispatcher.clone(), move |scheduler| {
            Core::new(options, surface, scheduler, sink, seed)
        });

        if engine.borrow().config().auto_resize {
            let weak = Rc::downgrade(&engine);
            let listener = dom::ResizeListener::listen(move || {
                if let Some(e) = weak.upgrade() {
                    if let Ok(mut e) = e.try_borrow_mut() {
                        e.resize();
                    }
                }
            });
            if let Some(listener) = listener {
                engine.borrow_mut().attach_registration(Box::new(listener));
            }
        }
        Ok(Self { engine, dispatcher })
    }
}

#[wasm_bindgen(js_class = LiquidGoal)]
impl LiquidGoalHandle {
    /// `target` is a canvas, or a container that receives a new canvas.
    #[wasm_bindgen(constructor)]
    pub fn new(target: web::Element, options: JsValue) -> Result<LiquidGoalHandle, JsValue> {
        let options: ConfigPatch = decode(options)?;
        let handle = Self::build(target, options).map_err(js_err)?;
        handle.dispatcher.flush();
        Ok(handle)
    }

    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, patch: JsValue) -> Result<(), JsValue> {
        let patch: ConfigPatch = decode(patch)?;
        self.with(|e| e.set_options(&patch));
        Ok(())
    }

    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&self, cfg: JsValue) -> Result<(), JsValue> {
        let patch: BackgroundPatch = decode(cfg)?;
        self.with(|e| e.set_background(&patch));
        Ok(())
    }

    #[wasm_bindgen(js_name = setGoal)]
    pub fn set_goal(&self, n: JsValue) {
        let n = js_number(&n);
        self.with(|e| e.set_goal(n));
    }

    #[wasm_bindgen(js_name = setProgress)]
    pub fn set_progress(&self, v: JsValue) {
        let v = js_number(&v);
        self.with(|e| e.set_progress(v));
    }

    #[wasm_bindgen(js_name = updateProgress)]
    pub fn update_progress(&self, d: JsValue) {
        let d = js_number(&d);
        self.with(|e| e.update_progress(d));
    }

    pub fn reset(&self) {
        self.with(|e| e.reset());
    }

    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&self, v: JsValue) {
        let v = js_number(&v);
        self.with(|e| e.jump_to(v));
    }

    #[wasm_bindgen(js_name = animateTo)]
    pub fn animate_to(&self, v: JsValue, duration: Option<f64>) {
        let v = js_number(&v);
        self.with(|e| e.animate_to(v, duration));
    }

    #[wasm_bindgen(js_name = toDataURL)]
    pub fn to_data_url(&self, format: Option<String>, quality: Option<f64>) -> Result<String, JsValue> {
        let format = format.unwrap_or_else(|| "image/png".to_string());
        self.engine
            .borrow()
            .to_data_url(&format, quality)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.engine.borrow().state();
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }

    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, s: JsValue) -> Result<(), JsValue> {
        let restore: RestoreState = decode(s)?;
        self.with(|e| e.restore(restore));
        Ok(())
    }

    #[wasm_bindgen(js_name = getDisplayedPercent)]
    pub fn get_displayed_percent(&self) -> u32 {
        self.engine.borrow().displayed_percent()
    }

    pub fn play(&self) {
        self.with(|e| e.play());
    }

    pub fn pause(&self) {
        self.with(|e| e.pause());
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) {
        self.with(|e| e.toggle_pause());
    }

    pub fn destroy(&self) {
        self.with(|e| e.destroy());
    }

    pub fn resize(&self) {
        self.with(|e| e.resize());
    }
}

impl Drop for LiquidGoalHandle {
    fn drop(&mut self) {
        // JS `free()` without `destroy()` must not leave a frame pointing at a dropped closure
        if let Ok(mut e) = self.engine.try_borrow_mut() {
            e.destroy();
        }
    }
}
