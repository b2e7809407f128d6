use crate::events::Dispatcher;
use crate::Engine;
use liquid_core::{FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame`-backed scheduler. The frame callback holds only a
/// weak reference to the engine, so dropping the widget ends the loop.
pub struct RafScheduler {
    window: web::Window,
    tick: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: web::Window, engine: Weak<RefCell<Engine>>, dispatcher: Dispatcher) -> Self {
        let tick = Closure::wrap(Box::new(move |ts: f64| {
            let Some(engine) = engine.upgrade() else {
                return;
            };
            match engine.try_borrow_mut() {
                Ok(mut e) => e.tick(ts),
                Err(_) => {
                    log::warn!("frame skipped: engine busy");
                    return;
                }
            }
            dispatcher.flush();
        }) as Box<dyn FnMut(f64)>);
        Self { window, tick }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        match self
            .window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}

/// Build the engine inside an `Rc` so the frame callback can point back at it.
pub fn spawn_engine(
    window: web::Window,
    dispatcher: Dispatcher,
    build: impl FnOnce(RafScheduler) -> Engine,
) -> Rc<RefCell<Engine>> {
    Rc::new_cyclic(|weak: &Weak<RefCell<Engine>>| {
        let scheduler = RafScheduler::new(window, weak.clone(), dispatcher);
        RefCell::new(build(scheduler))
    })
}
