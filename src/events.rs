use liquid_core::{EventSink, LiquidEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

type Queue = Rc<RefCell<Vec<LiquidEvent>>>;

/// Engine-side sink: events are queued while the engine is borrowed and
/// dispatched by `Dispatcher::flush` once it is released, so DOM listeners
/// may call straight back into the widget.
pub struct QueuedEvents {
    queue: Queue,
}

impl EventSink for QueuedEvents {
    fn emit(&mut self, event: LiquidEvent) {
        self.queue.borrow_mut().push(event);
    }
}

/// Delivers queued events as `CustomEvent`s on the canvas.
#[derive(Clone)]
pub struct Dispatcher {
    target: web::HtmlCanvasElement,
    queue: Queue,
}

impl Dispatcher {
    pub fn new(target: web::HtmlCanvasElement) -> (Self, QueuedEvents) {
        let queue: Queue = Rc::new(RefCell::new(Vec::new()));
        let sink = QueuedEvents {
            queue: queue.clone(),
        };
        (Self { target, queue }, sink)
    }

    pub fn flush(&self) {
        let batch: Vec<LiquidEvent> = self.queue.borrow_mut().drain(..).collect();
        for event in batch {
            if let Err(e) = self.dispatch(&event) {
                log::warn!("{} not dispatched: {:?}", event.name(), e);
            }
        }
    }

    fn dispatch(&self, event: &LiquidEvent) -> Result<(), JsValue> {
        let detail = match event {
            LiquidEvent::ValueChanged(p) | LiquidEvent::Progress(p) | LiquidEvent::GoalReached(p) => {
                serde_wasm_bindgen::to_value(p)?
            }
            LiquidEvent::AnimationStep(s) => serde_wasm_bindgen::to_value(s)?,
        };
        let init = web::CustomEventInit::new();
        init.set_detail(&detail);
        let ev = web::CustomEvent::new_with_event_init_dict(event.name(), &init)?;
        self.target.dispatch_event(&ev)?;
        Ok(())
    }
}
