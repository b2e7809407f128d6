//! Lifecycle notifications and the sinks that receive them.

use fnv::FnvHashMap;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValuePayload {
    pub value: f64,
    pub percent: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StepPayload {
    pub dt: f64,
    pub time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    ValueChanged,
    Progress,
    GoalReached,
    AnimationStep,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::ValueChanged => "valueChanged",
            EventKind::Progress => "progress",
            EventKind::GoalReached => "goalReached",
            EventKind::AnimationStep => "animationStep",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiquidEvent {
    /// The target value changed.
    ValueChanged(ValuePayload),
    /// The displayed level moved; `value` is the level, not the target.
    Progress(ValuePayload),
    /// Percent crossed from below 100 to at least 100.
    GoalReached(ValuePayload),
    AnimationStep(StepPayload),
}

impl LiquidEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LiquidEvent::ValueChanged(_) => EventKind::ValueChanged,
            LiquidEvent::Progress(_) => EventKind::Progress,
            LiquidEvent::GoalReached(_) => EventKind::GoalReached,
            LiquidEvent::AnimationStep(_) => EventKind::AnimationStep,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

pub trait EventSink {
    fn emit(&mut self, event: LiquidEvent);
}

/// Keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<LiquidEvent>,
}

impl EventLog {
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: LiquidEvent) {
        self.events.push(event);
    }
}

type Handler = Box<dyn FnMut(&LiquidEvent)>;

/// Per-kind subscriber lists for hosts that want callbacks.
#[derive(Default)]
pub struct EventBus {
    handlers: FnvHashMap<EventKind, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&LiquidEvent) + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    pub fn off(&mut self, kind: EventKind) {
        self.handlers.remove(&kind);
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: LiquidEvent) {
        if let Some(list) = self.handlers.get_mut(&event.kind()) {
            for h in list.iter_mut() {
                h(&event);
            }
        }
    }
}
