//! Event sinks.

use crate::domain::events::OrbiterEvent;
use crate::ports::outbound::EventEmitter;
use parking_lot::Mutex;
use tracing::info;

/// Keeps every emitted event in order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<OrbiterEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<OrbiterEvent> {
        self.events.lock().clone()
    }

    /// Remove and return recorded events.
    pub fn drain(&self) -> Vec<OrbiterEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Count of recorded events with the given name.
    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }
}

impl EventEmitter for EventRecorder {
    fn emit(&self, event: OrbiterEvent) {
        self.events.lock().push(event);
    }
}

/// Writes each event to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventEmitter;

impl EventEmitter for TracingEventEmitter {
    fn emit(&self, event: OrbiterEvent) {
        info!(event = event.name(), "[orbiter:event] {:?}", event);
    }
}
