//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them
//! (collect in memory, log through `tracing`, ...).

use std::sync::{Arc, Mutex};

use crate::events::{ContactEvent, EventKind};

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &ContactEvent);

    /// Called when the run ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A simple sink that collects events in a `Vec`.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Collected events.
    pub events: Vec<ContactEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &ContactEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Collects events into a buffer shared with the caller, so events can
/// be inspected after the sink has been boxed into a bus.
#[derive(Debug, Clone, Default)]
pub struct SharedSink {
    events: Arc<Mutex<Vec<ContactEvent>>>,
}

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events received so far.
    pub fn events(&self) -> Vec<ContactEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for SharedSink {
    fn handle(&mut self, event: &ContactEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "shared_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &ContactEvent) {
        match &event.kind {
            EventKind::SolverFallback { .. } => tracing::warn!(
                sequence = event.sequence,
                event = ?event.kind,
                "contact_event"
            ),
            _ => tracing::info!(
                sequence = event.sequence,
                event = ?event.kind,
                "contact_event"
            ),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
