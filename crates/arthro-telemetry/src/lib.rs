//! # arthro-telemetry
//!
//! Event bus for contact-engine telemetry. Emits structured events
//! (proximity passes, pressure passes, solver fallbacks, reports) that
//! can be consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{ContactEvent, EventKind};
pub use sinks::{EventSink, SharedSink, TracingSink, VecSink};
