//! Integration tests for arthro-telemetry.

use arthro_telemetry::bus::EventBus;
use arthro_telemetry::events::{ContactEvent, EventKind};
use arthro_telemetry::sinks::{SharedSink, TracingSink, VecSink};

fn pass(side: &str) -> EventKind {
    EventKind::ProximityPass {
        side: side.into(),
        cached: 0,
        neighbor: 0,
        hierarchy: 8,
        contacting: 8,
        max_proximity: 0.02,
    }
}

#[test]
fn emit_and_flush() {
    let sink = SharedSink::new();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(sink.clone()));

    bus.emit(ContactEvent::new(0, pass("casting")));
    bus.emit(ContactEvent::new(0, pass("target")));
    assert!(sink.is_empty());

    bus.flush();
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, pass("casting"));
    assert_eq!(events[1].kind, pass("target"));
}

#[test]
fn disabled_bus_drops_events() {
    let sink = SharedSink::new();
    let mut bus = EventBus::new().with_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(ContactEvent::new(0, pass("casting")));
    bus.flush();
    assert!(sink.is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let a = SharedSink::new();
    let b = SharedSink::new();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(VecSink::new()));
    bus.add_sink(Box::new(TracingSink::new()));
    assert_eq!(bus.sink_count(), 4);

    bus.emit(ContactEvent::new(3, pass("target")));
    bus.finalize();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
}

#[test]
fn event_serialization() {
    let event = ContactEvent::new(
        5,
        EventKind::Report {
            contact_area: 1.0,
            target_force: [0.0, 0.0, -42.0],
            potential_energy: 0.5,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: ContactEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn fallback_event_label() {
    let event = ContactEvent::new(
        10,
        EventKind::SolverFallback {
            side: "casting".into(),
            triangle: 7,
            iterations: 50,
            residual: 1e-3,
        },
    );
    assert_eq!(event.label(), "solver_fallback");
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("residual"));
}
