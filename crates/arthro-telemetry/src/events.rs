//! Contact event types.
//!
//! Structured events emitted by the contact engine at the end of each
//! realized stage. Events are lightweight value types that carry just
//! enough data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A contact event emitted by the engine.
///
/// Events are tagged with the engine's evaluation sequence number, which
/// advances every time a pose change invalidates the cached results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    /// Evaluation sequence number (0-indexed).
    pub sequence: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Proximity detection finished for one mesh side.
    ProximityPass {
        /// `"casting"` or `"target"`.
        side: String,
        /// Triangles resolved from the coherence cache.
        cached: u32,
        /// Triangles resolved by the neighbor search.
        neighbor: u32,
        /// Triangles resolved by the hierarchy query.
        hierarchy: u32,
        /// Triangles with a valid proximity.
        contacting: u32,
        /// Maximum proximity depth (meters).
        max_proximity: f64,
    },

    /// Pressure evaluation finished for one mesh side.
    PressurePass {
        side: String,
        /// Triangles in contact, including those at zero pressure.
        contacting: u32,
        /// Maximum contact pressure (Pa).
        max_pressure: f64,
        /// Split solves that fell back to the linear result.
        fallbacks: u32,
    },

    /// A nonlinear split solve did not converge at one triangle.
    SolverFallback {
        side: String,
        triangle: u32,
        iterations: u32,
        residual: f64,
    },

    /// Report stage realized.
    Report {
        /// Casting-side contact area (m²).
        contact_area: f64,
        /// Force applied to the target body (N).
        target_force: [f64; 3],
        /// Total elastic energy (J).
        potential_energy: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl ContactEvent {
    /// Creates a new event for the given evaluation.
    pub fn new(sequence: u64, kind: EventKind) -> Self {
        Self { sequence, kind }
    }

    /// Short name of the event variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::ProximityPass { .. } => "proximity_pass",
            EventKind::PressurePass { .. } => "pressure_pass",
            EventKind::SolverFallback { .. } => "solver_fallback",
            EventKind::Report { .. } => "report",
            EventKind::Custom { label, .. } => label,
        }
    }
}
