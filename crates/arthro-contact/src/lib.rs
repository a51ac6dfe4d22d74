//! # arthro-contact
//!
//! Elastic-foundation contact between two rigid triangulated meshes.
//!
//! Evaluation runs in three stages:
//! 1. **Proximity**: per-triangle overlap depth against the opposing
//!    mesh, using temporal coherence, neighbours and a BVH fallback
//! 2. **Pressure**: overlap depth to pressure through the configured
//!    foundation law, lumped or split; body loads and energy
//! 3. **Report**: whole-mesh and regional statistics
//!
//! [`ContactEngine`] sequences the stages and caches each one until
//! either mesh moves.

pub mod config;
pub mod engine;
pub mod force;
pub mod outputs;
pub mod proximity;
pub mod stats;

pub use config::ContactConfig;
pub use engine::{ComputationCounters, ContactEngine, Stage};
pub use force::{BodyForces, ContactForce, SpatialForce};
pub use outputs::{StatValue, Statistic};
pub use proximity::{
    exhaustive_search, DepthBounds, DetectionMethod, ProximityDetector, ProximityPassSummary,
    ProximityRecord,
};
pub use stats::{ContactStats, PressureRecord, RegionStats, SideStats};
