//! # arthro-math
//!
//! Geometry and numeric primitives for the arthro contact engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`Vec3`, `Quat`, `Mat3`)
//! - Rigid body [`Pose`] for placing meshes in the world
//! - Axis-aligned boxes and bidirectional ray tests used by the
//!   bounding-volume hierarchy and the proximity detector
//! - A generic fixed-size Newton root finder for small residual systems

pub mod aabb;
pub mod pose;
pub mod ray;
pub mod root;

pub use aabb::Aabb;
pub use pose::Pose;
pub use ray::{Ray, RayHit};
pub use root::{NewtonSolver, Residual, RootResult};

// Re-export glam's f64 types as the canonical math types for arthro.
pub use glam::{DMat3 as Mat3, DQuat as Quat, DVec3 as Vec3};
