//! # arthro-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the arthro articular contact engine.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other arthro crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{ArthroError, ArthroResult};
pub use ids::{MeshSide, RegionId, TriangleId, VertexId};
