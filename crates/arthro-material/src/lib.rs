//! # arthro-material
//!
//! Elastic-foundation material model and pressure solver.
//!
//! ## Design
//!
//! The [`FoundationLaw`] trait maps the overlap depth of one elastic
//! layer to contact pressure. [`LinearFoundation`] and
//! [`NonlinearFoundation`] implement the two depth–pressure laws and are
//! selected at runtime through [`FoundationFormulation`].
//!
//! The [`PressureSolver`] combines two layers (lumped into one
//! equivalent layer, or split into two layers in series whose
//! sub-depths are solved for) and returns a [`PressureSolution`].
//!
//! The [`MaterialDatabase`] stores named [`ContactParameters`] presets
//! for common articular tissues and implant materials.

pub mod database;
pub mod linear;
pub mod nonlinear;
pub mod properties;
pub mod solver;
pub mod traits;

pub use database::MaterialDatabase;
pub use linear::LinearFoundation;
pub use nonlinear::NonlinearFoundation;
pub use properties::{ContactParameters, LayerProperties};
pub use solver::{PressureSolution, PressureSolver, SolveStatus};
pub use traits::{FoundationFormulation, FoundationLaw};
