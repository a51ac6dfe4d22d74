//! # arthro-io
//!
//! Contact scene input/output contract and input validation.
//!
//! Defines the boundary types that external systems (CLI, scripts,
//! pipelines) use to hand two meshes, a configuration and a sequence
//! of poses to the contact engine, and to read its reports back.

pub mod contract;
pub mod runner;
pub mod validator;

pub use contract::{AxisSplit, ContactInput, ContactOutput, FramePoses, FrameReport, MeshInput};
pub use runner::evaluate;
pub use validator::validate_input;
