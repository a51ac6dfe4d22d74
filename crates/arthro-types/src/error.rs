//! Error types for the arthro engine.
//!
//! All crates return `ArthroResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the arthro engine.
#[derive(Debug, Error)]
pub enum ArthroError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A variable-property flag is set but the mesh carries no such field.
    #[error("Missing per-triangle {field} on the {side} mesh (variable {field} is enabled)")]
    MissingMaterialData {
        side: String,
        field: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Solver failed to converge.
    #[error("Solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    SolverDivergence {
        iterations: u32,
        residual: f64,
    },

    /// An engine invariant was violated.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, ArthroError>`.
pub type ArthroResult<T> = Result<T, ArthroError>;
