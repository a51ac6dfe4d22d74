//! Contact engine configuration.
//!
//! Serializable, TOML-loadable settings for one contact engine
//! instance, with `Default` plus named presets.

use arthro_material::{ContactParameters, FoundationFormulation, PressureSolver};
use arthro_types::constants::{
    DEFAULT_MAX_PROXIMITY, DEFAULT_MIN_PROXIMITY, DEFAULT_SOLVER_MAX_ITERATIONS,
    DEFAULT_SOLVER_TOLERANCE,
};
use arthro_types::{ArthroError, ArthroResult, MeshSide};
use serde::{Deserialize, Serialize};

use crate::proximity::DepthBounds;

/// Configuration for a [`ContactEngine`](crate::ContactEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Smallest overlap depth treated as contact (m).
    pub min_proximity: f64,

    /// Largest overlap depth treated as contact (m). Deeper hits are
    /// excluded, not clamped.
    pub max_proximity: f64,

    /// Depth–pressure law.
    pub elastic_foundation_formulation: FoundationFormulation,

    /// Combine both layers into one (`true`) or solve them in series.
    pub use_lumped_contact_model: bool,

    /// 0 = silent, 1 = pass summaries and fallback warnings, 2 = detailed.
    pub verbose: u8,

    pub casting_mesh_contact_params: ContactParameters,

    pub target_mesh_contact_params: ContactParameters,

    /// Split Newton tolerance, relative to the total depth.
    pub solver_tolerance: f64,

    /// Split Newton iteration cap.
    pub solver_max_iterations: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            min_proximity: DEFAULT_MIN_PROXIMITY,
            max_proximity: DEFAULT_MAX_PROXIMITY,
            elastic_foundation_formulation: FoundationFormulation::Linear,
            use_lumped_contact_model: true,
            verbose: 0,
            casting_mesh_contact_params: ContactParameters::new(10.0e6, 0.45, 0.002),
            target_mesh_contact_params: ContactParameters::new(10.0e6, 0.45, 0.002),
            solver_tolerance: DEFAULT_SOLVER_TOLERANCE,
            solver_max_iterations: DEFAULT_SOLVER_MAX_ITERATIONS,
        }
    }
}

impl ContactConfig {
    /// Nonlinear law with the layers solved in series.
    pub fn nonlinear_split() -> Self {
        Self {
            elastic_foundation_formulation: FoundationFormulation::Nonlinear,
            use_lumped_contact_model: false,
            ..Self::default()
        }
    }

    /// Same parameters on both sides.
    pub fn with_params(mut self, params: ContactParameters) -> Self {
        self.casting_mesh_contact_params = params.clone();
        self.target_mesh_contact_params = params;
        self
    }

    pub fn with_proximity_bounds(mut self, min_proximity: f64, max_proximity: f64) -> Self {
        self.min_proximity = min_proximity;
        self.max_proximity = max_proximity;
        self
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn params(&self, side: MeshSide) -> &ContactParameters {
        match side {
            MeshSide::Casting => &self.casting_mesh_contact_params,
            MeshSide::Target => &self.target_mesh_contact_params,
        }
    }

    pub fn depth_bounds(&self) -> DepthBounds {
        DepthBounds::new(self.min_proximity, self.max_proximity)
    }

    pub fn pressure_solver(&self) -> PressureSolver {
        PressureSolver::new(
            self.elastic_foundation_formulation,
            self.use_lumped_contact_model,
            self.solver_tolerance,
            self.solver_max_iterations,
        )
    }

    /// Parses a TOML document.
    pub fn from_toml(source: &str) -> ArthroResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ArthroError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks proximity bounds, solver settings and uniform material values.
    pub fn validate(&self) -> ArthroResult<()> {
        if !self.min_proximity.is_finite() || !self.max_proximity.is_finite() {
            return Err(ArthroError::InvalidConfig(format!(
                "proximity bounds must be finite, got [{}, {}]",
                self.min_proximity, self.max_proximity
            )));
        }
        if self.min_proximity < 0.0 {
            return Err(ArthroError::InvalidConfig(format!(
                "min_proximity must not be negative, got {}",
                self.min_proximity
            )));
        }
        if self.min_proximity > self.max_proximity {
            return Err(ArthroError::InvalidConfig(format!(
                "min_proximity ({}) exceeds max_proximity ({})",
                self.min_proximity, self.max_proximity
            )));
        }
        if !(self.solver_tolerance.is_finite() && self.solver_tolerance > 0.0) {
            return Err(ArthroError::InvalidConfig(format!(
                "solver_tolerance must be positive, got {}",
                self.solver_tolerance
            )));
        }
        if self.solver_max_iterations == 0 {
            return Err(ArthroError::InvalidConfig(
                "solver_max_iterations must be at least 1".into(),
            ));
        }
        for side in MeshSide::BOTH {
            self.params(side).validate().map_err(|e| match e {
                ArthroError::InvalidMaterial(msg) => {
                    ArthroError::InvalidMaterial(format!("{side} mesh: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
