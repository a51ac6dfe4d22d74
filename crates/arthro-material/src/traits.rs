//! Depth–pressure law trait.
//!
//! Every elastic-foundation law implements this trait, so the pressure
//! solver can swap laws without changing its lumped/split logic.

use std::fmt;
use std::str::FromStr;

use arthro_types::ArthroError;
use serde::{Deserialize, Serialize};

use crate::linear::LinearFoundation;
use crate::nonlinear::NonlinearFoundation;
use crate::properties::LayerProperties;

/// Pressure response of a single elastic layer to overlap depth.
///
/// Depths at or below zero carry no load; every method returns zero there.
///
/// # Implementations
/// - `LinearFoundation`: `P = k·d`
/// - `NonlinearFoundation`: `P = −k·h·ln(1 − d/h)`
pub trait FoundationLaw: Send + Sync {
    /// Contact pressure at `depth`. Always finite.
    fn pressure(&self, layer: &LayerProperties, depth: f64) -> f64;

    /// Depth in "linear-equivalent" units: `pressure / k`.
    fn normalized_pressure(&self, layer: &LayerProperties, depth: f64) -> f64 {
        self.pressure(layer, depth) / layer.stiffness()
    }

    /// Derivative of [`normalized_pressure`](Self::normalized_pressure) with respect to depth.
    fn normalized_tangent(&self, layer: &LayerProperties, depth: f64) -> f64;

    /// Strain energy per unit area stored at `depth`: `∫₀ᵈ P(x) dx`.
    fn energy_density(&self, layer: &LayerProperties, depth: f64) -> f64;

    /// Returns the name of this law.
    fn name(&self) -> &str;
}

/// Runtime selection of the depth–pressure law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationFormulation {
    #[default]
    Linear,
    Nonlinear,
}

impl FoundationFormulation {
    /// The law implementing this formulation.
    pub fn law(self) -> &'static dyn FoundationLaw {
        match self {
            FoundationFormulation::Linear => &LinearFoundation,
            FoundationFormulation::Nonlinear => &NonlinearFoundation,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoundationFormulation::Linear => "linear",
            FoundationFormulation::Nonlinear => "nonlinear",
        }
    }
}

impl fmt::Display for FoundationFormulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FoundationFormulation {
    type Err = ArthroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(FoundationFormulation::Linear),
            "nonlinear" | "non-linear" => Ok(FoundationFormulation::Nonlinear),
            other => Err(ArthroError::InvalidConfig(format!(
                "elastic_foundation_formulation must be 'linear' or 'nonlinear', got '{other}'"
            ))),
        }
    }
}
