//! Nonlinear elastic foundation.
//!
//! Pressure stiffens as the overlap approaches the layer thickness:
//!
//! P = −k·h·ln(1 − d/h)
//!
//! The law is singular at `d = h`, so depth is clamped to
//! `h·NONLINEAR_DEPTH_LIMIT` before evaluation and the pressure stays
//! finite.
//!
//! Energy: k·h²·(d/h + (1 − d/h)·ln(1 − d/h))

use arthro_types::constants::NONLINEAR_DEPTH_LIMIT;

use crate::properties::LayerProperties;
use crate::traits::FoundationLaw;

/// Nonlinear (logarithmic) depth–pressure law.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonlinearFoundation;

impl NonlinearFoundation {
    /// Clamps `depth` into `[0, h·NONLINEAR_DEPTH_LIMIT]`.
    #[inline]
    pub fn clamp_depth(layer: &LayerProperties, depth: f64) -> f64 {
        depth.clamp(0.0, layer.thickness * NONLINEAR_DEPTH_LIMIT)
    }
}

impl FoundationLaw for NonlinearFoundation {
    fn pressure(&self, layer: &LayerProperties, depth: f64) -> f64 {
        layer.stiffness() * self.normalized_pressure(layer, depth)
    }

    fn normalized_pressure(&self, layer: &LayerProperties, depth: f64) -> f64 {
        let d = Self::clamp_depth(layer, depth);
        let h = layer.thickness;
        -h * (-d / h).ln_1p()
    }

    fn normalized_tangent(&self, layer: &LayerProperties, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        let d = Self::clamp_depth(layer, depth);
        1.0 / (1.0 - d / layer.thickness)
    }

    fn energy_density(&self, layer: &LayerProperties, depth: f64) -> f64 {
        let d = Self::clamp_depth(layer, depth);
        if d == 0.0 {
            return 0.0;
        }
        let h = layer.thickness;
        let a = 1.0 - d / h;
        layer.stiffness() * h * h * (d / h + a * (-d / h).ln_1p())
    }

    fn name(&self) -> &str {
        "nonlinear"
    }
}
