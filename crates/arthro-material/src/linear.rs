//! Linear elastic foundation.
//!
//! Pressure grows proportionally with overlap depth:
//!
//! P = k·d,  k = E(1−ν) / ((1+ν)(1−2ν)h)
//!
//! Energy: ½·k·d²

use crate::properties::LayerProperties;
use crate::traits::FoundationLaw;

/// Linear depth–pressure law.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearFoundation;

impl FoundationLaw for LinearFoundation {
    fn pressure(&self, layer: &LayerProperties, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        layer.stiffness() * depth
    }

    fn normalized_pressure(&self, _layer: &LayerProperties, depth: f64) -> f64 {
        depth.max(0.0)
    }

    fn normalized_tangent(&self, _layer: &LayerProperties, depth: f64) -> f64 {
        if depth <= 0.0 {
            0.0
        } else {
            1.0
        }
    }

    fn energy_density(&self, layer: &LayerProperties, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        0.5 * layer.stiffness() * depth * depth
    }

    fn name(&self) -> &str {
        "linear"
    }
}
