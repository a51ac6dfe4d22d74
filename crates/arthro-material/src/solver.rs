//! Pressure solver for two opposing elastic layers.
//!
//! ## Lumped
//! The two layers are combined into one equivalent layer
//! ([`LayerProperties::lumped`]) and the law is evaluated at the total
//! overlap depth.
//!
//! ## Split
//! The layers act as springs in series: both carry the same pressure and
//! their sub-depths add up to the total depth.
//!
//! ```text
//! P = P₁(d₁) = P₂(d₂),   d₁ + d₂ = d
//! ```
//!
//! The linear law has the closed form `P = d / (1/k₁ + 1/k₂)`. The
//! nonlinear law is solved with a 3×3 Newton iteration in `(P, d₁, d₂)`,
//! seeded with the linear solution. If Newton fails the linear split
//! result is used instead and the solution is tagged as a fallback.

use arthro_math::{NewtonSolver, Residual, RootResult};
use arthro_types::constants::{DEFAULT_SOLVER_MAX_ITERATIONS, DEFAULT_SOLVER_TOLERANCE};

use crate::nonlinear::NonlinearFoundation;
use crate::properties::LayerProperties;
use crate::traits::{FoundationFormulation, FoundationLaw};

/// How a [`PressureSolution`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveStatus {
    /// Evaluated directly (lumped, or linear split).
    ClosedForm,
    /// Nonlinear split solved by Newton iteration.
    Converged { iterations: u32 },
    /// Newton failed; the linear split result was substituted.
    Fallback { iterations: u32, residual: f64 },
}

impl SolveStatus {
    pub fn is_fallback(&self) -> bool {
        matches!(self, SolveStatus::Fallback { .. })
    }
}

/// Pressure and sub-depths at one contacting triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSolution {
    /// Contact pressure (Pa), ≥ 0 and finite.
    pub pressure: f64,
    /// Sub-depths `(own, opposing)` carried by each layer (split only).
    pub sub_depths: Option<(f64, f64)>,
    pub status: SolveStatus,
}

impl PressureSolution {
    /// Zero pressure, for non-contacting triangles.
    pub const NONE: PressureSolution = PressureSolution {
        pressure: 0.0,
        sub_depths: None,
        status: SolveStatus::ClosedForm,
    };
}

/// Computes contact pressure from overlap depth for a pair of layers.
#[derive(Debug, Clone, Copy)]
pub struct PressureSolver {
    formulation: FoundationFormulation,
    lumped: bool,
    tolerance: f64,
    max_iterations: u32,
}

impl Default for PressureSolver {
    fn default() -> Self {
        Self::new(
            FoundationFormulation::Linear,
            true,
            DEFAULT_SOLVER_TOLERANCE,
            DEFAULT_SOLVER_MAX_ITERATIONS,
        )
    }
}

impl PressureSolver {
    /// `tolerance` is relative to the total depth.
    pub fn new(
        formulation: FoundationFormulation,
        lumped: bool,
        tolerance: f64,
        max_iterations: u32,
    ) -> Self {
        Self {
            formulation,
            lumped,
            tolerance,
            max_iterations,
        }
    }

    pub fn formulation(&self) -> FoundationFormulation {
        self.formulation
    }

    pub fn is_lumped(&self) -> bool {
        self.lumped
    }

    /// Solves for pressure at total overlap `depth` between the layer
    /// `own` (the triangle being evaluated) and `opposing`.
    pub fn solve(
        &self,
        own: &LayerProperties,
        opposing: &LayerProperties,
        depth: f64,
    ) -> PressureSolution {
        if depth <= 0.0 {
            return PressureSolution::NONE;
        }
        let law = self.formulation.law();

        if self.lumped {
            let layer = LayerProperties::lumped(own, opposing);
            return PressureSolution {
                pressure: law.pressure(&layer, depth),
                sub_depths: None,
                status: SolveStatus::ClosedForm,
            };
        }

        let linear = linear_split(own, opposing, depth);
        match self.formulation {
            FoundationFormulation::Linear => linear,
            FoundationFormulation::Nonlinear => self.nonlinear_split(own, opposing, depth, linear),
        }
    }

    /// Strain energy per unit area stored at this triangle.
    ///
    /// Lumped: the equivalent layer's energy at the total depth. Split:
    /// both layers' energies at their sub-depths, `W₁(d₁) + W₂(d₂)`.
    pub fn energy_density(
        &self,
        own: &LayerProperties,
        opposing: &LayerProperties,
        depth: f64,
        solution: &PressureSolution,
    ) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        let law: &dyn FoundationLaw = match solution.status {
            SolveStatus::Fallback { .. } => FoundationFormulation::Linear.law(),
            _ => self.formulation.law(),
        };
        match solution.sub_depths {
            Some((own_depth, opposing_depth)) => {
                law.energy_density(own, own_depth) + law.energy_density(opposing, opposing_depth)
            }
            None => law.energy_density(&LayerProperties::lumped(own, opposing), depth),
        }
    }

    fn nonlinear_split(
        &self,
        own: &LayerProperties,
        opposing: &LayerProperties,
        depth: f64,
        seed: PressureSolution,
    ) -> PressureSolution {
        let system = SplitResidual::new(own, opposing, depth);
        let (d1, d2) = seed.sub_depths.unwrap_or((0.5 * depth, 0.5 * depth));
        let x0 = [seed.pressure / system.k1, d1, d2];

        let newton = NewtonSolver::new(
            self.tolerance * depth.max(f64::MIN_POSITIVE),
            self.max_iterations,
        );
        match newton.solve(&system, x0) {
            RootResult::Converged { x, iterations, .. } if x.iter().all(|v| v.is_finite()) => {
                PressureSolution {
                    pressure: (x[0] * system.k1).max(0.0),
                    sub_depths: Some((x[1], x[2])),
                    status: SolveStatus::Converged { iterations },
                }
            }
            result => {
                tracing::trace!(
                    depth,
                    iterations = result.iterations(),
                    residual = result.residual(),
                    "split solve did not converge"
                );
                PressureSolution {
                    status: SolveStatus::Fallback {
                        iterations: result.iterations(),
                        residual: result.residual(),
                    },
                    ..seed
                }
            }
        }
    }
}

/// Series-spring solution of the linear law.
fn linear_split(own: &LayerProperties, opposing: &LayerProperties, depth: f64) -> PressureSolution {
    let k1 = own.stiffness();
    let k2 = opposing.stiffness();
    let pressure = depth / (1.0 / k1 + 1.0 / k2);
    PressureSolution {
        pressure,
        sub_depths: Some((pressure / k1, pressure / k2)),
        status: SolveStatus::ClosedForm,
    }
}

/// Nonlinear split residual in depth units.
///
/// Unknowns `x = (p, d₁, d₂)` with `p = P/k₁`:
///
/// ```text
/// R₀ = p − g₁(d₁)
/// R₁ = p·k₁/k₂ − g₂(d₂)
/// R₂ = d₁ + d₂ − d
/// ```
///
/// where `gᵢ(x) = −hᵢ·ln(1 − x/hᵢ)` is the normalized nonlinear law.
struct SplitResidual {
    layers: [LayerProperties; 2],
    k1: f64,
    ratio: f64,
    depth: f64,
}

impl SplitResidual {
    fn new(own: &LayerProperties, opposing: &LayerProperties, depth: f64) -> Self {
        let k1 = own.stiffness();
        let k2 = opposing.stiffness();
        // Overlap cannot exceed the combined thickness.
        let limit = NonlinearFoundation::clamp_depth(own, depth)
            + NonlinearFoundation::clamp_depth(opposing, depth);
        Self {
            layers: [*own, *opposing],
            k1,
            ratio: k1 / k2,
            depth: depth.min(limit),
        }
    }
}

impl Residual<3> for SplitResidual {
    fn residual(&self, x: &[f64; 3]) -> [f64; 3] {
        let law = NonlinearFoundation;
        [
            x[0] - law.normalized_pressure(&self.layers[0], x[1]),
            x[0] * self.ratio - law.normalized_pressure(&self.layers[1], x[2]),
            x[1] + x[2] - self.depth,
        ]
    }

    fn jacobian(&self, x: &[f64; 3]) -> [[f64; 3]; 3] {
        let law = NonlinearFoundation;
        let g1 = law.normalized_tangent(&self.layers[0], x[1]).max(1.0);
        let g2 = law.normalized_tangent(&self.layers[1], x[2]).max(1.0);
        [
            [1.0, -g1, 0.0],
            [self.ratio, 0.0, -g2],
            [0.0, 1.0, 1.0],
        ]
    }

    fn project(&self, x: &mut [f64; 3]) {
        x[0] = x[0].max(0.0);
        x[1] = NonlinearFoundation::clamp_depth(&self.layers[0], x[1]);
        x[2] = NonlinearFoundation::clamp_depth(&self.layers[1], x[2]);
    }
}
