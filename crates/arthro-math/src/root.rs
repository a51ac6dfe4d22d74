//! Fixed-size Newton root finder.
//!
//! Solves `R(x) = 0` for small systems whose size is known at compile
//! time (the split pressure solve is a 3×3 system). The residual is a
//! typed trait object rather than a raw callback, and the outcome is a
//! tagged [`RootResult`] so callers must handle non-convergence.
//!
//! ## Algorithm
//! 1. Evaluate the residual; stop if its max-norm is within tolerance
//! 2. Solve `J·dx = −R` by Gaussian elimination with partial pivoting
//! 3. Backtrack (halve the step) until the residual norm decreases
//! 4. Let the residual project the iterate back into its domain

/// A residual system of `N` equations in `N` unknowns.
pub trait Residual<const N: usize> {
    /// Evaluates `R(x)`.
    fn residual(&self, x: &[f64; N]) -> [f64; N];

    /// Evaluates the Jacobian `∂R_i/∂x_j` (row `i`, column `j`).
    ///
    /// Defaults to forward differences.
    fn jacobian(&self, x: &[f64; N]) -> [[f64; N]; N] {
        finite_difference_jacobian(self, x)
    }

    /// Moves `x` back into the residual's domain (e.g. below a singularity).
    fn project(&self, _x: &mut [f64; N]) {}
}

/// Outcome of a root solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootResult<const N: usize> {
    /// `|R(x)|∞ ≤ tolerance`.
    Converged {
        x: [f64; N],
        iterations: u32,
        residual: f64,
    },
    /// Iteration cap reached or the Jacobian became singular. `x` is the
    /// last iterate, kept for diagnostics only.
    NotConverged {
        x: [f64; N],
        iterations: u32,
        residual: f64,
    },
}

impl<const N: usize> RootResult<N> {
    pub fn is_converged(&self) -> bool {
        matches!(self, RootResult::Converged { .. })
    }

    /// Final residual max-norm.
    pub fn residual(&self) -> f64 {
        match self {
            RootResult::Converged { residual, .. } | RootResult::NotConverged { residual, .. } => {
                *residual
            }
        }
    }

    pub fn iterations(&self) -> u32 {
        match self {
            RootResult::Converged { iterations, .. }
            | RootResult::NotConverged { iterations, .. } => *iterations,
        }
    }
}

/// Damped Newton iteration with a bounded iteration count.
#[derive(Debug, Clone, Copy)]
pub struct NewtonSolver {
    /// Max-norm residual threshold.
    pub tolerance: f64,
    /// Maximum Newton steps.
    pub max_iterations: u32,
    /// Maximum step halvings per Newton step.
    pub max_backtracks: u32,
}

impl NewtonSolver {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            max_backtracks: 30,
        }
    }

    /// Runs Newton's method from `x0`.
    pub fn solve<const N: usize, R: Residual<N> + ?Sized>(
        &self,
        system: &R,
        x0: [f64; N],
    ) -> RootResult<N> {
        let mut x = x0;
        system.project(&mut x);
        let mut r = system.residual(&x);
        let mut norm = max_norm(&r);

        for iteration in 0..self.max_iterations {
            if norm <= self.tolerance {
                return RootResult::Converged {
                    x,
                    iterations: iteration,
                    residual: norm,
                };
            }

            let jac = system.jacobian(&x);
            let mut rhs = r;
            for v in rhs.iter_mut() {
                *v = -*v;
            }
            let Some(dx) = solve_dense(jac, rhs) else {
                return RootResult::NotConverged {
                    x,
                    iterations: iteration,
                    residual: norm,
                };
            };

            let mut step = 1.0;
            let mut backtracks = 0;
            loop {
                let mut candidate = x;
                for i in 0..N {
                    candidate[i] += step * dx[i];
                }
                system.project(&mut candidate);
                let r_new = system.residual(&candidate);
                let norm_new = max_norm(&r_new);
                if norm_new < norm || backtracks >= self.max_backtracks {
                    x = candidate;
                    r = r_new;
                    norm = norm_new;
                    break;
                }
                step *= 0.5;
                backtracks += 1;
            }
        }

        if norm <= self.tolerance {
            RootResult::Converged {
                x,
                iterations: self.max_iterations,
                residual: norm,
            }
        } else {
            RootResult::NotConverged {
                x,
                iterations: self.max_iterations,
                residual: norm,
            }
        }
    }
}

/// Max-norm; any non-finite component makes the norm infinite.
fn max_norm<const N: usize>(r: &[f64; N]) -> f64 {
    r.iter().fold(0.0_f64, |acc, v| {
        if v.is_finite() {
            acc.max(v.abs())
        } else {
            f64::INFINITY
        }
    })
}

/// Forward-difference Jacobian.
pub fn finite_difference_jacobian<const N: usize, R: Residual<N> + ?Sized>(
    system: &R,
    x: &[f64; N],
) -> [[f64; N]; N] {
    let r0 = system.residual(x);
    let mut jac = [[0.0; N]; N];
    for j in 0..N {
        let h = f64::EPSILON.sqrt() * x[j].abs().max(1.0);
        let mut xp = *x;
        xp[j] += h;
        let rp = system.residual(&xp);
        for i in 0..N {
            jac[i][j] = (rp[i] - r0[i]) / h;
        }
    }
    jac
}

/// Solves `a·x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` if `a` is singular to working precision.
pub fn solve_dense<const N: usize>(mut a: [[f64; N]; N], mut b: [f64; N]) -> Option<[f64; N]> {
    for col in 0..N {
        let pivot = (col..N).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if !(a[pivot][col].abs() > f64::MIN_POSITIVE) {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..N {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let mut sum = b[row];
        for k in (row + 1)..N {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}
