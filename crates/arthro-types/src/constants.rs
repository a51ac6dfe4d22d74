//! Numeric constants and contact defaults.

/// Default minimum overlap depth counted as contact (meters).
pub const DEFAULT_MIN_PROXIMITY: f64 = 0.0;

/// Default maximum overlap depth counted as contact (meters).
pub const DEFAULT_MAX_PROXIMITY: f64 = 0.01;

/// Default relative tolerance of the split nonlinear pressure solve.
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1.0e-10;

/// Default iteration cap of the split nonlinear pressure solve.
pub const DEFAULT_SOLVER_MAX_ITERATIONS: u32 = 50;

/// Determinant threshold below which a ray/triangle test is a miss.
pub const RAY_PARALLEL_EPSILON: f64 = 1.0e-12;

/// Barycentric slack so rays through shared edges still hit.
pub const BARYCENTRIC_TOLERANCE: f64 = 1.0e-9;

/// Fraction of the layer thickness the nonlinear law clamps depth to.
pub const NONLINEAR_DEPTH_LIMIT: f64 = 1.0 - 1.0e-6;

/// Area threshold for degenerate triangle detection.
pub const DEGENERATE_AREA_THRESHOLD: f64 = 1.0e-20;

/// Maximum triangles stored in a bounding-volume hierarchy leaf.
pub const BVH_LEAF_SIZE: usize = 4;
