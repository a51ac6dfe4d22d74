//! World-space triangle record.

use arthro_math::{Pose, Vec3};
use serde::{Deserialize, Serialize};

/// Geometry of one triangle at the current pose.
///
/// Recomputed whenever the owning mesh is re-posed; immutable in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// World-space vertices, counter-clockwise seen from outside.
    pub vertices: [Vec3; 3],
    /// World-space centroid.
    pub centroid: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
    /// Area (pose-invariant).
    pub area: f64,
}

impl Triangle {
    /// Builds the record from three vertices.
    pub fn from_vertices(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let cross = (b - a).cross(c - a);
        let len = cross.length();
        let normal = if len > 0.0 { cross / len } else { Vec3::ZERO };
        Self {
            vertices: [a, b, c],
            centroid: (a + b + c) / 3.0,
            normal,
            area: 0.5 * len,
        }
    }

    /// Places body-frame vertices in the world.
    pub fn posed(local: [Vec3; 3], pose: &Pose) -> Self {
        Self::from_vertices(
            pose.transform_point(local[0]),
            pose.transform_point(local[1]),
            pose.transform_point(local[2]),
        )
    }
}
