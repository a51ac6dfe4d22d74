//! Rays and ray/triangle intersection.
//!
//! Contact rays are treated as infinite lines: the hit parameter `t`
//! is signed, and the caller decides which side of the origin counts.

use arthro_types::constants::{BARYCENTRIC_TOLERANCE, RAY_PARALLEL_EPSILON};
use glam::DVec3;

use crate::pose::Pose;

/// A ray with unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

/// Intersection of a ray line with a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Signed distance along the ray direction.
    pub t: f64,
    /// World position of the hit.
    pub point: DVec3,
    /// Barycentric coordinates of the hit with respect to `(a, b, c)`.
    pub barycentric: [f64; 3],
}

impl Ray {
    /// Creates a ray; `direction` is normalized.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Expresses this (world) ray in the body frame of `pose`.
    pub fn to_local(&self, pose: &Pose) -> Ray {
        Ray {
            origin: pose.inverse_transform_point(self.origin),
            direction: pose.inverse_transform_vector(self.direction),
        }
    }

    /// Möller–Trumbore test of the ray's supporting line against triangle `(a, b, c)`.
    ///
    /// Hits on either side of the origin are reported. Returns `None`
    /// for a miss or when the line is (nearly) parallel to the plane.
    pub fn intersect_triangle(&self, a: DVec3, b: DVec3, c: DVec3) -> Option<RayHit> {
        let e1 = b - a;
        let e2 = c - a;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        if det.abs() < RAY_PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(-BARYCENTRIC_TOLERANCE..=1.0 + BARYCENTRIC_TOLERANCE).contains(&u) {
            return None;
        }

        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv_det;
        if v < -BARYCENTRIC_TOLERANCE || u + v > 1.0 + BARYCENTRIC_TOLERANCE {
            return None;
        }

        let t = e2.dot(q) * inv_det;
        if !t.is_finite() {
            return None;
        }

        Some(RayHit {
            t,
            point: self.at(t),
            barycentric: [1.0 - u - v, u, v],
        })
    }
}
