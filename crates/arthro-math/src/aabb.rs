//! Axis-aligned bounding boxes.
//!
//! Boxes are built in a mesh's body frame. Once the body pose is
//! applied they become oriented boxes in the world, which is why
//! queries transform the ray into the body frame instead of
//! re-fitting boxes every step.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::ray::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// An inverted box that any point grows into.
    pub const EMPTY: Self = Self {
        min: DVec3::splat(f64::INFINITY),
        max: DVec3::splat(f64::NEG_INFINITY),
    };

    /// Smallest box containing all `points`.
    pub fn from_points(points: &[DVec3]) -> Self {
        let mut aabb = Self::EMPTY;
        for &p in points {
            aabb.grow(p);
        }
        aabb
    }

    /// Extends the box to contain `p`.
    #[inline]
    pub fn grow(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the box grown by `margin` on every side.
    pub fn inflated(&self, margin: f64) -> Aabb {
        Aabb {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Returns true if no point has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> DVec3 {
        0.5 * (self.min + self.max)
    }

    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    /// Index (0 = x, 1 = y, 2 = z) of the longest side.
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    /// Returns true if `p` lies inside or on the box.
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Slab test of the segment `origin + t·direction`, `t ∈ [t_min, t_max]`.
    ///
    /// `t_min` may be negative: contact rays are lines searched on both
    /// sides of their origin.
    pub fn intersects_segment(&self, ray: &Ray, t_min: f64, t_max: f64) -> bool {
        if self.is_empty() || t_min > t_max {
            return false;
        }
        let mut lo = t_min;
        let mut hi = t_max;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let (bmin, bmax) = (self.min[axis], self.max[axis]);
            if d.abs() < f64::EPSILON {
                if o < bmin || o > bmax {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (bmin - o) * inv;
            let mut t1 = (bmax - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            lo = lo.max(t0);
            hi = hi.min(t1);
            if lo > hi {
                return false;
            }
        }
        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
