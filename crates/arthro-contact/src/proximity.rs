//! Triangle-level proximity detection between two posed meshes.
//!
//! For every triangle of the source mesh a line is cast from its
//! centroid along its normal and tested against the opposing mesh. The
//! search runs in three stages, cheapest first:
//!
//! 1. **Cached**: the triangle hit on the previous pass
//! 2. **Neighbor**: triangles sharing a vertex with the cached one
//! 3. **Hierarchy**: BVH traversal over the whole opposing mesh,
//!    keeping the valid hit with the smallest absolute depth
//!
//! A triangle with no valid hit is out of contact and its cache entry
//! is cleared, so the next pass starts that triangle from scratch.

use arthro_math::Ray;
use arthro_mesh::ContactMesh;
use arthro_types::TriangleId;
use serde::{Deserialize, Serialize};

/// Closed interval of overlap depths counted as contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthBounds {
    pub min: f64,
    pub max: f64,
}

impl DepthBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both ends inclusive.
    #[inline]
    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.min && depth <= self.max
    }
}

/// How a triangle's proximity was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Cached,
    Neighbor,
    Hierarchy,
    /// No valid hit.
    None,
}

/// Proximity of one source triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityRecord {
    /// Opposing triangle in contact, if any.
    pub target: Option<TriangleId>,
    /// Signed overlap depth; 0 when out of contact.
    pub depth: f64,
    pub method: DetectionMethod,
}

impl ProximityRecord {
    pub const NONE: ProximityRecord = ProximityRecord {
        target: None,
        depth: 0.0,
        method: DetectionMethod::None,
    };

    #[inline]
    pub fn is_contact(&self) -> bool {
        self.target.is_some()
    }
}

/// Per-pass counts of how triangles were resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityPassSummary {
    pub cached: u32,
    pub neighbor: u32,
    pub hierarchy: u32,
    pub missed: u32,
}

impl ProximityPassSummary {
    /// Triangles with a valid proximity.
    pub fn contacting(&self) -> u32 {
        self.cached + self.neighbor + self.hierarchy
    }

    fn record(&mut self, method: DetectionMethod) {
        match method {
            DetectionMethod::Cached => self.cached += 1,
            DetectionMethod::Neighbor => self.neighbor += 1,
            DetectionMethod::Hierarchy => self.hierarchy += 1,
            DetectionMethod::None => self.missed += 1,
        }
    }
}

/// Proximity detector for one source → opposing mesh direction.
///
/// Owns the temporal coherence cache: one slot per source triangle
/// holding the opposing triangle it last hit.
#[derive(Debug, Clone, Default)]
pub struct ProximityDetector {
    cache: Vec<Option<TriangleId>>,
}

impl ProximityDetector {
    pub fn new(source_triangle_count: usize) -> Self {
        Self {
            cache: vec![None; source_triangle_count],
        }
    }

    /// Cached opposing triangle for `t` from the last pass.
    pub fn cached(&self, t: TriangleId) -> Option<TriangleId> {
        self.cache.get(t.index()).copied().flatten()
    }

    /// Number of source triangles with a cached pairing.
    pub fn cached_count(&self) -> usize {
        self.cache.iter().filter(|c| c.is_some()).count()
    }

    /// Forgets every cached pairing.
    pub fn clear(&mut self) {
        self.cache.iter_mut().for_each(|c| *c = None);
    }

    /// Detects the proximity of every `source` triangle against `opposing`.
    ///
    /// Both meshes must already be at their current pose. Re-running on
    /// an unchanged pose reproduces the same records.
    pub fn detect(
        &mut self,
        source: &ContactMesh,
        opposing: &ContactMesh,
        bounds: DepthBounds,
    ) -> (Vec<ProximityRecord>, ProximityPassSummary) {
        if self.cache.len() != source.triangle_count() {
            self.cache = vec![None; source.triangle_count()];
        }

        let mut records = Vec::with_capacity(source.triangle_count());
        let mut summary = ProximityPassSummary::default();

        for (i, slot) in self.cache.iter_mut().enumerate() {
            let tri = source.triangle(TriangleId(i as u32));
            let probe = Probe {
                ray: Ray::new(tri.centroid, tri.normal),
                bounds,
            };

            let record = probe.search(opposing, *slot);
            *slot = record.target;
            summary.record(record.method);
            records.push(record);
        }

        (records, summary)
    }
}

/// Reference search: tests every source triangle against every opposing
/// triangle, keeping the valid hit with the smallest absolute depth.
pub fn exhaustive_search(
    source: &ContactMesh,
    opposing: &ContactMesh,
    bounds: DepthBounds,
) -> Vec<ProximityRecord> {
    (0..source.triangle_count())
        .map(|i| {
            let tri = source.triangle(TriangleId(i as u32));
            let probe = Probe {
                ray: Ray::new(tri.centroid, tri.normal),
                bounds,
            };
            let mut best = Closest::default();
            for j in 0..opposing.triangle_count() {
                let candidate = TriangleId(j as u32);
                if let Some(depth) = probe.test(opposing, candidate) {
                    best.offer(candidate, depth);
                }
            }
            best.into_record(DetectionMethod::Hierarchy)
        })
        .collect()
}

/// A cast line from one source triangle.
struct Probe {
    ray: Ray,
    bounds: DepthBounds,
}

impl Probe {
    fn search(&self, opposing: &ContactMesh, cached: Option<TriangleId>) -> ProximityRecord {
        if let Some(previous) = cached {
            if let Some(depth) = self.test(opposing, previous) {
                return ProximityRecord {
                    target: Some(previous),
                    depth,
                    method: DetectionMethod::Cached,
                };
            }
            for &neighbor in opposing.neighbors(previous) {
                if let Some(depth) = self.test(opposing, neighbor) {
                    return ProximityRecord {
                        target: Some(neighbor),
                        depth,
                        method: DetectionMethod::Neighbor,
                    };
                }
            }
        }

        // Overlap depth d = −t, so the valid segment is t ∈ [−max, −min].
        let mut best = Closest::default();
        opposing.query_segment(&self.ray, -self.bounds.max, -self.bounds.min, |candidate| {
            if let Some(depth) = self.test(opposing, candidate) {
                best.offer(candidate, depth);
            }
        });
        best.into_record(DetectionMethod::Hierarchy)
    }

    /// Depth of a valid hit on `candidate`, if any.
    ///
    /// Valid: the line crosses the triangle, the surfaces face each other
    /// and the depth lies within bounds.
    fn test(&self, opposing: &ContactMesh, candidate: TriangleId) -> Option<f64> {
        let facing = self.ray.direction.dot(opposing.triangle(candidate).normal);
        if facing >= 0.0 {
            return None;
        }
        let hit = opposing.intersect_triangle(&self.ray, candidate)?;
        let depth = -hit.t;
        self.bounds.contains(depth).then_some(depth)
    }
}

/// Smallest-|depth| accumulator; ties keep the lower triangle id.
#[derive(Default)]
struct Closest {
    best: Option<(TriangleId, f64)>,
}

impl Closest {
    fn offer(&mut self, candidate: TriangleId, depth: f64) {
        let better = match self.best {
            None => true,
            Some((id, d)) => {
                depth.abs() < d.abs() || (depth.abs() == d.abs() && candidate < id)
            }
        };
        if better {
            self.best = Some((candidate, depth));
        }
    }

    fn into_record(self, method: DetectionMethod) -> ProximityRecord {
        match self.best {
            Some((target, depth)) => ProximityRecord {
                target: Some(target),
                depth,
                method,
            },
            None => ProximityRecord::NONE,
        }
    }
}
