//! Pressure records and contact statistics.
//!
//! Statistics are computed over any subset of a mesh's triangles: the
//! whole mesh or one of its named regions. Only contacting triangles
//! contribute.
//!
//! - area: `ΣA`
//! - mean proximity / pressure: area-weighted, `Σ(A·x) / ΣA`
//! - center of proximity / pressure: `Σ(A·x·c) / Σ(A·x)`
//! - force: `Σ P·A·n` along the mesh's own outward normals
//! - moment: `Σ (c − o) × (P·A·n)` about the body origin `o`

use arthro_math::Vec3;
use arthro_mesh::ContactMesh;
use arthro_types::{RegionId, TriangleId};
use serde::{Deserialize, Serialize};

use crate::proximity::ProximityRecord;

/// Pressure at one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureRecord {
    /// Contact pressure (Pa); 0 when out of contact.
    pub pressure: f64,
    /// Elastic energy stored under the triangle (J).
    pub potential_energy: f64,
    /// `(own, opposing)` sub-depths, split formulation only.
    pub sub_depths: Option<(f64, f64)>,
    /// The nonlinear split solve fell back to the linear estimate.
    pub fallback: bool,
}

impl PressureRecord {
    pub const NONE: PressureRecord = PressureRecord {
        pressure: 0.0,
        potential_energy: 0.0,
        sub_depths: None,
        fallback: false,
    };
}

/// Contact statistics over a set of triangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactStats {
    pub contacting_triangles: usize,
    pub contact_area: f64,
    pub mean_proximity: f64,
    pub max_proximity: f64,
    pub center_of_proximity: Vec3,
    pub mean_pressure: f64,
    pub max_pressure: f64,
    pub center_of_pressure: Vec3,
    pub force: Vec3,
    pub moment: Vec3,
    pub potential_energy: f64,
}

impl ContactStats {
    /// All zeros: the statistics of a set with no contact.
    pub const EMPTY: ContactStats = ContactStats {
        contacting_triangles: 0,
        contact_area: 0.0,
        mean_proximity: 0.0,
        max_proximity: 0.0,
        center_of_proximity: Vec3::ZERO,
        mean_pressure: 0.0,
        max_pressure: 0.0,
        center_of_pressure: Vec3::ZERO,
        force: Vec3::ZERO,
        moment: Vec3::ZERO,
        potential_energy: 0.0,
    };

    /// Aggregates the triangles yielded by `triangles`.
    ///
    /// `proximity` and `pressure` are indexed by triangle id.
    pub fn compute(
        mesh: &ContactMesh,
        triangles: impl IntoIterator<Item = TriangleId>,
        proximity: &[ProximityRecord],
        pressure: &[PressureRecord],
    ) -> Self {
        let origin = mesh.reference_point();
        let mut stats = ContactStats::EMPTY;
        let mut proximity_weight = 0.0;
        let mut proximity_moment = Vec3::ZERO;
        let mut pressure_weight = 0.0;
        let mut pressure_moment = Vec3::ZERO;

        for t in triangles {
            let (Some(prox), Some(press)) = (proximity.get(t.index()), pressure.get(t.index()))
            else {
                continue;
            };
            if !prox.is_contact() {
                continue;
            }
            let tri = mesh.triangle(t);
            let area = tri.area;

            stats.contacting_triangles += 1;
            stats.contact_area += area;
            stats.mean_proximity += area * prox.depth;
            stats.max_proximity = if stats.contacting_triangles == 1 {
                prox.depth
            } else {
                stats.max_proximity.max(prox.depth)
            };
            stats.mean_pressure += area * press.pressure;
            stats.max_pressure = stats.max_pressure.max(press.pressure);
            stats.potential_energy += press.potential_energy;

            proximity_weight += area * prox.depth;
            proximity_moment += tri.centroid * (area * prox.depth);
            pressure_weight += area * press.pressure;
            pressure_moment += tri.centroid * (area * press.pressure);

            let force = tri.normal * (press.pressure * area);
            stats.force += force;
            stats.moment += (tri.centroid - origin).cross(force);
        }

        if stats.contact_area > 0.0 {
            stats.mean_proximity /= stats.contact_area;
            stats.mean_pressure /= stats.contact_area;
        }
        if proximity_weight > 0.0 {
            stats.center_of_proximity = proximity_moment / proximity_weight;
        }
        if pressure_weight > 0.0 {
            stats.center_of_pressure = pressure_moment / pressure_weight;
        }
        stats
    }
}

impl Default for ContactStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Named-region statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub name: String,
    pub stats: ContactStats,
}

/// Whole-mesh and per-region statistics for one mesh side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    pub total: ContactStats,
    pub regions: Vec<RegionStats>,
}

impl SideStats {
    /// Aggregates the whole mesh and each of its regions.
    pub fn compute(
        mesh: &ContactMesh,
        proximity: &[ProximityRecord],
        pressure: &[PressureRecord],
    ) -> Self {
        let all = (0..mesh.triangle_count()).map(|t| TriangleId(t as u32));
        let total = ContactStats::compute(mesh, all, proximity, pressure);
        let regions = mesh
            .regions()
            .iter()
            .map(|region| RegionStats {
                name: region.name.clone(),
                stats: ContactStats::compute(
                    mesh,
                    region.triangles.iter().copied(),
                    proximity,
                    pressure,
                ),
            })
            .collect();
        Self { total, regions }
    }

    /// Statistics of the region at `id`, in mesh region order.
    pub fn region_at(&self, id: RegionId) -> Option<&ContactStats> {
        self.regions.get(id.index()).map(|r| &r.stats)
    }

    pub fn region(&self, name: &str) -> Option<&ContactStats> {
        self.regions.iter().find(|r| r.name == name).map(|r| &r.stats)
    }
}
