//! Body loads and the contact-force capability.
//!
//! A host multibody simulation only needs "given poses, what loads act
//! on the two bodies". [`ContactForce`] is that interface.

use arthro_math::{Pose, Vec3};
use arthro_mesh::ContactMesh;
use arthro_types::{MeshSide, TriangleId};
use serde::{Deserialize, Serialize};

use crate::stats::PressureRecord;

/// Force and moment acting on one body. The moment is taken about the
/// body's pose origin, expressed in world axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialForce {
    pub force: Vec3,
    pub moment: Vec3,
}

impl SpatialForce {
    pub const ZERO: SpatialForce = SpatialForce {
        force: Vec3::ZERO,
        moment: Vec3::ZERO,
    };
}

/// Loads on both bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyForces {
    pub casting: SpatialForce,
    pub target: SpatialForce,
}

impl BodyForces {
    pub fn side(&self, side: MeshSide) -> &SpatialForce {
        match side {
            MeshSide::Casting => &self.casting,
            MeshSide::Target => &self.target,
        }
    }

    /// Integrates casting-side pressure into body loads.
    ///
    /// Each contacting casting triangle pushes the target body along the
    /// casting normal with `P·A`, applied at the casting centroid; the
    /// casting body receives the reaction.
    pub fn from_casting_pressure(
        casting: &ContactMesh,
        target: &ContactMesh,
        pressure: &[PressureRecord],
    ) -> Self {
        let casting_origin = casting.reference_point();
        let target_origin = target.reference_point();
        let mut loads = BodyForces::default();

        for (i, record) in pressure.iter().enumerate() {
            if record.pressure <= 0.0 {
                continue;
            }
            let tri = casting.triangle(TriangleId(i as u32));
            let force = tri.normal * (record.pressure * tri.area);

            loads.target.force += force;
            loads.target.moment += (tri.centroid - target_origin).cross(force);
            loads.casting.force -= force;
            loads.casting.moment += (tri.centroid - casting_origin).cross(-force);
        }
        loads
    }
}

/// Minimal capability of a contact force element: compute loads and
/// energy for the poses it was last given.
pub trait ContactForce {
    /// Moves both bodies. Returns `true` if either pose changed.
    fn set_poses(&mut self, casting: Pose, target: Pose) -> bool;

    /// Loads on both bodies at the current poses.
    fn body_forces(&mut self) -> BodyForces;

    /// Elastic energy stored in the contact at the current poses (J).
    fn potential_energy(&mut self) -> f64;
}
