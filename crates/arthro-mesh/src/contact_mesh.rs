//! Posed contact mesh.
//!
//! `ContactMesh` is what the contact engine sees of a surface: world
//! triangle data for the current pose, a read-only hierarchy and
//! adjacency, per-triangle material fields and named regions. Only
//! [`ContactMesh::set_pose`] mutates it, and only between evaluations.

use arthro_math::{Pose, Ray, RayHit, Vec3};
use arthro_types::{ArthroError, ArthroResult, RegionId, TriangleId};

use crate::bvh::Bvh;
use crate::material::MaterialFields;
use crate::mesh::TriangleMesh;
use crate::region::Region;
use crate::topology::Topology;
use crate::triangle::Triangle;

/// A rigid triangulated surface attached to a body.
#[derive(Debug, Clone)]
pub struct ContactMesh {
    name: String,
    mesh: TriangleMesh,
    topology: Topology,
    bvh: Bvh,
    material: MaterialFields,
    regions: Vec<Region>,
    pose: Pose,
    /// World-space triangles at `pose`.
    triangles: Vec<Triangle>,
    /// Incremented every time the pose actually changes.
    pose_version: u64,
}

impl ContactMesh {
    /// Validates the mesh and material fields, builds topology and the
    /// hierarchy, and places the mesh at the identity pose.
    pub fn new(
        name: impl Into<String>,
        mesh: TriangleMesh,
        material: MaterialFields,
    ) -> ArthroResult<Self> {
        let name = name.into();
        mesh.validate()
            .map_err(|e| ArthroError::InvalidMesh(format!("{name}: {e}")))?;
        material
            .validate(mesh.triangle_count())
            .map_err(|e| ArthroError::InvalidMaterial(format!("{name}: {e}")))?;

        let topology = Topology::build(&mesh);
        let bvh = Bvh::build(&mesh);
        let pose = Pose::IDENTITY;
        let triangles = (0..mesh.triangle_count())
            .map(|t| Triangle::posed(mesh.triangle_positions(t), &pose))
            .collect();

        Ok(Self {
            name,
            mesh,
            topology,
            bvh,
            material,
            regions: Vec::new(),
            pose,
            triangles,
            pose_version: 0,
        })
    }

    /// Attaches named regions, checking every triangle id.
    pub fn with_regions(mut self, regions: Vec<Region>) -> ArthroResult<Self> {
        for region in &regions {
            self.check_region(region)?;
        }
        self.regions = regions;
        Ok(self)
    }

    /// Adds one named region.
    pub fn add_region(&mut self, region: Region) -> ArthroResult<()> {
        self.check_region(&region)?;
        self.regions.push(region);
        Ok(())
    }

    fn check_region(&self, region: &Region) -> ArthroResult<()> {
        let n = self.triangle_count();
        if let Some(bad) = region.triangles.iter().find(|t| t.index() >= n) {
            return Err(ArthroError::InvalidMesh(format!(
                "{}: region '{}' references triangle {} (triangle count: {})",
                self.name, region.name, bad.0, n
            )));
        }
        if self.regions.iter().any(|r| r.name == region.name) {
            return Err(ArthroError::InvalidMesh(format!(
                "{}: duplicate region name '{}'",
                self.name, region.name
            )));
        }
        Ok(())
    }

    /// Splits the mesh into two regions by the sign of each triangle's
    /// body-frame centroid coordinate along `axis` (0 = x, 1 = y, 2 = z),
    /// measured from the mesh's vertex centroid.
    pub fn split_regions_by_axis(
        &mut self,
        axis: usize,
        negative_name: &str,
        positive_name: &str,
    ) -> ArthroResult<()> {
        if axis > 2 {
            return Err(ArthroError::InvalidConfig(format!(
                "split axis must be 0, 1 or 2, got {axis}"
            )));
        }
        let center = self.mesh.vertex_centroid();
        let mut negative = Vec::new();
        let mut positive = Vec::new();
        for t in 0..self.triangle_count() {
            let [a, b, c] = self.mesh.triangle_positions(t);
            let centroid = (a + b + c) / 3.0;
            if centroid[axis] < center[axis] {
                negative.push(TriangleId(t as u32));
            } else {
                positive.push(TriangleId(t as u32));
            }
        }
        self.add_region(Region::new(negative_name, negative))?;
        self.add_region(Region::new(positive_name, positive))
    }

    /// Re-poses the mesh, refreshing world triangle data.
    ///
    /// Returns `true` if the pose changed (and the pose version advanced).
    pub fn set_pose(&mut self, pose: Pose) -> bool {
        if pose == self.pose {
            return false;
        }
        self.pose = pose;
        for (t, tri) in self.triangles.iter_mut().enumerate() {
            *tri = Triangle::posed(self.mesh.triangle_positions(t), &pose);
        }
        self.pose_version += 1;
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_version(&self) -> u64 {
        self.pose_version
    }

    /// Body-frame mesh.
    pub fn local_mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    pub fn material(&self) -> &MaterialFields {
        &self.material
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Position of the region called `name` in [`regions`](Self::regions).
    pub fn region_id(&self, name: &str) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|r| r.name == name)
            .map(|i| RegionId(i as u16))
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// World-space triangle at the current pose.
    #[inline]
    pub fn triangle(&self, t: TriangleId) -> &Triangle {
        &self.triangles[t.index()]
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Triangles sharing a vertex with `t`.
    #[inline]
    pub fn neighbors(&self, t: TriangleId) -> &[TriangleId] {
        self.topology.neighbors(t)
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(|t| t.area).sum()
    }

    /// World position of the body origin (moment reference point).
    pub fn reference_point(&self) -> Vec3 {
        self.pose.translation
    }

    /// Line test of a world ray against triangle `t` at the current pose.
    #[inline]
    pub fn intersect_triangle(&self, ray: &Ray, t: TriangleId) -> Option<RayHit> {
        let [a, b, c] = self.triangles[t.index()].vertices;
        ray.intersect_triangle(a, b, c)
    }

    /// Visits the triangles whose hierarchy leaves the world segment
    /// `ray(t)`, `t ∈ [t_min, t_max]`, touches.
    pub fn query_segment<F: FnMut(TriangleId)>(&self, ray: &Ray, t_min: f64, t_max: f64, visit: F) {
        let local = ray.to_local(&self.pose);
        self.bvh.traverse_segment(&local, t_min, t_max, visit);
    }
}
