//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! Vertex positions are stored per coordinate channel in the mesh's
//! body frame:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! The mesh never deforms; the body pose places it in the world.

use arthro_math::Vec3;
use arthro_types::constants::DEGENERATE_AREA_THRESHOLD;
use arthro_types::{ArthroError, ArthroResult};
use serde::{Deserialize, Serialize};

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices (body frame).
    pub pos_x: Vec<f64>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f64>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f64>,

    /// Triangle indices, each triangle is [v0, v1, v2], counter-clockwise
    /// seen from outside, so `(v1 - v0) × (v2 - v0)` is the outward normal.
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the body-frame position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the three body-frame vertex positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.position(a as usize),
            self.position(b as usize),
            self.position(c as usize),
        ]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Body-frame centroid of all vertices.
    pub fn vertex_centroid(&self) -> Vec3 {
        let n = self.vertex_count();
        if n == 0 {
            return Vec3::ZERO;
        }
        let sum = (0..n).fold(Vec3::ZERO, |acc, i| acc + self.position(i));
        sum / n as f64
    }

    /// Reverses the winding of every triangle, flipping all normals.
    pub fn flip_orientation(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    /// Translates every vertex by `offset` (body frame).
    pub fn translate(&mut self, offset: Vec3) {
        for i in 0..self.vertex_count() {
            let p = self.position(i) + offset;
            self.set_position(i, p);
        }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices or zero area)
    pub fn validate(&self) -> ArthroResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(ArthroError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(ArthroError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        if self.indices.is_empty() {
            return Err(ArthroError::InvalidMesh("Mesh has no triangles".into()));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(ArthroError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(ArthroError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
            let [pa, pb, pc] = self.triangle_positions(t);
            let area2 = (pb - pa).cross(pc - pa).length_squared();
            if !(area2 > DEGENERATE_AREA_THRESHOLD) {
                return Err(ArthroError::InvalidMesh(format!(
                    "Triangle {} has zero area",
                    t
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout, the
    /// layout most surface-mesh exporters write.
    pub fn from_interleaved(positions: &[f64], indices: &[u32]) -> ArthroResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(ArthroError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for p in positions.chunks_exact(3) {
            mesh.pos_x.push(p[0]);
            mesh.pos_y.push(p[1]);
            mesh.pos_z.push(p[2]);
        }

        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }
}
