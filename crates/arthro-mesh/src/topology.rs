//! Mesh topology queries.
//!
//! Builds adjacency data structures from the triangle index buffer.
//! The proximity detector uses the triangle neighbourhood to re-find
//! a contact that slid off the previously contacting triangle.

use arthro_types::{TriangleId, VertexId};

use crate::mesh::TriangleMesh;

/// Precomputed topology information for a triangle mesh.
///
/// Built once when a mesh is loaded. Provides O(1) adjacency queries.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of triangles that contain it.
    pub vertex_triangles: Vec<Vec<TriangleId>>,

    /// For each triangle, every other triangle sharing at least one
    /// vertex with it, sorted by id.
    pub triangle_neighbors: Vec<Vec<TriangleId>>,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let tri_count = mesh.triangle_count();

        // Build vertex → triangle adjacency
        let mut vertex_triangles: Vec<Vec<TriangleId>> = vec![Vec::new(); vertex_count];
        for t in 0..tri_count {
            for v in mesh.triangle(t) {
                vertex_triangles[v as usize].push(TriangleId(t as u32));
            }
        }

        // Triangle → triangles sharing a vertex
        let mut triangle_neighbors: Vec<Vec<TriangleId>> = Vec::with_capacity(tri_count);
        for t in 0..tri_count {
            let this = TriangleId(t as u32);
            let mut neighbors: Vec<TriangleId> = mesh
                .triangle(t)
                .iter()
                .flat_map(|&v| vertex_triangles[v as usize].iter().copied())
                .filter(|&n| n != this)
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            triangle_neighbors.push(neighbors);
        }

        Self {
            vertex_triangles,
            triangle_neighbors,
        }
    }

    /// Triangles sharing a vertex with `tri`.
    #[inline]
    pub fn neighbors(&self, tri: TriangleId) -> &[TriangleId] {
        &self.triangle_neighbors[tri.index()]
    }

    /// Triangles using vertex `v`.
    #[inline]
    pub fn vertex_triangles(&self, v: VertexId) -> &[TriangleId] {
        &self.vertex_triangles[v.index()]
    }

    /// Returns the number of vertices referenced by no triangle.
    pub fn isolated_vertex_count(&self) -> usize {
        self.vertex_triangles.iter().filter(|tris| tris.is_empty()).count()
    }
}
