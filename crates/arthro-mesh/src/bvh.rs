//! Bounding-volume hierarchy over a mesh's triangles.
//!
//! The tree is built once from body-frame geometry. Because the mesh is
//! rigid, its axis-aligned boxes become oriented boxes in the world
//! once the pose is applied, so queries move the ray into the body
//! frame and the tree is never refitted.
//!
//! Construction splits at the median centroid along the longest axis
//! of the centroid bounds until a node holds at most
//! [`BVH_LEAF_SIZE`](arthro_types::constants::BVH_LEAF_SIZE) triangles.

use arthro_math::{Aabb, Ray, Vec3};
use arthro_types::constants::BVH_LEAF_SIZE;
use arthro_types::TriangleId;

use crate::mesh::TriangleMesh;

/// Node payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvhNodeKind {
    /// Children indices into `Bvh::nodes`.
    Internal { left: u32, right: u32 },
    /// Range into `Bvh::triangles`.
    Leaf { start: u32, count: u32 },
}

/// One node of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    /// Body-frame bounds of every triangle below this node.
    pub aabb: Aabb,
    pub kind: BvhNodeKind,
}

/// Read-only bounding-volume hierarchy (root is node 0).
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    /// Triangle ids in leaf order.
    triangles: Vec<TriangleId>,
}

impl Bvh {
    /// Builds the hierarchy from body-frame geometry.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let tri_count = mesh.triangle_count();
        let mut bounds = Vec::with_capacity(tri_count);
        let mut centroids = Vec::with_capacity(tri_count);
        for t in 0..tri_count {
            let verts = mesh.triangle_positions(t);
            bounds.push(Aabb::from_points(&verts));
            centroids.push((verts[0] + verts[1] + verts[2]) / 3.0);
        }

        // Flat meshes give zero-thickness boxes; pad them so rounding in
        // the body-frame ray cannot slip past a face it actually hits.
        let mesh_bounds = bounds.iter().fold(Aabb::EMPTY, |acc, b| acc.union(b));
        let margin = if mesh_bounds.is_empty() {
            0.0
        } else {
            (mesh_bounds.extent().max_element() * 1.0e-9).max(1.0e-12)
        };
        for b in &mut bounds {
            *b = b.inflated(margin);
        }

        let mut bvh = Bvh {
            nodes: Vec::with_capacity(2 * tri_count.max(1)),
            triangles: (0..tri_count as u32).map(TriangleId).collect(),
        };
        if tri_count > 0 {
            bvh.build_node(0, tri_count, &bounds, &centroids);
        }
        bvh
    }

    /// Recursively builds the node covering `triangles[start..end]`; returns its index.
    fn build_node(&mut self, start: usize, end: usize, bounds: &[Aabb], centroids: &[Vec3]) -> u32 {
        let aabb = self.triangles[start..end]
            .iter()
            .fold(Aabb::EMPTY, |acc, t| acc.union(&bounds[t.index()]));

        let index = self.nodes.len() as u32;
        let count = end - start;
        if count <= BVH_LEAF_SIZE {
            self.nodes.push(BvhNode {
                aabb,
                kind: BvhNodeKind::Leaf {
                    start: start as u32,
                    count: count as u32,
                },
            });
            return index;
        }

        let mut centroid_bounds = Aabb::EMPTY;
        for t in &self.triangles[start..end] {
            centroid_bounds.grow(centroids[t.index()]);
        }
        let axis = centroid_bounds.longest_axis();
        self.triangles[start..end].sort_by(|a, b| {
            centroids[a.index()][axis]
                .total_cmp(&centroids[b.index()][axis])
                .then(a.cmp(b))
        });
        let mid = start + count / 2;

        // Reserve the slot; children are filled in after recursion.
        self.nodes.push(BvhNode {
            aabb,
            kind: BvhNodeKind::Internal { left: 0, right: 0 },
        });
        let left = self.build_node(start, mid, bounds, centroids);
        let right = self.build_node(mid, end, bounds, centroids);
        self.nodes[index as usize].kind = BvhNodeKind::Internal { left, right };
        index
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Body-frame bounds of the whole mesh.
    pub fn root_aabb(&self) -> Aabb {
        self.nodes.first().map_or(Aabb::EMPTY, |n| n.aabb)
    }

    /// Number of levels (a single leaf has depth 1).
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[BvhNode], i: u32) -> usize {
            match nodes[i as usize].kind {
                BvhNodeKind::Leaf { .. } => 1,
                BvhNodeKind::Internal { left, right } => {
                    1 + walk(nodes, left).max(walk(nodes, right))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Visits every triangle in a leaf whose box the body-frame segment
    /// `ray(t)`, `t ∈ [t_min, t_max]`, touches. Subtrees whose box the
    /// segment misses are pruned.
    pub fn traverse_segment<F: FnMut(TriangleId)>(
        &self,
        local_ray: &Ray,
        t_min: f64,
        t_max: f64,
        mut visit: F,
    ) {
        if self.nodes.is_empty() {
            return;
        }
        let mut stack: Vec<u32> = Vec::with_capacity(64);
        stack.push(0);
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i as usize];
            if !node.aabb.intersects_segment(local_ray, t_min, t_max) {
                continue;
            }
            match node.kind {
                BvhNodeKind::Leaf { start, count } => {
                    let range = start as usize..(start + count) as usize;
                    for &t in &self.triangles[range] {
                        visit(t);
                    }
                }
                BvhNodeKind::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }
}
