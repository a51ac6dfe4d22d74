//! # arthro-mesh
//!
//! Rigid contact meshes: the geometry provider consumed by the
//! proximity detector and the pressure solver.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Body-frame vertex positions (SoA) and triangle indices.
//! - [`Topology`]: Vertex-to-triangle fans and vertex-sharing triangle neighbours.
//! - [`Bvh`]: Bounding-volume hierarchy built once in the body frame.
//! - [`ContactMesh`]: A posed mesh: world-space [`Triangle`] cache, adjacency,
//!   hierarchy, per-triangle [`MaterialFields`] and named [`Region`]s.
//! - Procedural generators for test and demo meshes (quad grids, UV spheres).

pub mod bvh;
pub mod contact_mesh;
pub mod generators;
pub mod material;
pub mod mesh;
pub mod region;
pub mod topology;
pub mod triangle;

pub use bvh::Bvh;
pub use contact_mesh::ContactMesh;
pub use material::{MaterialField, MaterialFields};
pub use mesh::TriangleMesh;
pub use region::Region;
pub use topology::Topology;
pub use triangle::Triangle;
