//! Strongly-typed identifiers for contact entities.
//!
//! Newtype wrappers prevent accidental mixing of vertex indices
//! with triangle indices or region indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index into a mesh's vertex arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Index into a mesh's triangle array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriangleId(pub u32);

/// Index into a mesh's region list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u16);

impl VertexId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TriangleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl RegionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for TriangleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u16> for RegionId {
    fn from(val: u16) -> Self {
        Self(val)
    }
}

/// Which of the two meshes of a contact pair a quantity belongs to.
///
/// Rays are cast from the casting mesh onto the target mesh; the
/// engine also runs the reverse pass so both sides carry outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshSide {
    Casting,
    Target,
}

impl MeshSide {
    /// Both sides, casting first.
    pub const BOTH: [MeshSide; 2] = [MeshSide::Casting, MeshSide::Target];

    /// The opposing side.
    pub fn opposite(self) -> Self {
        match self {
            MeshSide::Casting => MeshSide::Target,
            MeshSide::Target => MeshSide::Casting,
        }
    }

    /// 0 for casting, 1 for target.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MeshSide::Casting => 0,
            MeshSide::Target => 1,
        }
    }

    /// Lower-case label used in record names.
    pub fn label(self) -> &'static str {
        match self {
            MeshSide::Casting => "casting",
            MeshSide::Target => "target",
        }
    }
}

impl fmt::Display for MeshSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
