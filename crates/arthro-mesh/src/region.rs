//! Named triangle subsets for regional statistics.

use arthro_types::TriangleId;
use serde::{Deserialize, Serialize};

/// A named, predefined subset of a mesh's triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub triangles: Vec<TriangleId>,
}

impl Region {
    pub fn new(name: impl Into<String>, triangles: Vec<TriangleId>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
