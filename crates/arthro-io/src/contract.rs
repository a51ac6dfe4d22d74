//! Contact scene input/output contract types.
//!
//! These types define the I/O boundary of the contact engine. They are
//! serializable for file transport and CLI configuration.

use std::path::Path;

use arthro_contact::{BodyForces, ContactConfig, ContactEngine, ContactStats};
use arthro_math::Pose;
use arthro_mesh::{ContactMesh, MaterialFields, Region, TriangleMesh};
use arthro_types::{ArthroError, ArthroResult};
use serde::{Deserialize, Serialize};

/// Complete input for a contact evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInput {
    /// Mesh whose triangles cast rays.
    pub casting: MeshInput,

    /// Opposing mesh.
    pub target: MeshInput,

    #[serde(default)]
    pub config: ContactConfig,

    /// Poses to evaluate, in order. Empty means one evaluation at the
    /// identity pose.
    #[serde(default)]
    pub frames: Vec<FramePoses>,
}

/// One mesh with its per-triangle material data and regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshInput {
    pub name: String,

    /// Body-frame geometry.
    pub mesh: TriangleMesh,

    #[serde(default)]
    pub material: MaterialFields,

    #[serde(default)]
    pub regions: Vec<Region>,

    /// Optional two-way split into regions along a body-frame axis.
    #[serde(default)]
    pub split: Option<AxisSplit>,
}

/// Partition into two regions by centroid side along an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSplit {
    /// 0 = x, 1 = y, 2 = z.
    pub axis: usize,
    pub negative: String,
    pub positive: String,
}

/// Poses of both bodies at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramePoses {
    #[serde(default)]
    pub time: f64,
    pub casting: Pose,
    pub target: Pose,
}

impl Default for FramePoses {
    fn default() -> Self {
        Self {
            time: 0.0,
            casting: Pose::IDENTITY,
            target: Pose::IDENTITY,
        }
    }
}

/// Output of a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactOutput {
    /// Labels of each frame's `values`.
    pub labels: Vec<String>,
    pub frames: Vec<FrameReport>,
}

/// Results at one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub time: f64,
    pub casting: ContactStats,
    pub target: ContactStats,
    pub loads: BodyForces,
    pub potential_energy: f64,
    /// Flat record values, ordered as [`ContactOutput::labels`].
    pub values: Vec<f64>,
}

impl MeshInput {
    /// Builds the posed contact mesh with its regions.
    pub fn build(&self) -> ArthroResult<ContactMesh> {
        let mut mesh = ContactMesh::new(&self.name, self.mesh.clone(), self.material.clone())?
            .with_regions(self.regions.clone())?;
        if let Some(split) = &self.split {
            mesh.split_regions_by_axis(split.axis, &split.negative, &split.positive)?;
        }
        Ok(mesh)
    }
}

impl ContactInput {
    /// Parses a JSON document.
    pub fn from_json(source: &str) -> ArthroResult<Self> {
        serde_json::from_str(source).map_err(|e| ArthroError::Serialization(e.to_string()))
    }

    /// Reads and parses a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> ArthroResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> ArthroResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArthroError::Serialization(e.to_string()))
    }

    /// Builds both meshes and the engine.
    pub fn build_engine(&self) -> ArthroResult<ContactEngine> {
        ContactEngine::new(self.config.clone(), self.casting.build()?, self.target.build()?)
    }

    /// Frames to evaluate; a single identity frame if none were given.
    pub fn frames(&self) -> Vec<FramePoses> {
        if self.frames.is_empty() {
            vec![FramePoses::default()]
        } else {
            self.frames.clone()
        }
    }
}

impl ContactOutput {
    pub fn to_json(&self) -> ArthroResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArthroError::Serialization(e.to_string()))
    }

    /// One header row (`time` then the labels) and one row per frame.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("time");
        for label in &self.labels {
            out.push(',');
            out.push_str(label);
        }
        out.push('\n');
        for frame in &self.frames {
            out.push_str(&frame.time.to_string());
            for value in &frame.values {
                out.push(',');
                out.push_str(&value.to_string());
            }
            out.push('\n');
        }
        out
    }
}
