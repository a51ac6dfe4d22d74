//! Contact input validation.
//!
//! Validates inputs before the engine receives them, catching data-level
//! errors early with clear diagnostics.

use arthro_types::{ArthroError, ArthroResult, MeshSide};

use crate::contract::{ContactInput, FramePoses, MeshInput};

/// Validates a complete contact input.
///
/// Checks:
/// - Mesh integrity (SoA consistency, valid indices, no degenerate triangles)
/// - Material field lengths and ranges
/// - Region triangle ids and names
/// - Configuration, including variable-property fields on each mesh
/// - Frame poses are finite and times non-decreasing
pub fn validate_input(input: &ContactInput) -> ArthroResult<()> {
    validate_mesh(MeshSide::Casting, &input.casting)?;
    validate_mesh(MeshSide::Target, &input.target)?;

    input.config.validate()?;

    for (i, frame) in input.frames.iter().enumerate() {
        validate_frame(i, frame)?;
    }
    if let Some(i) = input
        .frames
        .windows(2)
        .position(|pair| pair[1].time < pair[0].time)
    {
        return Err(ArthroError::InvalidConfig(format!(
            "frame {} time ({}) is earlier than frame {} ({})",
            i + 1,
            input.frames[i + 1].time,
            i,
            input.frames[i].time
        )));
    }

    let casting = input.casting.build()?;
    let target = input.target.build()?;
    input
        .config
        .params(MeshSide::Casting)
        .validate_for_mesh(MeshSide::Casting, &casting)?;
    input
        .config
        .params(MeshSide::Target)
        .validate_for_mesh(MeshSide::Target, &target)?;

    Ok(())
}

fn validate_mesh(side: MeshSide, input: &MeshInput) -> ArthroResult<()> {
    input
        .mesh
        .validate()
        .map_err(|e| ArthroError::InvalidMesh(format!("{side} mesh '{}': {e}", input.name)))?;
    input
        .material
        .validate(input.mesh.triangle_count())
        .map_err(|e| ArthroError::InvalidMaterial(format!("{side} mesh '{}': {e}", input.name)))?;

    let n = input.mesh.triangle_count();
    for region in &input.regions {
        if region.is_empty() {
            return Err(ArthroError::InvalidMesh(format!(
                "{side} mesh '{}': region '{}' is empty",
                input.name, region.name
            )));
        }
        if let Some(bad) = region.triangles.iter().find(|t| t.index() >= n) {
            return Err(ArthroError::InvalidMesh(format!(
                "{side} mesh '{}': region '{}' references triangle {} of {}",
                input.name, region.name, bad.0, n
            )));
        }
    }
    if let Some(split) = &input.split {
        if split.axis > 2 {
            return Err(ArthroError::InvalidConfig(format!(
                "{side} mesh '{}': split axis must be 0, 1 or 2, got {}",
                input.name, split.axis
            )));
        }
        if split.negative == split.positive {
            return Err(ArthroError::InvalidConfig(format!(
                "{side} mesh '{}': split region names must differ",
                input.name
            )));
        }
    }
    Ok(())
}

fn validate_frame(index: usize, frame: &FramePoses) -> ArthroResult<()> {
    if !frame.time.is_finite() {
        return Err(ArthroError::InvalidConfig(format!(
            "frame {index}: time must be finite"
        )));
    }
    for (side, pose) in [(MeshSide::Casting, &frame.casting), (MeshSide::Target, &frame.target)] {
        let finite = pose.translation.is_finite() && pose.rotation.is_finite();
        if !finite || pose.rotation.length_squared() < 1e-12 {
            return Err(ArthroError::InvalidConfig(format!(
                "frame {index}: {side} pose is not a finite rigid transform"
            )));
        }
    }
    Ok(())
}
