//! Frame-by-frame evaluation of a [`ContactInput`].

use arthro_contact::{ContactForce, Stage};
use arthro_math::Pose;
use arthro_types::{ArthroError, ArthroResult, MeshSide};

use crate::contract::{ContactInput, ContactOutput, FrameReport};
use crate::validator::validate_input;

/// Validates `input`, then evaluates every frame in order on one engine,
/// so each frame's detection is seeded by the previous frame's pairing.
pub fn evaluate(input: &ContactInput) -> ArthroResult<ContactOutput> {
    validate_input(input)?;
    let mut engine = input.build_engine()?;
    let mut output = ContactOutput {
        labels: engine.record_labels(),
        frames: Vec::new(),
    };

    for frame in input.frames() {
        // Re-normalize rotations read from files.
        let casting = Pose::new(frame.casting.rotation, frame.casting.translation);
        let target = Pose::new(frame.target.rotation, frame.target.translation);
        engine.set_poses(casting, target);
        engine.realize(Stage::ReportReady);
        let values = engine.record_values();
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ArthroError::InvariantViolation(format!(
                "frame at t={}: output '{}' is not finite",
                frame.time, output.labels[i]
            )));
        }
        output.frames.push(FrameReport {
            time: frame.time,
            casting: *engine.stats(MeshSide::Casting),
            target: *engine.stats(MeshSide::Target),
            loads: engine.body_forces(),
            potential_energy: engine.potential_energy(),
            values,
        });
    }
    Ok(output)
}
