//! Rigid body pose.
//!
//! Meshes are authored in their body frame and placed in the world by
//! a rotation followed by a translation. The pose never scales, so
//! lengths, areas and depths are frame-independent.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// World placement of a rigid body: `p_world = rotation * p_local + translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Body-to-world rotation (unit quaternion).
    pub rotation: DQuat,
    /// Position of the body origin in the world.
    pub translation: DVec3,
}

impl Pose {
    /// The identity pose (body frame coincides with the world frame).
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Creates a pose from a rotation and a translation.
    pub fn new(rotation: DQuat, translation: DVec3) -> Self {
        Self {
            rotation: rotation.normalize(),
            translation,
        }
    }

    /// Creates a pure translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            rotation: DQuat::IDENTITY,
            translation,
        }
    }

    /// Maps a body-frame point into the world.
    #[inline]
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        self.rotation * p + self.translation
    }

    /// Maps a body-frame direction into the world.
    #[inline]
    pub fn transform_vector(&self, v: DVec3) -> DVec3 {
        self.rotation * v
    }

    /// Maps a world point into the body frame.
    #[inline]
    pub fn inverse_transform_point(&self, p: DVec3) -> DVec3 {
        self.rotation.inverse() * (p - self.translation)
    }

    /// Maps a world direction into the body frame.
    #[inline]
    pub fn inverse_transform_vector(&self, v: DVec3) -> DVec3 {
        self.rotation.inverse() * v
    }

    /// Returns the inverse pose (world-to-body).
    pub fn inverse(&self) -> Self {
        let inv = self.rotation.inverse();
        Self {
            rotation: inv,
            translation: -(inv * self.translation),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
