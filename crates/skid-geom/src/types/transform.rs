// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{deg_to_rad, Mat4, Quat, Vec3};

/// Rigid transform placing a skid in the enclosure.
///
/// Conventions:
/// - `translation` is the world position of the footprint center, in metres.
/// - `rotation` is a unit quaternion (normalised internally when converting).
///
/// Determinism:
/// - `to_mat4` rotates then translates using plain `f32` ops (no FMA).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    translation: Vec3,
    #[cfg_attr(feature = "serde", serde(default))]
    rotation: Quat,
}

impl Transform {
    /// Identity transform (origin, no rotation).
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::identity(),
        }
    }

    /// Creates a transform from components.
    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pure translation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    /// Translation plus a yaw (rotation about +Y) given in degrees.
    #[must_use]
    pub fn from_yaw_degrees(translation: Vec3, yaw_deg: f32) -> Self {
        Self::new(translation, Quat::from_yaw(deg_to_rad(yaw_deg)))
    }

    /// Translation component.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Rotation component.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Returns a copy moved to `translation`, keeping the rotation.
    #[must_use]
    pub fn with_translation(&self, translation: Vec3) -> Self {
        Self::new(translation, self.rotation)
    }

    /// Returns `true` when the translation is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite()
    }

    /// Rigid matrix applying the rotation, then the translation.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(&self.rotation, self.translation)
    }

    /// Maps a local-space point to world space.
    #[must_use]
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.to_mat4().transform_point(local)
    }

    /// Rotates a local-space direction into world space.
    #[must_use]
    pub fn transform_direction(&self, local: &Vec3) -> Vec3 {
        self.rotation.rotate(local)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
