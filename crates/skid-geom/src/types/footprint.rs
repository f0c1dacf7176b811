// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;
use crate::types::aabb::Aabb;
use crate::types::transform::Transform;

/// Local-space box occupied by a skid, centered on its local origin.
///
/// `length` runs along X, `height` along Y, `width` along Z.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    /// Extent along X, in metres.
    pub length: f32,
    /// Extent along Z, in metres.
    pub width: f32,
    /// Extent along Y, in metres.
    pub height: f32,
}

impl Footprint {
    /// Creates a footprint from its three extents.
    #[must_use]
    pub const fn new(length: f32, width: f32, height: f32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Cube footprint with edge `size`.
    #[must_use]
    pub const fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    /// Returns `true` if any extent is zero, negative, or not finite.
    ///
    /// Degenerate footprints never collide and are kept out of spatial
    /// indexes.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .any(|e| !e.is_finite() || *e <= 0.0)
    }

    /// Half-extents as `(length/2, height/2, width/2)` in axis order.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.length * 0.5, self.height * 0.5, self.width * 0.5)
    }

    /// Local-space box, or `None` if degenerate.
    #[must_use]
    pub fn local_aabb(&self) -> Option<Aabb> {
        if self.is_degenerate() {
            return None;
        }
        let he = self.half_extents();
        Some(Aabb::from_center_half_extents(Vec3::ZERO, he.x(), he.y(), he.z()))
    }
}

/// Derives the world AABB of a footprint under `transform`.
///
/// Always computed from the transform passed in; callers must call this again
/// after every transform change. Returns `None` for degenerate footprints or
/// non-finite translations.
///
/// # Examples
/// ```
/// use skid_geom::{world_aabb, Footprint, Transform, Vec3};
/// let t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
/// let b = world_aabb(&t, &Footprint::cube(2.0)).unwrap();
/// assert_eq!(b.min().to_array(), [0.0, -1.0, -1.0]);
/// assert_eq!(b.max().to_array(), [2.0, 1.0, 1.0]);
/// ```
#[must_use]
pub fn world_aabb(transform: &Transform, footprint: &Footprint) -> Option<Aabb> {
    if !transform.is_finite() {
        return None;
    }
    let local = footprint.local_aabb()?;
    Some(local.transformed(&transform.to_mat4()))
}
