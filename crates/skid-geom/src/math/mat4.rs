// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{Quat, Vec3};

/// Rigid affine transform stored as the top three rows of a 4×4 matrix.
///
/// The implicit bottom row is `(0, 0, 0, 1)`; skids are never scaled or
/// projected, so only rotation and translation are representable.
///
/// # Examples
/// ```
/// use skid_geom::{Mat4, Quat, Vec3};
/// let m = Mat4::from_rotation_translation(&Quat::identity(), Vec3::new(5.0, -3.0, 2.0));
/// let p = Vec3::new(2.0, 4.0, -1.0);
/// assert_eq!(m.transform_point(&p).to_array(), [7.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    rows: [[f32; 4]; 3],
}

impl Mat4 {
    /// Returns the identity transform.
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Rotation by `rotation` (normalised first) followed by `translation`.
    pub fn from_rotation_translation(rotation: &Quat, translation: Vec3) -> Self {
        let [x, y, z, w] = rotation.normalize().to_array();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Self {
            rows: [
                [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy), translation.x()],
                [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx), translation.y()],
                [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy), translation.z()],
            ],
        }
    }

    /// Pure rotation.
    pub fn from_rotation(rotation: &Quat) -> Self {
        Self::from_rotation_translation(rotation, Vec3::ZERO)
    }

    /// Translation column.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }

    /// Transforms a point (`w = 1`).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let [x, y, z] = point.to_array();
        let row = |r: &[f32; 4]| r[0] * x + r[1] * y + r[2] * z + r[3];
        Vec3::new(row(&self.rows[0]), row(&self.rows[1]), row(&self.rows[2]))
    }

    /// Transforms a direction (`w = 0`, translation ignored).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        let [x, y, z] = direction.to_array();
        let row = |r: &[f32; 4]| r[0] * x + r[1] * y + r[2] * z;
        Vec3::new(row(&self.rows[0]), row(&self.rows[1]), row(&self.rows[2]))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}
