// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::{Mat4, Vec3};

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` and represent metres in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB spanning two corners.
    ///
    /// Corners are reordered component-wise, so any two opposite corners
    /// produce the same box.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Half-extents along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.max.sub(&self.min).scale(0.5)
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx, hy, hz);
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Returns `true` if the interiors of the two boxes intersect.
    ///
    /// Touching faces, edges, or corners are not an intersection.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        (0..3).all(|i| a_max[i] > b_min[i] && b_max[i] > a_min[i])
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    ///
    /// Inclusive so broad-phase pairing never drops a pair the strict narrow
    /// phase would have reported.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        (0..3).all(|i| a_max[i] >= b_min[i] && b_max[i] >= a_min[i])
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    ///
    /// Negative margins shrink the box but never invert it.
    #[must_use]
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::new(m, m, m);
        let min = self.min.sub(&delta);
        let max = self.max.add(&delta);
        let center = self.center();
        Self {
            min: min.min(&center),
            max: max.max(&center),
        }
    }

    /// Computes the AABB that bounds this box after transformation by `mat`.
    ///
    /// Evaluates the eight corners under the affine transform.
    #[must_use]
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let world = corners.map(|c| mat.transform_point(&c));
        Self::from_points(&world).unwrap_or(*self)
    }

    /// Builds the minimal AABB that contains all `points`, or `None` if empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: acc.min.min(p),
                max: acc.max.max(p),
            },
        ))
    }
}
