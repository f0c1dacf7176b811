// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Enclosure extents and containment checks.
//!
//! The valid region is centered on the origin horizontally and rests on the
//! floor: `X ∈ [-length/2, length/2]`, `Z ∈ [-width/2, width/2]`,
//! `Y ∈ [0, height]`. Limits are inclusive, so a skid flush against a wall is
//! contained.

use serde::{Deserialize, Serialize};
use skid_geom::{Aabb, Vec3};
use tracing::warn;

use crate::instance::Instance;

/// World axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Length axis.
    X,
    /// Height axis.
    Y,
    /// Width axis.
    Z,
}

impl Axis {
    /// All axes in evaluation order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component of `v` along this axis.
    pub fn of(self, v: &Vec3) -> f32 {
        match self {
            Self::X => v.x(),
            Self::Y => v.y(),
            Self::Z => v.z(),
        }
    }
}

/// Which limit of an axis was crossed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Below the lower limit.
    Min,
    /// Above the upper limit.
    Max,
}

/// One crossed enclosure limit.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryViolation {
    /// Offending axis.
    pub axis: Axis,
    /// Offending side.
    pub side: Side,
    /// The box coordinate that crossed the limit.
    pub value: f32,
    /// The limit that was crossed.
    pub limit: f32,
}

impl BoundaryViolation {
    /// Distance by which the limit is exceeded.
    pub fn excess(&self) -> f32 {
        (self.value - self.limit).abs()
    }
}

/// Enclosure extents in metres.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Extent along X.
    pub length: f32,
    /// Extent along Z.
    pub width: f32,
    /// Extent along Y.
    pub height: f32,
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(12.0, 6.0, 3.0)
    }
}

impl Boundary {
    /// Creates an enclosure.
    pub const fn new(length: f32, width: f32, height: f32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Returns `true` if any extent is non-positive or not finite.
    pub fn is_degenerate(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .any(|e| !e.is_finite() || *e <= 0.0)
    }

    /// Inclusive `(min, max)` limits along `axis`.
    pub fn limits(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::X => (-self.length * 0.5, self.length * 0.5),
            Axis::Y => (0.0, self.height),
            Axis::Z => (-self.width * 0.5, self.width * 0.5),
        }
    }

    /// The valid region as a box.
    pub fn region(&self) -> Aabb {
        let (x0, x1) = self.limits(Axis::X);
        let (y0, y1) = self.limits(Axis::Y);
        let (z0, z1) = self.limits(Axis::Z);
        Aabb::new(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1))
    }

    /// Violations of a world box, ordered X, Y, Z then min, max.
    pub fn violations_of(&self, aabb: &Aabb) -> Vec<BoundaryViolation> {
        let mut out = Vec::new();
        for axis in Axis::ALL {
            let (lo, hi) = self.limits(axis);
            let min = axis.of(&aabb.min());
            let max = axis.of(&aabb.max());
            if min < lo {
                out.push(BoundaryViolation {
                    axis,
                    side: Side::Min,
                    value: min,
                    limit: lo,
                });
            }
            if max > hi {
                out.push(BoundaryViolation {
                    axis,
                    side: Side::Max,
                    value: max,
                    limit: hi,
                });
            }
        }
        out
    }
}

/// Per-axis, per-side containment violations of `instance`.
///
/// An empty result means the instance is fully contained. Degenerate
/// footprints and degenerate enclosures report nothing.
pub fn check_boundary(instance: &Instance, boundary: &Boundary) -> Vec<BoundaryViolation> {
    if boundary.is_degenerate() {
        warn!(?boundary, "degenerate enclosure; skipping containment check");
        return Vec::new();
    }
    let Some(aabb) = instance.world_aabb() else {
        warn!(instance = %instance.id(), "degenerate footprint; skipping containment check");
        return Vec::new();
    };
    boundary.violations_of(&aabb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceId;
    use skid_geom::{Footprint, Transform};

    fn cube_at(x: f32, y: f32, z: f32) -> Instance {
        Instance::new(
            InstanceId(1),
            Transform::from_translation(Vec3::new(x, y, z)),
            Footprint::cube(2.0),
        )
    }

    #[test]
    fn flush_against_walls_is_contained() {
        let b = Boundary::new(10.0, 6.0, 4.0);
        assert!(check_boundary(&cube_at(4.0, 1.0, -2.0), &b).is_empty());
    }

    #[test]
    fn reports_each_crossed_side() {
        let b = Boundary::new(10.0, 6.0, 4.0);
        let v = check_boundary(&cube_at(4.5, 0.0, 0.0), &b);
        assert_eq!(v.len(), 2);
        assert_eq!((v[0].axis, v[0].side), (Axis::X, Side::Max));
        assert!((v[0].value - 5.5).abs() < 1e-6);
        assert!((v[0].limit - 5.0).abs() < 1e-6);
        assert_eq!((v[1].axis, v[1].side), (Axis::Y, Side::Min));
        assert!((v[1].excess() - 1.0).abs() < 1e-6);
    }
}
