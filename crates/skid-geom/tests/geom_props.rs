// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Property tests for skid-geom boxes and world-box derivation.

use proptest::prelude::*;
use skid_geom::{world_aabb, Aabb, Footprint, Transform, Vec3};

fn coord() -> impl Strategy<Value = f32> {
    -50.0f32..50.0
}

fn extent() -> impl Strategy<Value = f32> {
    0.1f32..10.0
}

proptest! {
    #[test]
    fn intersects_is_symmetric(
        ax in coord(), az in coord(), bx in coord(), bz in coord(),
        ha in extent(), hb in extent(),
    ) {
        let a = Aabb::from_center_half_extents(Vec3::new(ax, 0.0, az), ha, ha, ha);
        let b = Aabb::from_center_half_extents(Vec3::new(bx, 0.0, bz), hb, hb, hb);
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        // Strict intersection implies inclusive overlap.
        prop_assert!(!a.intersects(&b) || a.overlaps(&b));
    }

    #[test]
    fn world_box_follows_translation(
        x in coord(), y in coord(), z in coord(),
        l in extent(), w in extent(), h in extent(),
    ) {
        let fp = Footprint::new(l, w, h);
        let t = Transform::from_translation(Vec3::new(x, y, z));
        let Some(b) = world_aabb(&t, &fp) else {
            return Err(TestCaseError::fail("non-degenerate footprint must have a box"));
        };
        let c = b.center();
        prop_assert!((c.x() - x).abs() < 1e-3);
        prop_assert!((c.y() - y).abs() < 1e-3);
        prop_assert!((c.z() - z).abs() < 1e-3);
        let he = b.half_extents();
        prop_assert!((he.x() - l * 0.5).abs() < 1e-3);
        prop_assert!((he.y() - h * 0.5).abs() < 1e-3);
        prop_assert!((he.z() - w * 0.5).abs() < 1e-3);
    }

    #[test]
    fn from_points_contains_every_point(
        pts in prop::collection::vec((coord(), coord(), coord()), 1..16)
    ) {
        let points: Vec<Vec3> = pts.iter().map(|&(x, y, z)| Vec3::new(x, y, z)).collect();
        let Some(b) = Aabb::from_points(&points) else {
            return Err(TestCaseError::fail("non-empty input must produce a box"));
        };
        for p in &points {
            prop_assert!(b.min().x() <= p.x() && p.x() <= b.max().x());
            prop_assert!(b.min().y() <= p.y() && p.y() <= b.max().y());
            prop_assert!(b.min().z() <= p.z() && p.z() <= b.max().z());
        }
    }
}

#[test]
fn rotated_box_contains_rotated_corners() {
    let fp = Footprint::new(4.0, 2.0, 1.0);
    let t = Transform::from_yaw_degrees(Vec3::new(3.0, 0.5, -2.0), 30.0);
    let Some(b) = world_aabb(&t, &fp) else {
        unreachable!("non-degenerate footprint");
    };
    let he = fp.half_extents();
    for sx in [-1.0, 1.0] {
        for sz in [-1.0, 1.0] {
            let corner = t.transform_point(&Vec3::new(sx * he.x(), he.y(), sz * he.z()));
            assert!(
                b.inflate(1e-4).overlaps(&Aabb::new(corner, corner)),
                "corner {corner:?} outside {b:?}"
            );
        }
    }
}
