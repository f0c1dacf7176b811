// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the layout engine (transform, AABB, footprint).
//!
//! Determinism notes:
//! - `Aabb::intersects` is strict: boxes that only touch on a face do not
//!   intersect. Collision and containment checks rely on this so a skid
//!   placed exactly at its clearance distance is not a violation.
//! - `Aabb::overlaps` is inclusive and meant for broad-phase pairing only.
//! - Affine math uses `f32` without fused multiply-add.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Equipment footprints and world-box derivation."]
pub mod footprint;
#[doc = "Rigid transforms (translation + rotation)."]
pub mod transform;
