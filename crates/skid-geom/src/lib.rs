// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for the skid layout engine.

This crate provides:
- Deterministic `f32` math (`Vec3`, `Quat`, `Mat4`).
- Axis-aligned bounding boxes (`Aabb`).
- Rigid transforms (`Transform`).
- Equipment footprints (`Footprint`) and world-box derivation (`world_aabb`).

Design notes:
- Deterministic: no ambient RNG, no fused multiply-add.
- World boxes are derived on demand from a transform and a footprint; nothing
  in this crate caches a box across a transform change.
- Axis convention: X is length, Y is height (up), Z is width.
"]

/// Deterministic float32 math.
pub mod math;
/// Foundational geometric types.
pub mod types;

pub use math::{Mat4, Quat, Vec3};
pub use types::aabb::Aabb;
pub use types::footprint::{world_aabb, Footprint};
pub use types::transform::Transform;
