// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic radial search for the nearest valid position.
//!
//! The desired position is tried first, then concentric rings on the floor
//! plane at `step`, `2·step`, … up to `max_radius`. Each ring is sampled at
//! `angles` evenly spaced angles, in strictly increasing angle order starting
//! at +X. Identical inputs always visit candidates in the same order.
//!
//! At most [`MAX_SAMPLES`] ring positions are visited; larger configurations
//! are truncated to the innermost rings that fit.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};
use skid_geom::{Aabb, Vec3};
use tracing::warn;

use crate::boundary::Boundary;
use crate::collision::sanitize_clearance;
use crate::instance::Instance;

/// Upper bound on ring positions visited by one search.
pub const MAX_SAMPLES: u32 = 65_536;

/// Parameters of the ring search.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialSearch {
    /// Distance between consecutive rings.
    pub step: f32,
    /// Largest ring radius searched (inclusive).
    pub max_radius: f32,
    /// Samples per ring.
    pub angles: u32,
}

impl Default for RadialSearch {
    fn default() -> Self {
        Self {
            step: 0.5,
            max_radius: 10.0,
            angles: 16,
        }
    }
}

impl RadialSearch {
    /// Samples taken on each ring, at most [`MAX_SAMPLES`].
    pub fn angle_count(&self) -> u32 {
        self.angles.clamp(1, MAX_SAMPLES)
    }

    /// Number of rings visited after the center.
    ///
    /// Zero when the parameters are malformed, which limits the search to the
    /// desired position itself. Never more than fit in [`MAX_SAMPLES`].
    pub fn ring_count(&self) -> u32 {
        self.requested_rings().min(MAX_SAMPLES / self.angle_count())
    }

    /// Whether the configuration asks for more than [`MAX_SAMPLES`] positions.
    pub fn is_truncated(&self) -> bool {
        u64::from(self.requested_rings()) * u64::from(self.angles) > u64::from(MAX_SAMPLES)
    }

    fn requested_rings(&self) -> u32 {
        if !(self.step.is_finite() && self.step > 0.0 && self.max_radius.is_finite())
            || self.max_radius < self.step
            || self.angles == 0
        {
            return 0;
        }
        // Tolerate rounding so that max_radius = k·step includes ring k.
        let rings = (self.max_radius / self.step + 1e-4).floor();
        rings.min(u32::MAX as f32) as u32
    }

    /// Candidate positions in visiting order: `center` first, then every ring.
    pub fn candidates(&self, center: Vec3) -> impl Iterator<Item = Vec3> + '_ {
        if self.is_truncated() {
            warn!(
                step = self.step,
                max_radius = self.max_radius,
                angles = self.angles,
                max_samples = MAX_SAMPLES,
                "radial search truncated"
            );
        }
        let rings = self.ring_count();
        let angles = self.angle_count();
        let ring_points = (1..=rings).flat_map(move |ring| {
            let radius = ring as f32 * self.step;
            (0..angles).map(move |k| {
                let theta = k as f32 * TAU / angles as f32;
                let (sin, cos) = theta.sin_cos();
                Vec3::new(
                    center.x() + radius * cos,
                    center.y(),
                    center.z() + radius * sin,
                )
            })
        });
        std::iter::once(center).chain(ring_points)
    }
}

/// First collision-free, contained position for `instance`, searching
/// outward from `desired`.
///
/// `others` may include `instance` itself; it is skipped by id. Returns `None`
/// when every candidate within `search.max_radius` is invalid; callers must
/// then keep the skid at its last committed valid position. A degenerate
/// footprint never collides, so `desired` is returned unchanged.
pub fn find_nearest_valid_position<'a, I>(
    instance: &Instance,
    desired: Vec3,
    others: I,
    boundary: &Boundary,
    clearance: f32,
    search: &RadialSearch,
) -> Option<Vec3>
where
    I: IntoIterator<Item = &'a Instance>,
{
    if !desired.is_finite() {
        return None;
    }
    if instance.is_degenerate() {
        return Some(desired);
    }
    let margin = sanitize_clearance(clearance) * 0.5;
    let obstacles: Vec<Aabb> = others
        .into_iter()
        .filter(|o| o.id() != instance.id())
        .filter_map(|o| o.world_aabb().map(|bb| bb.inflate(margin)))
        .collect();
    let check_containment = !boundary.is_degenerate();

    search.candidates(desired).find(|candidate| {
        let Some(bb) = instance.aabb_at(*candidate) else {
            return false;
        };
        if check_containment && !boundary.violations_of(&bb).is_empty() {
            return false;
        }
        let envelope = bb.inflate(margin);
        !obstacles.iter().any(|o| o.intersects(&envelope))
    })
}
