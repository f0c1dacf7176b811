// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pairwise clearance detection between placed skids.
//!
//! Each box is inflated by half the clearance on every axis, so two skids are
//! in violation when their gap on every axis is smaller than the clearance.
//! Severity separates true interpenetration (*critical*) from a gap that is
//! merely too small (*warning*).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skid_geom::Aabb;
use tracing::warn;

use crate::broad::{AllPairs, BroadPhase, PairKey, SpatialHash};
use crate::instance::{Instance, InstanceId};

/// Scenes larger than this are paired through a [`SpatialHash`].
pub const ALL_PAIRS_THRESHOLD: usize = 32;

/// Classification of a violating pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Only the clearance envelopes intersect.
    Warning,
    /// The footprints themselves intersect.
    Critical,
}

/// Outcome of checking one pair of skids.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    /// Canonical pair identity.
    pub pair: PairKey,
    /// `true` if the clearance envelopes intersect.
    pub has_collision: bool,
    /// Center-to-center distance of the world boxes.
    pub distance: f32,
    /// Sum of each skid's larger horizontal half-extent, plus clearance.
    pub min_distance: f32,
    /// `min_distance - distance`; positive when closer than allowed.
    pub overlap: f32,
    /// Set only when `has_collision` is `true`.
    pub severity: Option<Severity>,
}

impl CollisionResult {
    /// Returns `true` for interpenetrating footprints.
    pub fn is_critical(&self) -> bool {
        self.severity == Some(Severity::Critical)
    }
}

/// Narrow-phase check on already-derived world boxes.
///
/// Arguments are canonicalized by id first, so swapping `(a, b)` yields the
/// exact same result.
pub fn check_boxes(
    a_id: InstanceId,
    a: &Aabb,
    b_id: InstanceId,
    b: &Aabb,
    clearance: f32,
) -> CollisionResult {
    let ((lo_id, lo), (hi_id, hi)) = if a_id <= b_id {
        ((a_id, a), (b_id, b))
    } else {
        ((b_id, b), (a_id, a))
    };
    let clearance = sanitize_clearance(clearance);
    let distance = lo.center().distance(&hi.center());
    let min_distance = horizontal_reach(lo) + horizontal_reach(hi) + clearance;
    let margin = clearance * 0.5;
    let has_collision = lo.inflate(margin).intersects(&hi.inflate(margin));
    let severity = has_collision.then(|| {
        if lo.intersects(hi) {
            Severity::Critical
        } else {
            Severity::Warning
        }
    });
    CollisionResult {
        pair: PairKey::new(lo_id, hi_id),
        has_collision,
        distance,
        min_distance,
        overlap: min_distance - distance,
        severity,
    }
}

/// Checks skids `a` and `b` with the given clearance.
///
/// Degenerate footprints never collide; the result reports the distance
/// between positions and a zero minimum distance.
pub fn check_pair(a: &Instance, b: &Instance, clearance: f32) -> CollisionResult {
    match (a.world_aabb(), b.world_aabb()) {
        (Some(a_bb), Some(b_bb)) => check_boxes(a.id(), &a_bb, b.id(), &b_bb, clearance),
        _ => {
            for inst in [a, b].into_iter().filter(|i| i.world_aabb().is_none()) {
                warn!(
                    instance = %inst.id(),
                    footprint = ?inst.footprint(),
                    "degenerate geometry treated as non-colliding"
                );
            }
            let mut distance = a.position().distance(&b.position());
            if !distance.is_finite() {
                distance = f32::INFINITY;
            }
            CollisionResult {
                pair: PairKey::new(a.id(), b.id()),
                has_collision: false,
                distance,
                min_distance: 0.0,
                overlap: -distance,
                severity: None,
            }
        }
    }
}

/// All violating pairs among `instances`, sorted by pair.
///
/// Uses [`AllPairs`] up to [`ALL_PAIRS_THRESHOLD`] instances and a
/// [`SpatialHash`] beyond; both report identical results.
pub fn check_all<'a, I>(instances: I, clearance: f32) -> Vec<CollisionResult>
where
    I: IntoIterator<Item = &'a Instance>,
{
    let boxes = indexable_boxes(instances);
    if boxes.len() <= ALL_PAIRS_THRESHOLD {
        check_indexed(&boxes, clearance, &mut AllPairs::new())
    } else {
        let margin = sanitize_clearance(clearance) * 0.5;
        let cell = boxes
            .values()
            .map(|bb| {
                let he = bb.inflate(margin).half_extents();
                2.0 * he.x().max(he.z())
            })
            .fold(0.0_f32, f32::max);
        check_indexed(&boxes, clearance, &mut SpatialHash::new(cell))
    }
}

/// [`check_all`] routed through a caller-supplied broad phase.
///
/// The broad phase must be empty; results do not depend on which
/// implementation is used.
pub fn check_all_with<'a, I, B>(instances: I, clearance: f32, broad: &mut B) -> Vec<CollisionResult>
where
    I: IntoIterator<Item = &'a Instance>,
    B: BroadPhase,
{
    let boxes = indexable_boxes(instances);
    check_indexed(&boxes, clearance, broad)
}

fn check_indexed<B: BroadPhase>(
    boxes: &BTreeMap<InstanceId, Aabb>,
    clearance: f32,
    broad: &mut B,
) -> Vec<CollisionResult> {
    let margin = sanitize_clearance(clearance) * 0.5;
    for (id, bb) in boxes {
        broad.upsert(*id, bb.inflate(margin));
    }
    broad
        .pairs()
        .into_iter()
        .filter_map(|key| {
            let a = boxes.get(&key.a)?;
            let b = boxes.get(&key.b)?;
            let result = check_boxes(key.a, a, key.b, b, clearance);
            result.has_collision.then_some(result)
        })
        .collect()
}

/// World boxes keyed by id; degenerate skids are left out with a warning.
fn indexable_boxes<'a, I>(instances: I) -> BTreeMap<InstanceId, Aabb>
where
    I: IntoIterator<Item = &'a Instance>,
{
    let mut out = BTreeMap::new();
    for inst in instances {
        match inst.world_aabb() {
            Some(bb) => {
                out.insert(inst.id(), bb);
            }
            None => {
                warn!(
                    instance = %inst.id(),
                    footprint = ?inst.footprint(),
                    "degenerate geometry excluded from spatial index"
                );
            }
        }
    }
    out
}

/// Larger of the two horizontal half-extents.
///
/// Approximates separation for non-square or rotated footprints; kept as the
/// reported `min_distance` while the collision flag comes from the boxes.
fn horizontal_reach(bb: &Aabb) -> f32 {
    let he = bb.half_extents();
    he.x().max(he.z())
}

/// Negative or non-finite clearance is treated as zero.
pub(crate) fn sanitize_clearance(clearance: f32) -> f32 {
    if clearance.is_finite() && clearance > 0.0 {
        clearance
    } else {
        0.0
    }
}
