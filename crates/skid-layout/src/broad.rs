// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Broad-phase interfaces: candidate pairs for the narrow clearance check.
//!
//! Determinism contract (applies to all implementations here):
//! - Pair identity is canonicalized as [`PairKey`] (lower id first).
//! - The emitted pair list is strictly sorted by that key.
//! - Overlap is inclusive on faces, so a broad phase never drops a pair that
//!   the strict narrow phase would report.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use skid_geom::Aabb;

use crate::instance::InstanceId;

/// Canonical, order-independent identity of an instance pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    /// Lower id.
    pub a: InstanceId,
    /// Higher id.
    pub b: InstanceId,
}

impl PairKey {
    /// Canonicalizes `(x, y)` so that `a <= b`.
    pub fn new(x: InstanceId, y: InstanceId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Returns `true` if `id` is one side of the pair.
    pub fn contains(&self, id: InstanceId) -> bool {
        self.a == id || self.b == id
    }

    /// The side that is not `id`, if `id` is in the pair.
    pub fn other(&self, id: InstanceId) -> Option<InstanceId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Broad-phase interface for inserting proxies and querying overlapping pairs.
pub trait BroadPhase {
    /// Inserts or updates the proxy with the given `id` and `aabb`.
    fn upsert(&mut self, id: InstanceId, aabb: Aabb);
    /// Removes a proxy if present.
    fn remove(&mut self, id: InstanceId);
    /// Returns a canonical, deterministically-ordered list of overlapping pairs.
    fn pairs(&self) -> Vec<PairKey>;
}

/// `O(n^2)` all-pairs sweep.
///
/// Correctness baseline, and the faster choice for the few dozen skids a
/// typical enclosure holds.
#[derive(Debug, Default)]
pub struct AllPairs {
    items: BTreeMap<InstanceId, Aabb>,
}

impl AllPairs {
    /// Creates an empty broad phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for AllPairs {
    fn upsert(&mut self, id: InstanceId, aabb: Aabb) {
        self.items.insert(id, aabb);
    }

    fn remove(&mut self, id: InstanceId) {
        self.items.remove(&id);
    }

    fn pairs(&self) -> Vec<PairKey> {
        // BTreeMap iteration is sorted by id, so (a, b) comes out canonical and ordered.
        let items: Vec<(InstanceId, Aabb)> = self.items.iter().map(|(id, bb)| (*id, *bb)).collect();
        let mut out = Vec::new();
        for (i, (a_id, a_bb)) in items.iter().enumerate() {
            for (b_id, b_bb) in items.iter().skip(i + 1) {
                if a_bb.overlaps(b_bb) {
                    out.push(PairKey::new(*a_id, *b_id));
                }
            }
        }
        out
    }
}

type Cell = (i32, i32);

/// Uniform spatial hash over the horizontal (X/Z) plane.
///
/// Each proxy is bucketed into every cell its box touches; only proxies that
/// share a cell are tested against each other. With a cell size close to the
/// typical skid size, pairing is near-linear in the number of skids.
#[derive(Debug)]
pub struct SpatialHash {
    cell_size: f32,
    cells: FxHashMap<Cell, Vec<InstanceId>>,
    items: BTreeMap<InstanceId, (Aabb, Vec<Cell>)>,
}

impl SpatialHash {
    /// Creates a hash with the given cell edge length.
    ///
    /// Non-positive or non-finite sizes fall back to `1.0`.
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            cells: FxHashMap::default(),
            items: BTreeMap::new(),
        }
    }

    /// Cell edge length.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn cell_coord(&self, value: f32) -> i32 {
        let t = (value / self.cell_size).floor();
        // Saturating float-to-int cast keeps far-away coordinates in range.
        t as i32
    }

    fn cells_for(&self, aabb: &Aabb) -> Vec<Cell> {
        let (min, max) = (aabb.min(), aabb.max());
        let (x0, x1) = (self.cell_coord(min.x()), self.cell_coord(max.x()));
        let (z0, z1) = (self.cell_coord(min.z()), self.cell_coord(max.z()));
        let mut out = Vec::new();
        for ix in x0..=x1 {
            for iz in z0..=z1 {
                out.push((ix, iz));
            }
        }
        out
    }

    fn unlink(&mut self, id: InstanceId, cells: &[Cell]) {
        for cell in cells {
            if let Some(bucket) = self.cells.get_mut(cell) {
                bucket.retain(|other| *other != id);
                if bucket.is_empty() {
                    self.cells.remove(cell);
                }
            }
        }
    }
}

impl BroadPhase for SpatialHash {
    fn upsert(&mut self, id: InstanceId, aabb: Aabb) {
        if let Some((_, old_cells)) = self.items.remove(&id) {
            self.unlink(id, &old_cells);
        }
        let cells = self.cells_for(&aabb);
        for cell in &cells {
            self.cells.entry(*cell).or_default().push(id);
        }
        self.items.insert(id, (aabb, cells));
    }

    fn remove(&mut self, id: InstanceId) {
        if let Some((_, cells)) = self.items.remove(&id) {
            self.unlink(id, &cells);
        }
    }

    fn pairs(&self) -> Vec<PairKey> {
        let mut out = BTreeSet::new();
        for bucket in self.cells.values() {
            for (i, a) in bucket.iter().enumerate() {
                for b in &bucket[i + 1..] {
                    let key = PairKey::new(*a, *b);
                    if out.contains(&key) {
                        continue;
                    }
                    let (Some((a_bb, _)), Some((b_bb, _))) = (self.items.get(a), self.items.get(b))
                    else {
                        continue;
                    };
                    if a_bb.overlaps(b_bb) {
                        out.insert(key);
                    }
                }
            }
        }
        // BTreeSet iteration restores canonical order regardless of hash order.
        out.into_iter().collect()
    }
}
