// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Snap resolution: four independent candidate generators ranked by
//! priority, then by distance from the requested position.
//!
//! | strategy  | priority | proposes                                             |
//! |-----------|----------|------------------------------------------------------|
//! | connector | 5        | position making two compatible connectors coincide  |
//! | edge      | 3        | flush against a side face of another skid, plus gap |
//! | alignment | 2        | exact X or Z of another skid                         |
//! | grid      | 1        | X and Z rounded to the grid                          |
//!
//! Only the floor-plane coordinates are snapped; the requested height is kept
//! except by connector snaps, which move the skid in all three axes.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use skid_geom::Vec3;
use tracing::debug;

use crate::connector::{Anchor, Compatibility};
use crate::instance::{Instance, InstanceId};

/// Snap strategies, declared from highest to lowest priority.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapStrategy {
    /// Typed connector mating.
    Connector,
    /// Flush against an adjacent face.
    Edge,
    /// Axis alignment with another skid.
    Alignment,
    /// Grid rounding.
    Grid,
}

impl SnapStrategy {
    /// Ranking priority; higher wins.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Connector => 5,
            Self::Edge => 3,
            Self::Alignment => 2,
            Self::Grid => 1,
        }
    }
}

/// Connector pair behind a connector snap.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectorPair {
    /// Connector on the moving skid.
    pub moving: String,
    /// Connector on the other skid.
    pub target: String,
}

/// What a candidate was derived from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapSource {
    /// The other skid.
    pub instance: InstanceId,
    /// Connector pair, for connector snaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectors: Option<ConnectorPair>,
}

/// A proposed corrected position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapCandidate {
    /// Generating strategy.
    pub strategy: SnapStrategy,
    /// Proposed world position of the moving skid.
    pub position: Vec3,
    /// Distance from the requested position.
    pub distance: f32,
    /// Ranking priority (see [`SnapStrategy::priority`]).
    pub priority: u8,
    /// Source reference; `None` for grid snaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SnapSource>,
}

impl SnapCandidate {
    fn new(
        strategy: SnapStrategy,
        requested: Vec3,
        position: Vec3,
        source: Option<SnapSource>,
    ) -> Self {
        Self {
            strategy,
            position,
            distance: position.distance(&requested),
            priority: strategy.priority(),
            source,
        }
    }
}

/// Tunables for snapping.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapOptions {
    /// Grid cell size on the floor plane.
    pub grid_size: f32,
    /// Maximum distance a candidate may move the skid.
    pub snap_distance: f32,
    /// Alignment window; clamped to `snap_distance`.
    pub alignment_tolerance: f32,
    /// Gap left between faces by edge snaps.
    pub edge_gap: f32,
    /// Enables grid snapping.
    pub grid: bool,
    /// Enables connector snapping.
    pub connectors: bool,
    /// Enables edge snapping.
    pub edges: bool,
    /// Enables alignment snapping.
    pub alignment: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            snap_distance: 1.0,
            alignment_tolerance: 0.1,
            edge_gap: 0.01,
            grid: true,
            connectors: true,
            edges: true,
            alignment: true,
        }
    }
}

/// Rounds X and Z to the nearest multiple of `cell`; Y is untouched.
///
/// Idempotent. A non-positive or non-finite cell leaves `p` unchanged.
///
/// # Examples
/// ```
/// use skid_geom::Vec3;
/// use skid_layout::snap::snap_to_grid;
/// let p = snap_to_grid(Vec3::new(1.3, 0.0, 2.7), 1.0);
/// assert_eq!(p, Vec3::new(1.0, 0.0, 3.0));
/// ```
pub fn snap_to_grid(p: Vec3, cell: f32) -> Vec3 {
    if !(cell.is_finite() && cell > 0.0) {
        return p;
    }
    let round = |v: f32| (v / cell).round() * cell;
    Vec3::new(round(p.x()), p.y(), round(p.z()))
}

/// Total ranking order: priority descending, distance ascending, then
/// strategy, source, and position so that ties never depend on generation
/// order.
pub fn compare_candidates(a: &SnapCandidate, b: &SnapCandidate) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.distance.total_cmp(&b.distance))
        .then_with(|| a.strategy.cmp(&b.strategy))
        .then_with(|| a.source.cmp(&b.source))
        .then_with(|| a.position.x().total_cmp(&b.position.x()))
        .then_with(|| a.position.y().total_cmp(&b.position.y()))
        .then_with(|| a.position.z().total_cmp(&b.position.z()))
}

/// Sorts candidates best-first.
pub fn rank_candidates(candidates: &mut [SnapCandidate]) {
    candidates.sort_by(compare_candidates);
}

/// Every accepted candidate for moving `instance` to `target`, best-first.
pub fn snap_candidates<'a, I>(
    instance: &Instance,
    target: Vec3,
    others: I,
    options: &SnapOptions,
    compatibility: &Compatibility,
) -> Vec<SnapCandidate>
where
    I: IntoIterator<Item = &'a Instance>,
{
    let others: Vec<&Instance> = others
        .into_iter()
        .filter(|o| o.id() != instance.id())
        .collect();
    let anchors: FxHashMap<InstanceId, Vec<Anchor>> = if options.connectors {
        others.iter().map(|o| (o.id(), o.anchors().collect())).collect()
    } else {
        FxHashMap::default()
    };
    collect(instance, target, &others, options, compatibility, &anchors)
}

/// Best candidate for moving `instance` to `target`, or `None` for no snap
/// (the raw target is then used unchanged).
pub fn find_snap_point<'a, I>(
    instance: &Instance,
    target: Vec3,
    others: I,
    options: &SnapOptions,
    compatibility: &Compatibility,
) -> Option<SnapCandidate>
where
    I: IntoIterator<Item = &'a Instance>,
{
    snap_candidates(instance, target, others, options, compatibility)
        .into_iter()
        .next()
}

fn collect(
    instance: &Instance,
    target: Vec3,
    others: &[&Instance],
    options: &SnapOptions,
    compatibility: &Compatibility,
    anchors: &FxHashMap<InstanceId, Vec<Anchor>>,
) -> Vec<SnapCandidate> {
    let mut out = Vec::new();
    if !target.is_finite() {
        return out;
    }
    if options.grid {
        grid_candidate(target, options, &mut out);
    }
    if options.connectors {
        for other in others {
            if let Some(other_anchors) = anchors.get(&other.id()) {
                connector_candidates(
                    instance,
                    target,
                    other_anchors,
                    options,
                    compatibility,
                    &mut out,
                );
            }
        }
    }
    if options.edges {
        for other in others {
            edge_candidates(instance, target, other, options, &mut out);
        }
    }
    if options.alignment {
        for other in others {
            alignment_candidates(target, other, options, &mut out);
        }
    }
    out.retain(|c| within(c.distance, options.snap_distance) && c.position.is_finite());
    rank_candidates(&mut out);
    out
}

fn within(distance: f32, limit: f32) -> bool {
    distance.is_finite() && distance <= limit
}

fn grid_candidate(target: Vec3, options: &SnapOptions, out: &mut Vec<SnapCandidate>) {
    if !(options.grid_size.is_finite() && options.grid_size > 0.0) {
        return;
    }
    let snapped = snap_to_grid(target, options.grid_size);
    let candidate = SnapCandidate::new(SnapStrategy::Grid, target, snapped, None);
    out.push(candidate);
}

fn connector_candidates(
    moving: &Instance,
    target: Vec3,
    other_anchors: &[Anchor],
    options: &SnapOptions,
    compatibility: &Compatibility,
    out: &mut Vec<SnapCandidate>,
) {
    for mine in moving.connectors() {
        // Offset of the moving connector from the skid center in world space;
        // rotation is kept, only translation changes.
        let reach = moving.transform().transform_direction(&mine.offset);
        for theirs in other_anchors {
            if !compatibility.compatible(mine.kind, theirs.kind) {
                continue;
            }
            let position = theirs.position.sub(&reach);
            let candidate = SnapCandidate::new(
                SnapStrategy::Connector,
                target,
                position,
                Some(SnapSource {
                    instance: theirs.instance,
                    connectors: Some(ConnectorPair {
                        moving: mine.id.clone(),
                        target: theirs.connector.clone(),
                    }),
                }),
            );
            if within(candidate.distance, options.snap_distance) {
                out.push(candidate);
            }
        }
    }
}

fn edge_candidates(
    moving: &Instance,
    target: Vec3,
    other: &Instance,
    options: &SnapOptions,
    out: &mut Vec<SnapCandidate>,
) {
    let (Some(mine), Some(theirs)) = (moving.aabb_at(target), other.world_aabb()) else {
        return;
    };
    let gap = if options.edge_gap.is_finite() {
        options.edge_gap.max(0.0)
    } else {
        0.0
    };
    // The moving box may be off-center from its position under rotation.
    let he = mine.half_extents();
    let offset = mine.center().sub(&target);
    let (lo, hi) = (theirs.min(), theirs.max());
    let positions = [
        target.with_x(hi.x() + he.x() + gap - offset.x()),
        target.with_x(lo.x() - he.x() - gap - offset.x()),
        target.with_z(hi.z() + he.z() + gap - offset.z()),
        target.with_z(lo.z() - he.z() - gap - offset.z()),
    ];
    let source = SnapSource {
        instance: other.id(),
        connectors: None,
    };
    let flush = |p| SnapCandidate::new(SnapStrategy::Edge, target, p, Some(source.clone()));
    out.extend(positions.into_iter().map(flush));
}

fn alignment_candidates(
    target: Vec3,
    other: &Instance,
    options: &SnapOptions,
    out: &mut Vec<SnapCandidate>,
) {
    let tol = options.alignment_tolerance.min(options.snap_distance);
    if !(tol.is_finite() && tol >= 0.0) {
        return;
    }
    let anchor = other.position();
    if !anchor.is_finite() {
        return;
    }
    let source = SnapSource {
        instance: other.id(),
        connectors: None,
    };
    if (target.x() - anchor.x()).abs() <= tol {
        out.push(SnapCandidate::new(
            SnapStrategy::Alignment,
            target,
            target.with_x(anchor.x()),
            Some(source.clone()),
        ));
    }
    if (target.z() - anchor.z()).abs() <= tol {
        out.push(SnapCandidate::new(
            SnapStrategy::Alignment,
            target,
            target.with_z(anchor.z()),
            Some(source),
        ));
    }
}

/// Per-session snap resolver.
///
/// Caches world-space connector anchors of the other skids. The cache is
/// tagged with the session's geometry version and dropped whenever that
/// version changes or it grows past its capacity, so cached answers always
/// equal [`find_snap_point`].
#[derive(Debug)]
pub struct SnapResolver {
    options: SnapOptions,
    compatibility: Compatibility,
    cache: AnchorCache,
}

#[derive(Debug)]
struct AnchorCache {
    version: u64,
    capacity: usize,
    entries: FxHashMap<InstanceId, Vec<Anchor>>,
}

impl AnchorCache {
    fn sync(&mut self, version: u64) {
        if self.version != version {
            self.entries.clear();
            self.version = version;
        }
    }

    /// Makes every skid in `others` resident. Eviction happens at most once,
    /// before any insert, so anchors confirmed by this query are never lost.
    fn fill(&mut self, others: &[&Instance]) {
        let missing = others
            .iter()
            .filter(|o| !self.entries.contains_key(&o.id()))
            .count();
        if missing == 0 {
            return;
        }
        if self.entries.len() + missing > self.capacity {
            self.entries.clear();
        }
        for other in others {
            self.entries
                .entry(other.id())
                .or_insert_with(|| other.anchors().collect());
        }
    }
}

/// Default number of skids whose anchors are cached.
pub const DEFAULT_ANCHOR_CACHE_CAPACITY: usize = 1024;

impl SnapResolver {
    /// Creates a resolver with the default cache capacity.
    pub fn new(options: SnapOptions, compatibility: Compatibility) -> Self {
        Self::with_capacity(options, compatibility, DEFAULT_ANCHOR_CACHE_CAPACITY)
    }

    /// Creates a resolver caching anchors for at most `capacity` skids.
    pub fn with_capacity(
        options: SnapOptions,
        compatibility: Compatibility,
        capacity: usize,
    ) -> Self {
        Self {
            options,
            compatibility,
            cache: AnchorCache {
                version: 0,
                capacity: capacity.max(1),
                entries: FxHashMap::default(),
            },
        }
    }

    /// Active options.
    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Active compatibility relation.
    pub fn compatibility(&self) -> &Compatibility {
        &self.compatibility
    }

    /// Number of skids with cached anchors.
    pub fn cached(&self) -> usize {
        self.cache.entries.len()
    }

    /// Drops every cached anchor.
    pub fn invalidate(&mut self) {
        self.cache.entries.clear();
    }

    /// Best candidate for `instance` at `target`, computed against `others`
    /// as they stand at `geometry_version`.
    pub fn resolve<'a, I>(
        &mut self,
        instance: &Instance,
        target: Vec3,
        others: I,
        geometry_version: u64,
    ) -> Option<SnapCandidate>
    where
        I: IntoIterator<Item = &'a Instance>,
    {
        let others: Vec<&Instance> = others
            .into_iter()
            .filter(|o| o.id() != instance.id())
            .collect();
        self.cache.sync(geometry_version);
        if self.options.connectors {
            if others.len() > self.cache.capacity {
                // Would thrash; build a throwaway map instead.
                let anchors: FxHashMap<InstanceId, Vec<Anchor>> =
                    others.iter().map(|o| (o.id(), o.anchors().collect())).collect();
                return self.pick(instance, target, &others, &anchors);
            }
            self.cache.fill(&others);
        }
        let best = collect(
            instance,
            target,
            &others,
            &self.options,
            &self.compatibility,
            &self.cache.entries,
        )
        .into_iter()
        .next();
        log_pick(instance, target, best.as_ref());
        best
    }

    fn pick(
        &self,
        instance: &Instance,
        target: Vec3,
        others: &[&Instance],
        anchors: &FxHashMap<InstanceId, Vec<Anchor>>,
    ) -> Option<SnapCandidate> {
        let best = collect(
            instance,
            target,
            others,
            &self.options,
            &self.compatibility,
            anchors,
        )
        .into_iter()
        .next();
        log_pick(instance, target, best.as_ref());
        best
    }
}

fn log_pick(instance: &Instance, target: Vec3, best: Option<&SnapCandidate>) {
    match best {
        Some(c) => debug!(
            instance = %instance.id(),
            strategy = ?c.strategy,
            distance = c.distance,
            ?target,
            position = ?c.position,
            "snap accepted"
        ),
        None => debug!(instance = %instance.id(), ?target, "no snap"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{Connector, ConnectorKind};
    use skid_geom::{Footprint, Transform};

    fn skid(id: u64, x: f32, z: f32) -> Instance {
        Instance::new(
            InstanceId(id),
            Transform::from_translation(Vec3::new(x, 0.0, z)),
            Footprint::cube(2.0),
        )
    }

    fn only(strategy: SnapStrategy) -> SnapOptions {
        SnapOptions {
            grid: strategy == SnapStrategy::Grid,
            connectors: strategy == SnapStrategy::Connector,
            edges: strategy == SnapStrategy::Edge,
            alignment: strategy == SnapStrategy::Alignment,
            ..SnapOptions::default()
        }
    }

    #[test]
    fn grid_snap_rounds_horizontal_axes() {
        let moving = skid(1, 0.0, 0.0);
        let c = find_snap_point(
            &moving,
            Vec3::new(1.3, 0.0, 2.7),
            std::iter::empty(),
            &only(SnapStrategy::Grid),
            &Compatibility::new(),
        );
        let c = c.map(|c| (c.strategy, c.position));
        assert_eq!(c, Some((SnapStrategy::Grid, Vec3::new(1.0, 0.0, 3.0))));
    }

    #[test]
    fn grid_snap_outside_snap_distance_is_rejected() {
        let moving = skid(1, 0.0, 0.0);
        let opts = SnapOptions {
            grid_size: 10.0,
            snap_distance: 0.5,
            ..only(SnapStrategy::Grid)
        };
        let c = find_snap_point(
            &moving,
            Vec3::new(4.0, 0.0, 4.0),
            std::iter::empty(),
            &opts,
            &Compatibility::new(),
        );
        assert!(c.is_none());
    }

    #[test]
    fn edge_snap_lands_flush_plus_gap() {
        let moving = skid(1, 0.0, 0.0);
        let other = skid(2, 0.0, 0.0);
        let opts = SnapOptions {
            edge_gap: 0.25,
            ..only(SnapStrategy::Edge)
        };
        // Other spans x ∈ [-1, 1]; moving half-extent 1 → flush at x = 2.25.
        let target = Vec3::new(2.6, 0.0, 0.0);
        let c = find_snap_point(&moving, target, [&other], &opts, &Compatibility::new());
        let Some(c) = c else {
            unreachable!("edge candidate within snap distance");
        };
        assert_eq!(c.strategy, SnapStrategy::Edge);
        assert!((c.position.x() - 2.25).abs() < 1e-6, "x={}", c.position.x());
        assert_eq!(c.source.map(|s| s.instance), Some(InstanceId(2)));
    }

    #[test]
    fn alignment_snaps_single_axis() {
        let moving = skid(1, 0.0, 0.0);
        let other = skid(2, 5.0, 7.0);
        let c = find_snap_point(
            &moving,
            Vec3::new(5.05, 0.0, 2.0),
            [&other],
            &only(SnapStrategy::Alignment),
            &Compatibility::new(),
        );
        assert_eq!(c.map(|c| c.position), Some(Vec3::new(5.0, 0.0, 2.0)));
    }

    #[test]
    fn alignment_window_never_exceeds_snap_distance() {
        let moving = skid(1, 0.0, 0.0);
        let other = skid(2, 5.0, 7.0);
        let opts = SnapOptions {
            alignment_tolerance: 3.0,
            snap_distance: 0.5,
            ..only(SnapStrategy::Alignment)
        };
        let mut out = Vec::new();
        alignment_candidates(Vec3::new(6.0, 0.0, 2.0), &other, &opts, &mut out);
        assert!(out.is_empty());
        alignment_candidates(Vec3::new(5.4, 0.0, 2.0), &other, &opts, &mut out);
        assert_eq!(out.len(), 1);
        let c = find_snap_point(
            &moving,
            Vec3::new(5.4, 0.0, 2.0),
            [&other],
            &opts,
            &Compatibility::new(),
        );
        assert_eq!(c.map(|c| c.position), Some(Vec3::new(5.0, 0.0, 2.0)));
    }

    #[test]
    fn incompatible_connectors_offer_nothing() {
        let moving = skid(1, 0.0, 0.0).with_connectors(vec![Connector::new(
            "p",
            ConnectorKind::Electrical,
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::UNIT_Z,
        )]);
        let other = skid(2, 5.0, 5.0).with_connectors(vec![Connector::new(
            "h",
            ConnectorKind::Hydraulic,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -1.0),
        )]);
        let c = find_snap_point(
            &moving,
            Vec3::new(5.0, 0.0, 3.9),
            [&other],
            &only(SnapStrategy::Connector),
            &Compatibility::new(),
        );
        assert!(c.is_none());
    }

    #[test]
    fn ranking_is_independent_of_generation_order() {
        let requested = Vec3::ZERO;
        let src = |id| {
            Some(SnapSource {
                instance: InstanceId(id),
                connectors: None,
            })
        };
        let at = |x, z| Vec3::new(x, 0.0, z);
        let pool = vec![
            SnapCandidate::new(SnapStrategy::Grid, requested, at(0.1, 0.0), None),
            SnapCandidate::new(SnapStrategy::Alignment, requested, at(0.0, 0.5), src(4)),
            SnapCandidate::new(SnapStrategy::Edge, requested, at(0.9, 0.0), src(3)),
            SnapCandidate::new(SnapStrategy::Edge, requested, at(-0.9, 0.0), src(2)),
            SnapCandidate::new(SnapStrategy::Alignment, requested, at(0.5, 0.0), src(1)),
        ];
        let mut forward = pool.clone();
        let mut backward: Vec<_> = pool.into_iter().rev().collect();
        rank_candidates(&mut forward);
        rank_candidates(&mut backward);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].strategy, SnapStrategy::Edge);
        assert_eq!(forward[0].source.as_ref().map(|s| s.instance), Some(InstanceId(2)));
        assert_eq!(forward[4].strategy, SnapStrategy::Grid);
    }

    #[test]
    fn full_cache_keeps_anchors_of_the_current_query() {
        let port = |id: &str, x: f32| {
            Connector::new(
                id,
                ConnectorKind::Generic,
                Vec3::new(x, 0.0, 0.0),
                Vec3::UNIT_X,
            )
        };
        let a = skid(1, 0.0, 0.0).with_connectors(vec![port("a", 1.0)]);
        let b = skid(2, 6.0, 0.0).with_connectors(vec![port("b", -1.0)]);
        let c = skid(3, 20.0, 20.0).with_connectors(vec![port("c", 1.0)]);
        let opts = SnapOptions::default();
        let compat = Compatibility::new();
        let mut resolver = SnapResolver::with_capacity(opts, compat.clone(), 2);

        let _ = resolver.resolve(&c, Vec3::new(20.0, 0.0, 20.0), [&a, &b], 7);
        assert_eq!(resolver.cached(), 2);

        // Same version, one resident and one missing skid at full capacity.
        let target = Vec3::new(2.3, 0.0, 0.0);
        let cached = resolver.resolve(&b, target, [&a, &c], 7);
        let fresh = find_snap_point(&b, target, [&a, &c], &opts, &compat);
        assert_eq!(cached, fresh);
        let picked = cached.map(|c| (c.strategy, c.position));
        assert_eq!(
            picked,
            Some((SnapStrategy::Connector, Vec3::new(2.0, 0.0, 0.0)))
        );
        assert_eq!(resolver.cached(), 2);
    }

    #[test]
    fn resolver_matches_pure_function_across_versions() {
        let moving = skid(1, 0.0, 0.0).with_connectors(vec![Connector::new(
            "g",
            ConnectorKind::Generic,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::UNIT_X,
        )]);
        let mut other = skid(2, 3.0, 0.0).with_connectors(vec![Connector::new(
            "m",
            ConnectorKind::Mechanical,
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        )]);
        let opts = SnapOptions::default();
        let compat = Compatibility::new();
        let mut resolver = SnapResolver::with_capacity(opts, compat.clone(), 4);

        let target = Vec3::new(0.8, 0.0, 0.2);
        let cached = resolver.resolve(&moving, target, [&other], 1);
        assert_eq!(
            cached,
            find_snap_point(&moving, target, [&other], &opts, &compat)
        );
        assert_eq!(resolver.cached(), 1);

        other.set_position(Vec3::new(4.0, 0.0, 0.0));
        let target = Vec3::new(1.9, 0.0, 0.1);
        let cached = resolver.resolve(&moving, target, [&other], 2);
        let fresh = find_snap_point(&moving, target, [&other], &opts, &compat);
        assert_eq!(cached, fresh);
        assert_eq!(fresh.map(|c| c.position), Some(Vec3::new(2.0, 0.0, 0.0)));
    }
}
