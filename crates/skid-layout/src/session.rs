// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Placement session: owns the placed skids and keeps the violation set
//! current as they are placed, moved, and removed.
//!
//! Every event touches only the entries involving the affected skid. New
//! entries are computed completely before any stored entry is replaced, so a
//! reader never sees a half-applied event. [`PlacementSession::rebuild`]
//! recomputes everything from scratch and must agree with the incremental
//! state.
//!
//! Moves can be split into [`PlacementSession::begin_move`],
//! [`PlacementSession::evaluate`], and [`PlacementSession::commit`]. Each
//! `begin_move` supersedes the previous ticket for the same skid; committing a
//! superseded ticket fails with [`SessionError::Superseded`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skid_geom::{Aabb, Vec3};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::boundary::{check_boundary, BoundaryViolation};
use crate::broad::PairKey;
use crate::collision::{check_all, check_boxes, CollisionResult, Severity};
use crate::connector::Compatibility;
use crate::instance::{Instance, InstanceId};
use crate::search::find_nearest_valid_position;
use crate::settings::ProjectSettings;
use crate::snap::{SnapCandidate, SnapResolver};

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No skid with this id is placed.
    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),
    /// A skid with this id is already placed.
    #[error("instance {0} is already placed")]
    DuplicateInstance(InstanceId),
    /// A newer move of the same skid was started after this one.
    #[error("move of {instance} superseded (ticket {ticket})")]
    Superseded {
        /// Moved skid.
        instance: InstanceId,
        /// Sequence number of the stale ticket.
        ticket: u64,
    },
}

/// One entry of the violation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    /// Two skids closer than the clearance.
    Collision(CollisionResult),
    /// A skid outside the enclosure on one axis side.
    Boundary {
        /// Offending skid.
        instance: InstanceId,
        /// Detail.
        violation: BoundaryViolation,
    },
}

/// Handle for one in-flight move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveTicket {
    instance: InstanceId,
    seq: u64,
}

impl MoveTicket {
    /// Skid being moved.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Session-wide sequence number; later tickets have larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Result of evaluating a move without applying it.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEvaluation {
    ticket: MoveTicket,
    /// Position that was asked for.
    pub requested: Vec3,
    /// Position that would be committed.
    pub position: Vec3,
    /// Accepted snap, if any.
    pub snap: Option<SnapCandidate>,
    /// Collisions the skid would have at `position`.
    pub collisions: Vec<CollisionResult>,
    /// Boundary violations the skid would have at `position`.
    pub boundary: Vec<BoundaryViolation>,
}

impl MoveEvaluation {
    /// Ticket this evaluation was made for.
    pub fn ticket(&self) -> MoveTicket {
        self.ticket
    }

    /// `true` when the skid would be free of violations.
    pub fn is_valid(&self) -> bool {
        self.collisions.is_empty() && self.boundary.is_empty()
    }
}

/// Result of a committed move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Moved skid.
    pub instance: InstanceId,
    /// Committed position.
    pub position: Vec3,
    /// Accepted snap, if any.
    pub snap: Option<SnapCandidate>,
    /// Collisions involving the skid after the move.
    pub collisions: Vec<CollisionResult>,
    /// Boundary violations of the skid after the move.
    pub boundary: Vec<BoundaryViolation>,
}

impl MoveOutcome {
    /// `true` when the skid ended free of violations.
    pub fn is_valid(&self) -> bool {
        self.collisions.is_empty() && self.boundary.is_empty()
    }
}

/// Result of [`PlacementSession::relocate_nearest_valid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Relocation {
    /// A valid position was found and committed.
    Moved(MoveOutcome),
    /// Nothing valid within the search radius; the skid went back to its last
    /// valid position (or stayed put if it never had one).
    NotFound(MoveOutcome),
}

/// Render hint for one violating pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverlayItem {
    /// Pair identity.
    pub pair: PairKey,
    /// World box of `pair.a`.
    pub a: Aabb,
    /// World box of `pair.b`.
    pub b: Aabb,
    /// Center-to-center line.
    pub line: (Vec3, Vec3),
    /// Violation severity.
    pub severity: Severity,
}

/// Incremental owner of a layout.
#[derive(Debug)]
pub struct PlacementSession {
    settings: ProjectSettings,
    instances: BTreeMap<InstanceId, Instance>,
    collisions: BTreeMap<PairKey, CollisionResult>,
    boundary: BTreeMap<InstanceId, Vec<BoundaryViolation>>,
    last_valid: BTreeMap<InstanceId, Vec3>,
    tickets: BTreeMap<InstanceId, u64>,
    next_seq: u64,
    version: u64,
    resolver: SnapResolver,
}

struct Evaluated {
    collisions: Vec<CollisionResult>,
    boundary: Vec<BoundaryViolation>,
}

impl PlacementSession {
    /// Empty session with default connector compatibility.
    pub fn new(settings: ProjectSettings) -> Self {
        Self::with_compatibility(settings, Compatibility::new())
    }

    /// Empty session using `compatibility` for connector snaps.
    pub fn with_compatibility(settings: ProjectSettings, compatibility: Compatibility) -> Self {
        Self {
            settings,
            instances: BTreeMap::new(),
            collisions: BTreeMap::new(),
            boundary: BTreeMap::new(),
            last_valid: BTreeMap::new(),
            tickets: BTreeMap::new(),
            next_seq: 0,
            version: 0,
            resolver: SnapResolver::new(settings.snap, compatibility),
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Replaces the settings and recomputes every violation.
    pub fn set_settings(&mut self, settings: ProjectSettings) {
        let compatibility = self.resolver.compatibility().clone();
        self.settings = settings;
        self.resolver = SnapResolver::new(settings.snap, compatibility);
        self.rebuild();
    }

    /// Geometry version; bumped on every transform or membership change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Looks up a placed skid.
    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Placed skids in id order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Last committed position of `id` that had no violations.
    pub fn last_valid_position(&self, id: InstanceId) -> Option<Vec3> {
        self.last_valid.get(&id).copied()
    }

    /// Places a new skid and evaluates its violations.
    ///
    /// # Errors
    /// [`SessionError::DuplicateInstance`] if the id is taken.
    pub fn place(&mut self, instance: Instance) -> Result<MoveOutcome, SessionError> {
        let id = instance.id();
        if self.instances.contains_key(&id) {
            return Err(SessionError::DuplicateInstance(id));
        }
        let position = instance.position();
        let evaluated = self.evaluate_at(&instance, position);
        self.instances.insert(id, instance);
        debug!(instance = %id, ?position, "placed");
        Ok(self.apply(id, position, None, evaluated))
    }

    /// Removes a skid and every violation involving it.
    ///
    /// # Errors
    /// [`SessionError::UnknownInstance`] if `id` is not placed.
    pub fn remove(&mut self, id: InstanceId) -> Result<Instance, SessionError> {
        let instance = self
            .instances
            .remove(&id)
            .ok_or(SessionError::UnknownInstance(id))?;
        self.collisions.retain(|pair, _| !pair.contains(id));
        self.boundary.remove(&id);
        self.last_valid.remove(&id);
        self.tickets.remove(&id);
        self.version += 1;
        debug!(instance = %id, "removed");
        Ok(instance)
    }

    /// Snaps, validates, and commits a move in one step.
    ///
    /// The move is committed even when it leaves violations; they are
    /// reported in the outcome and kept in the violation set.
    ///
    /// # Errors
    /// [`SessionError::UnknownInstance`] if `id` is not placed.
    pub fn move_instance(
        &mut self,
        id: InstanceId,
        target: Vec3,
    ) -> Result<MoveOutcome, SessionError> {
        let ticket = self.begin_move(id)?;
        let evaluation = self.evaluate(&ticket, target)?;
        self.commit(evaluation)
    }

    /// Starts a move of `id`, superseding any earlier ticket for it.
    ///
    /// # Errors
    /// [`SessionError::UnknownInstance`] if `id` is not placed.
    pub fn begin_move(&mut self, id: InstanceId) -> Result<MoveTicket, SessionError> {
        if !self.instances.contains_key(&id) {
            return Err(SessionError::UnknownInstance(id));
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        if let Some(prev) = self.tickets.insert(id, seq) {
            debug!(instance = %id, prev, seq, "move ticket superseded");
        }
        Ok(MoveTicket { instance: id, seq })
    }

    /// Snaps and validates `target` for the ticket's skid.
    ///
    /// Leaves instances and violations untouched; only the snap cache may
    /// be filled.
    ///
    /// # Errors
    /// [`SessionError::UnknownInstance`] if the skid was removed.
    pub fn evaluate(
        &mut self,
        ticket: &MoveTicket,
        target: Vec3,
    ) -> Result<MoveEvaluation, SessionError> {
        let id = ticket.instance;
        let instance = self
            .instances
            .get(&id)
            .ok_or(SessionError::UnknownInstance(id))?;
        if !target.is_finite() {
            warn!(instance = %id, ?target, "non-finite move target ignored");
            let position = instance.position();
            let evaluated = self.evaluate_at(instance, position);
            return Ok(MoveEvaluation {
                ticket: *ticket,
                requested: target,
                position,
                snap: None,
                collisions: evaluated.collisions,
                boundary: evaluated.boundary,
            });
        }
        let others = self.instances.values().filter(|o| o.id() != id);
        let snap = self.resolver.resolve(instance, target, others, self.version);
        let position = snap.as_ref().map_or(target, |c| c.position);
        let evaluated = self.evaluate_at(instance, position);
        Ok(MoveEvaluation {
            ticket: *ticket,
            requested: target,
            position,
            snap,
            collisions: evaluated.collisions,
            boundary: evaluated.boundary,
        })
    }

    /// Applies an evaluation if its ticket is still the latest for the skid.
    ///
    /// # Errors
    /// [`SessionError::Superseded`] if a newer ticket exists or the ticket was
    /// already used; [`SessionError::UnknownInstance`] if the skid was removed.
    pub fn commit(&mut self, evaluation: MoveEvaluation) -> Result<MoveOutcome, SessionError> {
        let MoveTicket { instance: id, seq } = evaluation.ticket;
        if !self.instances.contains_key(&id) {
            return Err(SessionError::UnknownInstance(id));
        }
        if self.tickets.get(&id) != Some(&seq) {
            warn!(instance = %id, ticket = seq, "stale move rejected");
            return Err(SessionError::Superseded {
                instance: id,
                ticket: seq,
            });
        }
        self.tickets.remove(&id);
        // Revalidate: other skids may have moved since the evaluation.
        let evaluated = match self.instances.get(&id) {
            Some(instance) => self.evaluate_at(instance, evaluation.position),
            None => return Err(SessionError::UnknownInstance(id)),
        };
        Ok(self.apply(id, evaluation.position, evaluation.snap, evaluated))
    }

    /// Moves `id` to the nearest valid position around `desired`.
    ///
    /// On failure the skid is restored to its last valid position. Either
    /// way any in-flight ticket for the skid is superseded.
    ///
    /// # Errors
    /// [`SessionError::UnknownInstance`] if `id` is not placed.
    pub fn relocate_nearest_valid(
        &mut self,
        id: InstanceId,
        desired: Vec3,
    ) -> Result<Relocation, SessionError> {
        let instance = self
            .instances
            .get(&id)
            .ok_or(SessionError::UnknownInstance(id))?;
        let found = find_nearest_valid_position(
            instance,
            desired,
            self.instances.values(),
            &self.settings.boundary,
            self.settings.clearance,
            &self.settings.search,
        );
        self.tickets.remove(&id);
        match found {
            Some(position) => {
                let instance = self
                    .instances
                    .get(&id)
                    .ok_or(SessionError::UnknownInstance(id))?;
                let evaluated = self.evaluate_at(instance, position);
                debug!(instance = %id, ?desired, ?position, "relocated");
                Ok(Relocation::Moved(self.apply(id, position, None, evaluated)))
            }
            None => {
                let instance = self
                    .instances
                    .get(&id)
                    .ok_or(SessionError::UnknownInstance(id))?;
                let position = self
                    .last_valid
                    .get(&id)
                    .copied()
                    .unwrap_or_else(|| instance.position());
                let evaluated = self.evaluate_at(instance, position);
                warn!(instance = %id, ?desired, restored = ?position, "no valid position found");
                Ok(Relocation::NotFound(self.apply(id, position, None, evaluated)))
            }
        }
    }

    /// Recomputes every violation from scratch.
    pub fn rebuild(&mut self) {
        let collisions: BTreeMap<PairKey, CollisionResult> =
            check_all(self.instances.values(), self.settings.clearance)
                .into_iter()
                .map(|c| (c.pair, c))
                .collect();
        let boundary: BTreeMap<InstanceId, Vec<BoundaryViolation>> = self
            .instances
            .values()
            .map(|inst| (inst.id(), check_boundary(inst, &self.settings.boundary)))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        self.collisions = collisions;
        self.boundary = boundary;
        self.resolver.invalidate();
        info!(
            instances = self.instances.len(),
            violations = self.violation_count(),
            "violation set rebuilt"
        );
    }

    /// Total number of violation entries.
    pub fn violation_count(&self) -> usize {
        self.collisions.len() + self.boundary.values().map(Vec::len).sum::<usize>()
    }

    /// Pair collisions in pair order, then boundary violations in instance
    /// order.
    pub fn violations(&self) -> Vec<Violation> {
        let pairs = self.collisions.values().copied().map(Violation::Collision);
        let walls = self.boundary.iter().flat_map(|(id, list)| {
            list.iter().map(|v| Violation::Boundary {
                instance: *id,
                violation: *v,
            })
        });
        pairs.chain(walls).collect()
    }

    /// Active pair collisions in pair order.
    pub fn collisions(&self) -> impl Iterator<Item = &CollisionResult> {
        self.collisions.values()
    }

    /// Active boundary violations of `id`.
    pub fn boundary_violations(&self, id: InstanceId) -> &[BoundaryViolation] {
        self.boundary.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Box pairs and connecting lines for every active collision.
    pub fn overlay(&self) -> Vec<OverlayItem> {
        self.collisions
            .values()
            .filter_map(|c| {
                let a = self.instances.get(&c.pair.a)?.world_aabb()?;
                let b = self.instances.get(&c.pair.b)?.world_aabb()?;
                Some(OverlayItem {
                    pair: c.pair,
                    a,
                    b,
                    line: (a.center(), b.center()),
                    severity: c.severity?,
                })
            })
            .collect()
    }

    /// Violations `instance` would have at `position` against everything
    /// else currently placed.
    fn evaluate_at(&self, instance: &Instance, position: Vec3) -> Evaluated {
        let id = instance.id();
        let mut moved = instance.clone();
        moved.set_position(position);
        let boundary = check_boundary(&moved, &self.settings.boundary);
        let Some(bb) = moved.world_aabb() else {
            warn!(
                instance = %id,
                footprint = ?moved.footprint(),
                "degenerate geometry treated as non-colliding"
            );
            return Evaluated {
                collisions: Vec::new(),
                boundary,
            };
        };
        let clearance = self.settings.clearance;
        let collisions = self
            .instances
            .values()
            .filter(|o| o.id() != id)
            .filter_map(|o| {
                let other = o.world_aabb()?;
                let result = check_boxes(id, &bb, o.id(), &other, clearance);
                result.has_collision.then_some(result)
            })
            .collect();
        Evaluated { collisions, boundary }
    }

    /// Commits `position` for `id` and swaps in its freshly computed entries.
    fn apply(
        &mut self,
        id: InstanceId,
        position: Vec3,
        snap: Option<SnapCandidate>,
        evaluated: Evaluated,
    ) -> MoveOutcome {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.set_position(position);
        }
        self.collisions.retain(|pair, _| !pair.contains(id));
        self.collisions
            .extend(evaluated.collisions.iter().map(|c| (c.pair, *c)));
        if evaluated.boundary.is_empty() {
            self.boundary.remove(&id);
        } else {
            self.boundary.insert(id, evaluated.boundary.clone());
        }
        let valid = evaluated.collisions.is_empty() && evaluated.boundary.is_empty();
        if valid {
            self.last_valid.insert(id, position);
        }
        self.version += 1;
        debug!(
            instance = %id,
            ?position,
            snapped = snap.as_ref().map(|s| s.strategy.priority()),
            collisions = evaluated.collisions.len(),
            boundary = evaluated.boundary.len(),
            valid,
            "committed"
        );
        MoveOutcome {
            instance: id,
            position,
            snap,
            collisions: evaluated.collisions,
            boundary: evaluated.boundary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use crate::snap::SnapOptions;
    use skid_geom::{Footprint, Transform};

    fn cube(id: u64, x: f32) -> Instance {
        Instance::new(
            InstanceId(id),
            Transform::from_translation(Vec3::new(x, 1.0, 0.0)),
            Footprint::cube(2.0),
        )
    }

    fn settings() -> ProjectSettings {
        ProjectSettings {
            boundary: Boundary::new(40.0, 10.0, 4.0),
            clearance: 0.5,
            snap: SnapOptions {
                grid: false,
                connectors: false,
                edges: false,
                alignment: false,
                ..SnapOptions::default()
            },
            ..ProjectSettings::default()
        }
    }

    fn session_with(xs: &[f32]) -> PlacementSession {
        let mut s = PlacementSession::new(settings());
        for (i, x) in xs.iter().enumerate() {
            s.place(cube(i as u64 + 1, *x)).unwrap();
        }
        s
    }

    #[test]
    fn place_records_pair_violation() {
        let s = session_with(&[0.0, 2.2]);
        assert_eq!(s.violation_count(), 1);
        let c = s.collisions().next().copied().unwrap();
        assert_eq!(c.pair, PairKey::new(InstanceId(1), InstanceId(2)));
        assert_eq!(c.severity, Some(Severity::Warning));
    }

    #[test]
    fn duplicate_place_is_rejected() {
        let mut s = session_with(&[0.0]);
        assert_eq!(
            s.place(cube(1, 5.0)),
            Err(SessionError::DuplicateInstance(InstanceId(1)))
        );
    }

    #[test]
    fn moving_away_clears_only_its_entries() {
        let mut s = session_with(&[0.0, 2.2, 10.0, 11.0]);
        assert_eq!(s.violation_count(), 2);
        let out = s.move_instance(InstanceId(2), Vec3::new(5.0, 1.0, 0.0)).unwrap();
        assert!(out.is_valid());
        let pairs: Vec<_> = s.collisions().map(|c| c.pair).collect();
        assert_eq!(pairs, vec![PairKey::new(InstanceId(3), InstanceId(4))]);
        assert_eq!(
            s.last_valid_position(InstanceId(2)),
            Some(Vec3::new(5.0, 1.0, 0.0))
        );
    }

    #[test]
    fn invalid_moves_still_commit() {
        let mut s = session_with(&[0.0, 6.0]);
        let out = s.move_instance(InstanceId(2), Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(out.position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(out.collisions.len(), 1);
        assert!(out.collisions[0].is_critical());
        let at = s.instance(InstanceId(2)).map(Instance::position);
        assert_eq!(at, Some(Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(
            s.last_valid_position(InstanceId(2)),
            Some(Vec3::new(6.0, 1.0, 0.0))
        );
    }

    #[test]
    fn older_ticket_is_superseded() {
        let mut s = session_with(&[0.0, 6.0]);
        let first = s.begin_move(InstanceId(2)).unwrap();
        let second = s.begin_move(InstanceId(2)).unwrap();
        let stale = s.evaluate(&first, Vec3::new(3.0, 1.0, 0.0)).unwrap();
        let fresh = s.evaluate(&second, Vec3::new(8.0, 1.0, 0.0)).unwrap();
        assert_eq!(s.commit(fresh).map(|o| o.position), Ok(Vec3::new(8.0, 1.0, 0.0)));
        assert!(matches!(s.commit(stale), Err(SessionError::Superseded { .. })));
        let at = s.instance(InstanceId(2)).map(Instance::position);
        assert_eq!(at, Some(Vec3::new(8.0, 1.0, 0.0)));
    }

    #[test]
    fn ticket_commits_once() {
        let mut s = session_with(&[0.0]);
        let t = s.begin_move(InstanceId(1)).unwrap();
        let e = s.evaluate(&t, Vec3::new(2.0, 1.0, 0.0)).unwrap();
        assert!(s.commit(e.clone()).is_ok());
        assert!(matches!(s.commit(e), Err(SessionError::Superseded { .. })));
    }

    #[test]
    fn evaluate_does_not_mutate() {
        let mut s = session_with(&[0.0, 6.0]);
        let before = s.violations();
        let t = s.begin_move(InstanceId(2)).unwrap();
        let e = s.evaluate(&t, Vec3::new(0.5, 1.0, 0.0)).unwrap();
        assert!(!e.is_valid());
        assert_eq!(s.violations(), before);
        let at = s.instance(InstanceId(2)).map(Instance::position);
        assert_eq!(at, Some(Vec3::new(6.0, 1.0, 0.0)));
    }

    #[test]
    fn remove_drops_entries() {
        let mut s = session_with(&[0.0, 1.0, 30.0]);
        assert_eq!(s.violation_count(), 1);
        s.remove(InstanceId(1)).unwrap();
        assert_eq!(s.violation_count(), 0);
        assert_eq!(
            s.remove(InstanceId(1)),
            Err(SessionError::UnknownInstance(InstanceId(1)))
        );
    }

    #[test]
    fn relocate_finds_free_spot() {
        let mut s = session_with(&[0.0, 10.0]);
        let r = s.relocate_nearest_valid(InstanceId(2), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let Relocation::Moved(out) = r else {
            panic!("expected a valid position");
        };
        assert!(out.is_valid());
        assert_eq!(s.violation_count(), 0);
    }

    #[test]
    fn relocate_not_found_restores_last_valid() {
        let mut s = PlacementSession::new(ProjectSettings {
            boundary: Boundary::new(2.0, 2.0, 2.0),
            ..settings()
        });
        s.place(cube(1, 0.0)).unwrap();
        s.place(cube(2, 0.0)).unwrap();
        assert_eq!(
            s.last_valid_position(InstanceId(1)),
            Some(Vec3::new(0.0, 1.0, 0.0))
        );
        let r = s.relocate_nearest_valid(InstanceId(2), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(matches!(r, Relocation::NotFound(ref o) if o.position == Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn overlay_pairs_boxes_with_center_line() {
        let s = session_with(&[0.0, 1.0]);
        let items = s.overlay();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].line,
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0))
        );
        assert_eq!(items[0].severity, Severity::Critical);
    }

    #[test]
    fn incremental_state_matches_rebuild() {
        let mut s = session_with(&[0.0, 2.2, 4.4, 20.0, 19.0]);
        s.move_instance(InstanceId(4), Vec3::new(3.0, 1.0, 0.4)).unwrap();
        s.move_instance(InstanceId(1), Vec3::new(25.0, 1.0, 0.0)).unwrap();
        s.remove(InstanceId(3)).unwrap();
        let incremental = s.violations();
        s.rebuild();
        assert_eq!(s.violations(), incremental);
    }
}
