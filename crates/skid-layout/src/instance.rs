// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Placed skid instances: the geometry adapter between the caller's scene and
//! the detector/resolver.
//!
//! An instance stores only its transform and local footprint. Its world box is
//! derived on every call to [`Instance::world_aabb`]; there is no cached box
//! that could go stale when the transform changes.

use std::fmt;

use serde::{Deserialize, Serialize};
use skid_geom::{world_aabb, Aabb, Footprint, Transform, Vec3};

use crate::connector::{Anchor, Connector};

/// Session-unique identifier of a placed skid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A skid placed in the enclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    id: InstanceId,
    transform: Transform,
    footprint: Footprint,
    connectors: Vec<Connector>,
    variant: Option<String>,
}

impl Instance {
    /// Creates an instance with no connectors.
    pub fn new(id: InstanceId, transform: Transform, footprint: Footprint) -> Self {
        Self {
            id,
            transform,
            footprint,
            connectors: Vec::new(),
            variant: None,
        }
    }

    /// Attaches connectors.
    #[must_use]
    pub fn with_connectors(mut self, connectors: Vec<Connector>) -> Self {
        self.connectors = connectors;
        self
    }

    /// Records the catalog variant this instance was built from.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Identifier.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Current world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Current world position (footprint center).
    pub fn position(&self) -> Vec3 {
        self.transform.translation()
    }

    /// Local footprint.
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Connectors in local space.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Catalog variant id, if any.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Replaces the transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Moves the instance, keeping its rotation.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform = self.transform.with_translation(position);
    }

    /// Returns `true` if the footprint cannot occupy space.
    pub fn is_degenerate(&self) -> bool {
        self.footprint.is_degenerate()
    }

    /// World AABB under the current transform, derived fresh.
    ///
    /// `None` for degenerate footprints or non-finite positions.
    pub fn world_aabb(&self) -> Option<Aabb> {
        world_aabb(&self.transform, &self.footprint)
    }

    /// World AABB the instance would have at `position` with its current
    /// rotation. Does not move the instance.
    pub fn aabb_at(&self, position: Vec3) -> Option<Aabb> {
        world_aabb(&self.transform.with_translation(position), &self.footprint)
    }

    /// Connectors resolved into world space under the current transform.
    pub fn anchors(&self) -> impl Iterator<Item = Anchor> + '_ {
        self.connectors
            .iter()
            .map(move |c| c.anchor(self.id, &self.transform))
    }
}
