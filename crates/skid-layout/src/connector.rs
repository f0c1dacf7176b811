// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed connectors and the kind-compatibility relation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skid_geom::{Transform, Vec3};
use thiserror::Error;

use crate::instance::InstanceId;

/// Closed set of connector kinds.
///
/// Catalog records are validated into this enum once at load time; records
/// with any other kind never reach the resolver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// Power and signal cabling.
    Electrical,
    /// Shafts, couplings, structural joints.
    Mechanical,
    /// Liquid lines.
    Hydraulic,
    /// Compressed-air lines.
    Pneumatic,
    /// Mates with every kind.
    Generic,
}

impl ConnectorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Electrical,
        Self::Mechanical,
        Self::Hydraulic,
        Self::Pneumatic,
        Self::Generic,
    ];

    /// Lowercase name used in catalog documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electrical => "electrical",
            Self::Mechanical => "mechanical",
            Self::Hydraulic => "hydraulic",
            Self::Pneumatic => "pneumatic",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a catalog names a connector kind outside [`ConnectorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown connector kind: {0}")]
pub struct UnknownConnectorKind(pub String);

impl FromStr for ConnectorKind {
    type Err = UnknownConnectorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| UnknownConnectorKind(s.to_owned()))
    }
}

/// Symmetric compatibility relation over connector kinds.
///
/// Same-kind pairs and any pair involving [`ConnectorKind::Generic`] are always
/// compatible. Other cross-kind pairs are compatible only when declared.
/// Declarations are stored as unordered pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compatibility {
    overrides: BTreeSet<(ConnectorKind, ConnectorKind)>,
}

impl Compatibility {
    /// Relation with no cross-kind overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `a` and `b` compatible (in both directions).
    pub fn declare(&mut self, a: ConnectorKind, b: ConnectorKind) {
        self.overrides.insert(unordered(a, b));
    }

    /// Builder form of [`Compatibility::declare`].
    #[must_use]
    pub fn with_override(mut self, a: ConnectorKind, b: ConnectorKind) -> Self {
        self.declare(a, b);
        self
    }

    /// Returns `true` if connectors of kinds `a` and `b` may mate.
    pub fn compatible(&self, a: ConnectorKind, b: ConnectorKind) -> bool {
        a == b
            || a == ConnectorKind::Generic
            || b == ConnectorKind::Generic
            || self.overrides.contains(&unordered(a, b))
    }

    /// Declared cross-kind overrides, each as `(lower, higher)`.
    pub fn overrides(&self) -> impl Iterator<Item = (ConnectorKind, ConnectorKind)> + '_ {
        self.overrides.iter().copied()
    }
}

fn unordered(a: ConnectorKind, b: ConnectorKind) -> (ConnectorKind, ConnectorKind) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Attachment point on a skid, in the skid's local space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Identifier, unique within its variant.
    pub id: String,
    /// Connector kind.
    pub kind: ConnectorKind,
    /// Offset from the footprint center, local space.
    pub offset: Vec3,
    /// Facing direction, local space.
    pub direction: Vec3,
}

impl Connector {
    /// Creates a connector; `direction` is normalised.
    pub fn new(id: impl Into<String>, kind: ConnectorKind, offset: Vec3, direction: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            offset,
            direction: direction.normalize(),
        }
    }

    /// World-space view of this connector under `transform`.
    pub fn anchor(&self, owner: InstanceId, transform: &Transform) -> Anchor {
        Anchor {
            instance: owner,
            connector: self.id.clone(),
            kind: self.kind,
            position: transform.transform_point(&self.offset),
            direction: transform.transform_direction(&self.direction),
        }
    }
}

/// A connector resolved into world space for one transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Owning instance.
    pub instance: InstanceId,
    /// Connector id on the owner.
    pub connector: String,
    /// Connector kind.
    pub kind: ConnectorKind,
    /// World position.
    pub position: Vec3,
    /// World facing direction.
    pub direction: Vec3,
}
