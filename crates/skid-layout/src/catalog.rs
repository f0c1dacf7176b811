// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Equipment catalog: skid variants with footprints and connectors.
//!
//! Raw records keep connector kinds as free strings. They are validated once
//! here; anything outside [`ConnectorKind`] is dropped with a warning so the
//! resolver only ever sees typed kinds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skid_geom::{Footprint, Transform, Vec3};
use thiserror::Error;
use tracing::warn;

use crate::connector::{Compatibility, Connector, ConnectorKind};
use crate::instance::{Instance, InstanceId};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Document is not valid catalog JSON.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two variants share an id.
    #[error("duplicate variant id: {0}")]
    DuplicateVariant(String),
    /// Two connectors in one variant share an id.
    #[error("duplicate connector id {connector} in variant {variant}")]
    DuplicateConnector {
        /// Variant id.
        variant: String,
        /// Connector id.
        connector: String,
    },
    /// A connector offset or direction is NaN or infinite.
    #[error("non-finite geometry on connector {connector} in variant {variant}")]
    NonFiniteConnector {
        /// Variant id.
        variant: String,
        /// Connector id.
        connector: String,
    },
    /// Lookup of a variant that is not in the catalog.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

/// Connector record as written in catalog JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorRecord {
    /// Connector id.
    pub id: String,
    /// Kind name; validated on load.
    pub kind: String,
    /// Local offset from the footprint center.
    pub offset: [f32; 3],
    /// Local facing direction.
    #[serde(default = "default_direction")]
    pub direction: [f32; 3],
}

fn default_direction() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

/// Variant record as written in catalog JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Variant id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Local footprint.
    pub footprint: Footprint,
    /// Connector records.
    #[serde(default)]
    pub connectors: Vec<ConnectorRecord>,
}

/// Whole catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Variants.
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
    /// Extra compatible kind pairs, as names.
    #[serde(default)]
    pub compatibility: Vec<[String; 2]>,
}

/// A validated variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Variant id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Local footprint.
    pub footprint: Footprint,
    /// Typed connectors.
    pub connectors: Vec<Connector>,
}

/// Validated catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: BTreeMap<String, Variant>,
    compatibility: Compatibility,
}

impl Catalog {
    /// Parses and validates catalog JSON.
    ///
    /// # Errors
    /// [`CatalogError`] on malformed JSON, duplicate ids, or non-finite
    /// connector geometry. Unknown connector kinds are not errors.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(text)?;
        Self::from_document(doc)
    }

    /// Validates an already-parsed document.
    ///
    /// # Errors
    /// See [`Catalog::from_json`].
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        let mut variants = BTreeMap::new();
        for record in doc.variants {
            let variant = validate_variant(record)?;
            if variants.contains_key(&variant.id) {
                return Err(CatalogError::DuplicateVariant(variant.id));
            }
            if variant.footprint.is_degenerate() {
                warn!(variant = %variant.id, "degenerate footprint in catalog");
            }
            variants.insert(variant.id.clone(), variant);
        }

        let mut compatibility = Compatibility::new();
        for [a, b] in &doc.compatibility {
            match (a.parse::<ConnectorKind>(), b.parse::<ConnectorKind>()) {
                (Ok(a), Ok(b)) => compatibility.declare(a, b),
                _ => warn!(%a, %b, "ignoring compatibility override with unknown kind"),
            }
        }
        Ok(Self {
            variants,
            compatibility,
        })
    }

    /// Looks up a variant.
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.get(id)
    }

    /// All variants in id order.
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// True when the catalog has no variants.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Kind compatibility including catalog overrides.
    pub fn compatibility(&self) -> &Compatibility {
        &self.compatibility
    }

    /// Builds an instance of `variant`.
    ///
    /// # Errors
    /// [`CatalogError::UnknownVariant`] when `variant` is absent.
    pub fn instantiate(
        &self,
        variant: &str,
        id: InstanceId,
        transform: Transform,
    ) -> Result<Instance, CatalogError> {
        let v = self
            .variants
            .get(variant)
            .ok_or_else(|| CatalogError::UnknownVariant(variant.to_owned()))?;
        Ok(Instance::new(id, transform, v.footprint)
            .with_connectors(v.connectors.clone())
            .with_variant(v.id.clone()))
    }
}

fn validate_variant(record: VariantRecord) -> Result<Variant, CatalogError> {
    let mut connectors: Vec<Connector> = Vec::with_capacity(record.connectors.len());
    for c in record.connectors {
        if connectors.iter().any(|seen| seen.id == c.id) {
            return Err(CatalogError::DuplicateConnector {
                variant: record.id,
                connector: c.id,
            });
        }
        let offset = Vec3::from(c.offset);
        let direction = Vec3::from(c.direction);
        if !(offset.is_finite() && direction.is_finite()) {
            return Err(CatalogError::NonFiniteConnector {
                variant: record.id,
                connector: c.id,
            });
        }
        match c.kind.parse::<ConnectorKind>() {
            Ok(kind) => connectors.push(Connector::new(c.id, kind, offset, direction)),
            Err(err) => warn!(variant = %record.id, connector = %c.id, %err, "skipping connector"),
        }
    }
    let name = if record.name.is_empty() {
        record.id.clone()
    } else {
        record.name
    };
    Ok(Variant {
        name,
        id: record.id,
        footprint: record.footprint,
        connectors,
    })
}
