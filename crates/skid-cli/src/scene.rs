// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene documents: settings, an inline catalog, and placements.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skid_geom::{Transform, Vec3};
use skid_layout::{Catalog, CatalogDocument, InstanceId, PlacementSession, ProjectSettings};
use tracing::debug;

/// One placed skid in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// Instance id, unique within the scene.
    pub id: u64,
    /// Catalog variant id.
    pub variant: String,
    /// World position of the footprint center.
    pub position: [f32; 3],
    /// Rotation about the vertical axis, degrees.
    #[serde(default)]
    pub yaw_deg: f32,
}

/// A whole scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Project settings; defaults when absent.
    #[serde(default)]
    pub settings: ProjectSettings,
    /// Inline catalog.
    #[serde(default)]
    pub catalog: CatalogDocument,
    /// Placed skids, in placement order.
    #[serde(default)]
    pub placements: Vec<Placement>,
}

impl Scene {
    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read scene {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse scene {}", path.display()))
    }

    /// Builds a session with every placement applied.
    pub fn into_session(self, settings: ProjectSettings) -> Result<PlacementSession> {
        let catalog = Catalog::from_document(self.catalog).context("load catalog")?;
        let mut session =
            PlacementSession::with_compatibility(settings, catalog.compatibility().clone());
        for p in self.placements {
            let transform = Transform::from_yaw_degrees(Vec3::from(p.position), p.yaw_deg);
            let instance = catalog
                .instantiate(&p.variant, InstanceId(p.id), transform)
                .with_context(|| format!("placement {}", p.id))?;
            session
                .place(instance)
                .with_context(|| format!("placement {}", p.id))?;
        }
        debug!(instances = session.instances().count(), "scene loaded");
        Ok(session)
    }
}
