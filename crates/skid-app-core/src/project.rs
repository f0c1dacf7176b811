// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Project settings persisted through the config service.

use skid_layout::ProjectSettings;
use tracing::debug;

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Key under which project settings are stored.
pub const PROJECT_KEY: &str = "project";

/// Loads project settings, falling back to defaults when none are stored.
pub fn load_project_settings<S: ConfigStore>(
    svc: &ConfigService<S>,
) -> Result<ProjectSettings, ConfigError> {
    let settings = svc.load_or_default::<ProjectSettings>(PROJECT_KEY)?;
    debug!(key = PROJECT_KEY, clearance = settings.clearance, "project settings loaded");
    Ok(settings)
}

/// Loads project settings only if some are stored.
pub fn try_load_project_settings<S: ConfigStore>(
    svc: &ConfigService<S>,
) -> Result<Option<ProjectSettings>, ConfigError> {
    svc.load(PROJECT_KEY)
}

/// Persists project settings.
pub fn save_project_settings<S: ConfigStore>(
    svc: &ConfigService<S>,
    settings: &ProjectSettings,
) -> Result<(), ConfigError> {
    svc.save(PROJECT_KEY, settings)
}
