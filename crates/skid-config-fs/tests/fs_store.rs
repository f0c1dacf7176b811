// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Round-trips through the filesystem store.

use skid_app_core::config::{ConfigError, ConfigService, ConfigStore};
use skid_app_core::project::{load_project_settings, save_project_settings};
use skid_config_fs::FsConfigStore;
use skid_layout::ProjectSettings;

#[test]
fn project_settings_persist_as_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path().join("nested")).unwrap();
    let svc = ConfigService::new(store);

    assert_eq!(
        load_project_settings(&svc).unwrap(),
        ProjectSettings::default()
    );

    let mut settings = ProjectSettings::default();
    settings.clearance = 0.75;
    settings.search.angles = 8;
    save_project_settings(&svc, &settings).unwrap();

    let file = dir.path().join("nested").join("project.json");
    assert!(file.exists());
    let reopened = ConfigService::new(FsConfigStore::at(dir.path().join("nested")).unwrap());
    assert_eq!(load_project_settings(&reopened).unwrap(), settings);
}

#[test]
fn missing_key_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(store.load_raw("nothing"), Err(ConfigError::NotFound)));
}

#[test]
fn path_like_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(store.save_raw("../escape", b"{}"), Err(ConfigError::Other(_))));
    assert!(matches!(store.load_raw(""), Err(ConfigError::Other(_))));
}
