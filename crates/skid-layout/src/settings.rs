// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Project-level settings shared by the detector, resolver, and session.

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::search::RadialSearch;
use crate::snap::SnapOptions;

/// Default required clearance between skids, in metres.
pub const DEFAULT_CLEARANCE: f32 = 0.5;

/// Everything a session needs besides the instances themselves.
///
/// Every field has a serde default, so partial documents load.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Enclosure dimensions.
    pub boundary: Boundary,
    /// Required clearance between skids.
    pub clearance: f32,
    /// Snap tunables.
    pub snap: SnapOptions,
    /// Nearest-valid-position search parameters.
    pub search: RadialSearch,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            clearance: DEFAULT_CLEARANCE,
            snap: SnapOptions::default(),
            search: RadialSearch::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let json = r#"{ "clearance": 1.0, "snap": { "grid_size": 0.5 } }"#;
        let s: ProjectSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.clearance, 1.0);
        assert_eq!(s.snap.grid_size, 0.5);
        assert_eq!(s.snap.snap_distance, 1.0);
        assert_eq!(s.search, RadialSearch::default());
        assert_eq!(s.boundary, Boundary::default());
    }
}
