// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Spatial layout engine for equipment skids in an enclosure.

This crate provides:
- Clearance collision detection between skids (`collision`), with an
  all-pairs broad phase for small scenes and a uniform spatial hash beyond
  (`broad`).
- Enclosure containment checks (`boundary`).
- A deterministic radial search for the nearest valid position (`search`).
- Snap resolution over connector, edge, alignment, and grid strategies
  (`snap`).
- A placement session that keeps the violation set current incrementally
  (`session`).
- A JSON equipment catalog (`catalog`) and project settings (`settings`).

Design notes:
- Everything is synchronous and single-threaded; the library performs no I/O
  and never installs a `tracing` subscriber.
- Results are deterministic: ordered maps hold all state and every ranking
  has a total tie-break.
- Degenerate geometry never collides and never aborts an evaluation.
"]

/// Enclosure containment.
pub mod boundary;
/// Broad-phase pairing.
pub mod broad;
/// Equipment catalog loading.
pub mod catalog;
/// Pairwise clearance detection.
pub mod collision;
/// Connector kinds and compatibility.
pub mod connector;
/// Placed skid instances.
pub mod instance;
/// Nearest-valid-position search.
pub mod search;
/// Incremental placement session.
pub mod session;
/// Project settings.
pub mod settings;
/// Snap resolution.
pub mod snap;

pub use boundary::{check_boundary, Axis, Boundary, BoundaryViolation, Side};
pub use broad::{AllPairs, BroadPhase, PairKey, SpatialHash};
pub use catalog::{Catalog, CatalogDocument, CatalogError, Variant};
pub use collision::{check_all, check_all_with, check_boxes, check_pair, CollisionResult, Severity};
pub use connector::{Anchor, Compatibility, Connector, ConnectorKind, UnknownConnectorKind};
pub use instance::{Instance, InstanceId};
pub use search::{find_nearest_valid_position, RadialSearch};
pub use session::{
    MoveEvaluation, MoveOutcome, MoveTicket, OverlayItem, PlacementSession, Relocation,
    SessionError, Violation,
};
pub use settings::ProjectSettings;
pub use snap::{
    find_snap_point, snap_to_grid, SnapCandidate, SnapOptions, SnapResolver, SnapStrategy,
};
