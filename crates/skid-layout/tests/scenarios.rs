// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! End-to-end layout scenarios: catalog to session.

use skid_geom::{Footprint, Transform, Vec3};
use skid_layout::snap::snap_candidates;
use skid_layout::{
    check_pair, find_snap_point, Catalog, Compatibility, Connector, ConnectorKind, Instance,
    InstanceId, PlacementSession, ProjectSettings, Severity, SnapOptions, SnapStrategy, Violation,
};

fn cube(id: u64, p: Vec3) -> Instance {
    Instance::new(
        InstanceId(id),
        Transform::from_translation(p),
        Footprint::cube(2.0),
    )
}

#[test]
fn interpenetrating_cubes_are_critical() {
    let a = cube(1, Vec3::ZERO);
    let b = cube(2, Vec3::new(1.0, 0.0, 0.0));
    let r = check_pair(&a, &b, 1.5);
    assert!(r.has_collision);
    assert_eq!(r.severity, Some(Severity::Critical));
    assert!((r.distance - 1.0).abs() < 1e-6);
    assert!((r.min_distance - 3.5).abs() < 1e-6);
    assert!((r.overlap - 2.5).abs() < 1e-6);
}

#[test]
fn grid_only_snap_rounds_to_cell() {
    let moving = cube(1, Vec3::ZERO);
    let opts = SnapOptions {
        connectors: false,
        edges: false,
        alignment: false,
        ..SnapOptions::default()
    };
    let best = find_snap_point(
        &moving,
        Vec3::new(1.3, 0.0, 2.7),
        std::iter::empty(),
        &opts,
        &Compatibility::new(),
    );
    assert_eq!(best.map(|c| c.position), Some(Vec3::new(1.0, 0.0, 3.0)));
}

#[test]
fn connector_snap_mates_world_positions_and_outranks_grid() {
    // Other skid's connector sits at world (5, 0, 5).
    let other = cube(2, Vec3::new(5.0, 0.0, 6.0)).with_connectors(vec![Connector::new(
        "in",
        ConnectorKind::Electrical,
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 0.0, -1.0),
    )]);
    let out_offset = Vec3::new(0.0, 0.0, 1.0);
    let moving = cube(1, Vec3::ZERO).with_connectors(vec![Connector::new(
        "out",
        ConnectorKind::Electrical,
        out_offset,
        Vec3::UNIT_Z,
    )]);
    let opts = SnapOptions {
        grid_size: 0.5,
        ..SnapOptions::default()
    };
    let target = Vec3::new(5.2, 0.0, 4.3);

    let ranked = snap_candidates(&moving, target, [&other], &opts, &Compatibility::new());
    let Some(best) = ranked.first() else {
        panic!("expected a snap");
    };
    assert_eq!(best.strategy, SnapStrategy::Connector);
    assert_eq!(best.priority, 5);
    let reach = moving.transform().transform_direction(&out_offset);
    assert_eq!(best.position.add(&reach), Vec3::new(5.0, 0.0, 5.0));
    let pair = best
        .source
        .clone()
        .and_then(|s| s.connectors)
        .map(|c| (c.moving, c.target));
    assert_eq!(pair, Some(("out".to_owned(), "in".to_owned())));

    // The grid candidate is valid and closer, yet ranks below.
    let Some(grid) = ranked.iter().find(|c| c.strategy == SnapStrategy::Grid) else {
        panic!("expected a grid candidate");
    };
    assert_eq!(grid.position, Vec3::new(5.0, 0.0, 4.5));
    assert!(grid.distance < best.distance);

    let picked = find_snap_point(&moving, target, [&other], &opts, &Compatibility::new());
    assert_eq!(picked.as_ref(), Some(best));
}

const CATALOG: &str = r#"{
    "variants": [
        {
            "id": "pump",
            "footprint": { "length": 2.0, "width": 2.0, "height": 2.0 },
            "connectors": [
                {
                    "id": "discharge", "kind": "hydraulic",
                    "offset": [1.0, 0.0, 0.0], "direction": [1, 0, 0]
                }
            ]
        },
        {
            "id": "manifold",
            "footprint": { "length": 2.0, "width": 2.0, "height": 2.0 },
            "connectors": [
                {
                    "id": "suction", "kind": "hydraulic",
                    "offset": [-1.0, 0.0, 0.0], "direction": [-1, 0, 0]
                },
                { "id": "vent", "kind": "cryogenic", "offset": [0.0, 1.0, 0.0] }
            ]
        }
    ]
}"#;

#[test]
fn catalog_driven_session_mates_connectors() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    let settings = ProjectSettings {
        clearance: 0.0,
        ..ProjectSettings::default()
    };
    let mut session =
        PlacementSession::with_compatibility(settings, catalog.compatibility().clone());
    let at = |x| Transform::from_translation(Vec3::new(x, 1.0, 0.0));
    let manifold = catalog.instantiate("manifold", InstanceId(1), at(2.0)).unwrap();
    let pump = catalog.instantiate("pump", InstanceId(2), at(-4.0)).unwrap();
    session.place(manifold).unwrap();
    session.place(pump).unwrap();
    assert_eq!(session.violation_count(), 0);

    // Manifold suction sits at x = 1; pump discharge is 1 ahead of its center.
    let out = session.move_instance(InstanceId(2), Vec3::new(-0.3, 1.0, 0.2)).unwrap();
    let snap = out.snap.as_ref().map(|s| s.strategy);
    assert_eq!(snap, Some(SnapStrategy::Connector));
    assert_eq!(out.position, Vec3::new(0.0, 1.0, 0.0));
    // Faces touch exactly, which is not a collision at zero clearance.
    assert!(out.is_valid(), "{out:?}");
}

#[test]
fn session_reports_walls_after_pairs() {
    let settings = ProjectSettings::default();
    let mut session = PlacementSession::new(settings);
    session.place(cube(1, Vec3::new(0.0, 1.0, 0.0))).unwrap();
    session.place(cube(2, Vec3::new(0.5, 1.0, 0.0))).unwrap();
    session.place(cube(3, Vec3::new(5.8, 1.0, 0.0))).unwrap();
    let kinds: Vec<&str> = session
        .violations()
        .iter()
        .map(|v| match v {
            Violation::Collision(_) => "pair",
            Violation::Boundary { .. } => "wall",
        })
        .collect();
    assert_eq!(kinds, vec!["pair", "wall"]);
    assert_eq!(session.boundary_violations(InstanceId(3)).len(), 1);
}
