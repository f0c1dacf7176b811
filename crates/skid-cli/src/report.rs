// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Human-readable tables for CLI output.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use skid_geom::Vec3;
use skid_layout::{Axis, MoveEvaluation, Side, Violation};

fn fmt_vec(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x(), v.y(), v.z())
}

/// Table of violations, one row each.
pub fn violations_table(violations: &[Violation]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["kind", "subject", "severity", "detail"]);
    for v in violations {
        match v {
            Violation::Collision(c) => {
                let severity = c.severity.map_or("-", |s| match s {
                    skid_layout::Severity::Critical => "critical",
                    skid_layout::Severity::Warning => "warning",
                });
                table.add_row(vec![
                    Cell::new("collision"),
                    Cell::new(format!("{} / {}", c.pair.a, c.pair.b)),
                    Cell::new(severity),
                    Cell::new(format!(
                        "distance {:.3} < min {:.3} (overlap {:.3})",
                        c.distance, c.min_distance, c.overlap
                    )),
                ]);
            }
            Violation::Boundary { instance, violation } => {
                let axis = match violation.axis {
                    Axis::X => "x",
                    Axis::Y => "y",
                    Axis::Z => "z",
                };
                let side = match violation.side {
                    Side::Min => "min",
                    Side::Max => "max",
                };
                table.add_row(vec![
                    Cell::new("boundary"),
                    Cell::new(instance.to_string()),
                    Cell::new("-"),
                    Cell::new(format!(
                        "{axis} {side}: {:.3} beyond {:.3} by {:.3}",
                        violation.value,
                        violation.limit,
                        violation.excess()
                    )),
                ]);
            }
        }
    }
    table
}

/// Two-column summary of a move evaluation.
pub fn evaluation_table(eval: &MoveEvaluation) -> Table {
    let strategy = eval.snap.as_ref().map_or_else(
        || "none".to_owned(),
        |s| format!("{:?} (priority {})", s.strategy, s.priority).to_lowercase(),
    );
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["field", "value"]);
    let rows = [
        ("requested", fmt_vec(eval.requested)),
        ("position", fmt_vec(eval.position)),
        ("snap", strategy),
        ("collisions", eval.collisions.len().to_string()),
        ("boundary", eval.boundary.len().to_string()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    table
}
