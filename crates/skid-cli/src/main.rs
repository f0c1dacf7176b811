// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `skid`: check layout scenes, preview snaps, and search for valid positions.

mod report;
mod scene;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use skid_app_core::config::ConfigService;
use skid_app_core::project::try_load_project_settings;
use skid_config_fs::FsConfigStore;
use skid_geom::Vec3;
use skid_layout::{InstanceId, ProjectSettings, Relocation};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::scene::Scene;

#[derive(Parser, Debug)]
#[command(author, version, about = "Skid layout checker")]
struct Args {
    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
    /// Load project settings from this directory (overrides the scene's settings when present).
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,
    /// Increase log verbosity (`-v` for debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every violation in a scene.
    Check {
        /// Scene JSON file.
        scene: PathBuf,
    },
    /// Preview the snap for moving one skid to a target, without committing.
    Snap {
        /// Scene JSON file.
        scene: PathBuf,
        /// Instance id to move.
        #[arg(long)]
        instance: u64,
        /// Target position as `x,y,z`.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        to: Vec3,
    },
    /// Find the nearest valid position around a target.
    Nearest {
        /// Scene JSON file.
        scene: PathBuf,
        /// Instance id to relocate.
        #[arg(long)]
        instance: u64,
        /// Desired position as `x,y,z`.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        to: Vec3,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got {s:?}"));
    };
    let num = |p: &&str| p.parse::<f32>().map_err(|e| format!("{p:?}: {e}"));
    let v = Vec3::new(num(x)?, num(y)?, num(z)?);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite position {s:?}"))
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = if verbose > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn resolve_settings(args: &Args, scene: &Scene) -> Result<ProjectSettings> {
    let Some(dir) = &args.settings_dir else {
        return Ok(scene.settings);
    };
    let svc = ConfigService::new(FsConfigStore::at(dir).context("open settings dir")?);
    match try_load_project_settings(&svc).context("load project settings")? {
        Some(settings) => {
            info!(dir = %dir.display(), "using stored project settings");
            Ok(settings)
        }
        None => {
            debug!(dir = %dir.display(), "no stored settings; using scene settings");
            Ok(scene.settings)
        }
    }
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let scene_path = match &args.cmd {
        Command::Check { scene }
        | Command::Snap { scene, .. }
        | Command::Nearest { scene, .. } => scene,
    };
    let scene = Scene::load(scene_path)?;
    let settings = resolve_settings(args, &scene)?;
    let mut session = scene.into_session(settings)?;

    match &args.cmd {
        Command::Check { .. } => {
            let violations = session.violations();
            if args.json {
                let doc = json!({
                    "violation_count": session.violation_count(),
                    "violations": violations,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
            } else if violations.is_empty() {
                writeln!(out, "no violations")?;
            } else {
                writeln!(out, "{}", report::violations_table(&violations))?;
                writeln!(out, "{} violation(s)", session.violation_count())?;
            }
        }
        Command::Snap { instance, to, .. } => {
            let ticket = session.begin_move(InstanceId(*instance))?;
            let eval = session.evaluate(&ticket, *to)?;
            if args.json {
                let doc = json!({
                    "requested": eval.requested,
                    "position": eval.position,
                    "snap": eval.snap,
                    "collisions": eval.collisions,
                    "boundary": eval.boundary,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
            } else {
                writeln!(out, "{}", report::evaluation_table(&eval))?;
            }
        }
        Command::Nearest { instance, to, .. } => {
            let relocation = session.relocate_nearest_valid(InstanceId(*instance), *to)?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&relocation)?)?;
            } else {
                match relocation {
                    Relocation::Moved(o) => {
                        let p = o.position;
                        writeln!(out, "found ({:.3}, {:.3}, {:.3})", p.x(), p.y(), p.z())?;
                    }
                    Relocation::NotFound(_) => writeln!(out, "not found")?,
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)
}
