//! pointercast - headless replay for the straight laser pointer
//!
//! Loads pointer settings and a scene, drives the pointer once per tick from
//! the scene's scripted timeline and optionally writes a JSONL tick log.

mod config;
mod headless;
mod scene;
mod scripted_input;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Settings, DEFAULT_SETTINGS_PATH};
use headless::HeadlessConfig;
use scene::Scene;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless laser pointer replay", long_about = None)]
struct Args {
    /// Pointer settings (TOML); defaults are used when missing or invalid
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Scene file (JSON) with colliders and the scripted timeline
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Ticks to replay; overrides `run.ticks` from the settings file
    #[arg(long)]
    ticks: Option<u64>,

    /// Write one JSON record per tick to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Write the resolved settings back to `--config` and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting pointercast v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let settings = Settings::load_from_path(&args.config);

    if args.init_config {
        settings
            .save_to_path(&args.config)
            .with_context(|| format!("failed to write {}", args.config.display()))?;
        info!(path = %args.config.display(), "settings written");
        return Ok(());
    }

    let Some(scene_path) = args.scene else {
        anyhow::bail!("--scene is required unless --init-config is given");
    };
    let scene = Scene::load(&scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;

    let ticks = args.ticks.unwrap_or(settings.run.ticks);
    let summary = headless::run(HeadlessConfig {
        settings,
        scene,
        ticks,
        log: args.log,
    })?;

    println!(
        "{} ticks ({} active, {} on target): {} enter, {} exit, {} drone selections",
        summary.ticks,
        summary.active_ticks,
        summary.hit_ticks,
        summary.enters,
        summary.exits,
        summary.drone_selections
    );
    Ok(())
}
