use crate::config::Settings;
use crate::scene::Scene;
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::{Context, Result};
use pointercast_pointer::{
    PointerRenderer, PointerState, PointerVisuals, RecordedVisual, TickInputs,
};
use pointercast_testkit::{EventRecord, JsonlSink};
use std::path::PathBuf;
use tracing::{debug, info};

pub struct HeadlessConfig {
    pub settings: Settings,
    pub scene: Scene,
    pub ticks: u64,
    pub log: Option<PathBuf>,
}

/// Counters accumulated over a replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub active_ticks: u64,
    pub hit_ticks: u64,
    pub enters: u64,
    pub exits: u64,
    pub drone_selections: u64,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let HeadlessConfig {
        settings,
        mut scene,
        ticks,
        log,
    } = cfg;

    let mut player = ScriptedInputPlayer::new(std::mem::take(&mut scene.script))
        .context("scene has no script")?;
    let visuals = PointerVisuals::default().with_interactor(RecordedVisual::default());
    let mut pointer: PointerRenderer<RecordedVisual> =
        PointerRenderer::new(settings.pointer, visuals)
            .with_line_lookup(std::mem::take(&mut scene.lines));
    pointer.set_active(settings.run.start_active);

    let mut sink = match &log {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create tick log {}", path.display()))?,
        ),
        None => None,
    };

    let mut summary = RunSummary::default();
    for _ in 0..ticks {
        let frame = player.advance();
        if let Some(step) = frame.started {
            for (names, enabled) in [(&step.disable_colliders, false), (&step.enable_colliders, true)] {
                for name in names {
                    if let Some(id) = scene.collider(name) {
                        scene.world.set_enabled(id, enabled);
                        debug!(collider = %id, %name, enabled, "scripted collider toggle");
                    }
                }
            }
            if step.toggle_waypoint {
                let mode = pointer.toggle_waypoint_mode();
                debug!(mode, "waypoint mode toggled");
            }
        }
        pointer.set_active(frame.active);

        let tick = pointer.current_tick();
        let output = pointer
            .tick(TickInputs {
                world: &scene.world,
                origin: &frame.origin,
                trigger: &frame.trigger,
                drones: &mut scene.drones,
            })
            .with_context(|| format!("pointer tick {} failed", tick.0))?;
        summary.ticks += 1;

        match output {
            Some(out) => {
                summary.active_ticks += 1;
                summary.hit_ticks += u64::from(out.result.hit);
                summary.enters += u64::from(out.transition.entered.is_some());
                summary.exits += u64::from(out.transition.exited.is_some());
                summary.drone_selections += u64::from(out.selection.drone_select_triggered);
                if let Some(sink) = sink.as_mut() {
                    sink.write(&EventRecord {
                        tick: out.tick,
                        kind: "pointer_tick",
                        payload: &out,
                    })?;
                }
            }
            None => {
                if let Some(sink) = sink.as_mut() {
                    sink.write(&EventRecord {
                        tick,
                        kind: "pointer_inactive",
                        payload: PointerState::Inactive,
                    })?;
                }
            }
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }
    if !player.finished() {
        info!(ticks, "replay stopped before the script ended");
    }
    for (collider, drone) in scene.drones.iter() {
        info!(%collider, drone = drone.handle.0, selections = drone.selections, "drone tally");
    }
    info!(?summary, "replay finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = r#"{
        "colliders": [
            {
                "name": "wall",
                "shape": { "kind": "box", "min": [-2.0, -2.0, 8.0], "max": [2.0, 2.0, 9.0] },
                "class": "ground"
            },
            {
                "name": "drone",
                "shape": { "kind": "sphere", "center": [0.0, 0.0, 4.0], "radius": 0.5 },
                "class": "drone",
                "drone": 9,
                "enabled": false
            }
        ],
        "script": [
            { "duration_ticks": 2 },
            { "duration_ticks": 2, "trigger": true, "enable_colliders": ["drone"] },
            { "duration_ticks": 1, "disable_colliders": ["drone", "wall"] },
            { "duration_ticks": 1, "active": false }
        ]
    }"#;

    fn config(log: Option<PathBuf>, ticks: u64) -> HeadlessConfig {
        HeadlessConfig {
            settings: Settings::default(),
            scene: Scene::from_json(CORRIDOR).unwrap(),
            ticks,
            log,
        }
    }

    #[test]
    fn replay_counts_transitions() {
        let summary = run(config(None, 6)).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                ticks: 6,
                active_ticks: 5,
                hit_ticks: 4,
                enters: 2,
                exits: 2,
                drone_selections: 2,
            }
        );
    }

    #[test]
    fn replay_writes_one_record_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("ticks.jsonl");
        run(config(Some(path.clone()), 6)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0]["kind"], "pointer_tick");
        assert_eq!(records[0]["payload"]["result"]["hit"], true);
        assert_eq!(records[4]["payload"]["result"]["hit"], false);
        assert_eq!(records[5]["kind"], "pointer_inactive");
    }

    #[test]
    fn empty_script_is_an_error() {
        let cfg = HeadlessConfig {
            settings: Settings::default(),
            scene: Scene::from_json(r#"{ "colliders": [] }"#).unwrap(),
            ticks: 1,
            log: None,
        };
        assert!(run(cfg).is_err());
    }
}
