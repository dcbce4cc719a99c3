//! Tick-scenario harness for deterministic, frame-by-frame snapshot tests.
//!
//! A scenario is intentionally small: it steps a pointer setup for a fixed
//! number of ticks and snapshots selected state each tick. The resulting
//! report is compared against a golden JSON file on disk (or updated when
//! `POINTERCAST_UPDATE_SNAPSHOTS=1` is set).

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use pointercast_core::SimTick;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a tick scenario.
#[derive(Debug, Clone)]
pub struct TickScenarioConfig {
    /// Human-readable name (written into the snapshot report).
    pub name: String,
    /// Number of ticks to step.
    pub ticks: u64,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// Single snapshot frame captured after a tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

#[derive(Debug, Clone, Serialize)]
struct TickScenarioReport<S> {
    name: String,
    frames: Vec<TickFrame<S>>,
}

/// Step `state` for `ticks` ticks, capturing a snapshot after each step.
pub fn record_tick_scenario<State, Snapshot, StepFn>(
    ticks: u64,
    mut state: State,
    mut step: StepFn,
) -> Vec<TickFrame<Snapshot>>
where
    StepFn: FnMut(SimTick, &mut State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(ticks as usize);
    let mut tick = SimTick::ZERO;
    for _ in 0..ticks {
        let snapshot = step(tick, &mut state);
        frames.push(TickFrame {
            tick: tick.0,
            snapshot,
        });
        tick = tick.advance(1);
    }
    frames
}

/// Run a tick scenario and assert (or update) the snapshot at `config.snapshot_path`.
pub fn run_tick_scenario<State, Snapshot, StepFn>(
    config: TickScenarioConfig,
    state: State,
    step: StepFn,
) -> Result<()>
where
    Snapshot: Serialize,
    StepFn: FnMut(SimTick, &mut State) -> Snapshot,
{
    let frames = record_tick_scenario(config.ticks, state, step);
    let report = TickScenarioReport {
        name: config.name,
        frames,
    };
    assert_json_snapshot(config.snapshot_path, &report)
}
