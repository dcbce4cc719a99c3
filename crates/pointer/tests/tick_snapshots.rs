use glam::Vec3;
use pointercast_core::{ColliderId, Pose, SimTick, SurfaceClass, WaypointHandle};
use pointercast_physics::{Aabb, ColliderDesc, ColliderWorld, Shape};
use pointercast_pointer::{
    ColorDecision, DroneRoster, PointerConfig, PointerRenderer, PointerVisuals, RecordedVisual,
    TickInputs, WaypointLines,
};
use pointercast_testkit::{run_tick_scenario, TickScenarioConfig};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct PointerSnapshot {
    hit: bool,
    collider: Option<u32>,
    color: ColorDecision,
    entered: Option<u32>,
    exited: Option<u32>,
    over_ground: bool,
    selected_line: Option<u32>,
}

struct Rig {
    world: ColliderWorld,
    drones: DroneRoster,
    pointer: PointerRenderer<RecordedVisual>,
    ground: ColliderId,
}

fn block(min_x: f32, max_x: f32) -> Shape {
    Shape::Box(Aabb::new(
        Vec3::new(min_x, -1.0, 10.0),
        Vec3::new(max_x, 1.0, 11.0),
    ))
}

fn snapshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
}

#[test]
fn pointer_enter_exit_snapshot() -> anyhow::Result<()> {
    let mut world = ColliderWorld::new();
    let ground = world.insert(ColliderDesc::new(block(-1.0, 1.0)).with_class(SurfaceClass::Ground));
    let line = world.insert(ColliderDesc::new(block(4.0, 6.0)).with_class(SurfaceClass::Line));

    let mut lines = WaypointLines::new();
    lines.insert(line, WaypointHandle(42));

    let mut pointer = PointerRenderer::new(PointerConfig::default(), PointerVisuals::default())
        .with_line_lookup(lines);
    pointer.set_active(true);

    let rig = Rig {
        world,
        drones: DroneRoster::new(),
        pointer,
        ground,
    };

    run_tick_scenario(
        TickScenarioConfig {
            name: "pointer_enter_exit".to_string(),
            ticks: 5,
            snapshot_path: snapshot_path("pointer_enter_exit.json"),
        },
        rig,
        |tick: SimTick, rig: &mut Rig| {
            let origin_x = match tick.0 {
                2 => {
                    rig.world.set_enabled(rig.ground, false);
                    0.0
                }
                3 => 5.0,
                4 => {
                    rig.world.set_enabled(rig.ground, true);
                    0.0
                }
                _ => 0.0,
            };
            let origin = Pose::new(Vec3::new(origin_x, 0.0, 0.0), Vec3::Z);

            let out = rig
                .pointer
                .tick(TickInputs {
                    world: &rig.world,
                    origin: &origin,
                    trigger: &false,
                    drones: &mut rig.drones,
                })
                .expect("all line colliders are registered")
                .expect("pointer is active");

            PointerSnapshot {
                hit: out.result.hit,
                collider: out.result.collider.map(|c| c.0),
                color: out.transition.color,
                entered: out.transition.entered.and_then(|h| h.collider).map(|c| c.0),
                exited: out.transition.exited.and_then(|h| h.collider).map(|c| c.0),
                over_ground: out.selection.is_over_ground,
                selected_line: out.selection.selected_line.map(|w| w.0),
            }
        },
    )
}
