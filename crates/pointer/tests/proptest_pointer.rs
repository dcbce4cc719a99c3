//! Property-based tests for the pointer pipeline
//!
//! Validates:
//! - The beam never exceeds its maximum length
//! - The cursor always sits at the end of the beam
//! - Distance rescale is `min(base * distance, cap)` and monotonic
//! - Enter/exit transitions only fire on a change of struck collider
//! - Tracker and resolver are pure functions of their inputs

use glam::Vec3;
use pointercast_core::{ColliderId, Pose, SurfaceClass};
use pointercast_physics::{Aabb, ColliderDesc, ColliderWorld, Shape};
use pointercast_pointer::{
    AppearanceUpdater, DroneRoster, HitState, HitStateTracker, PointerConfig, PointerRenderer,
    PointerVisuals, RayCastResult, RecordedVisual, SelectionResolver, TickInputs, WaypointLines,
};
use proptest::prelude::*;

fn hit(id: u8, distance: f32, class: SurfaceClass) -> RayCastResult {
    RayCastResult {
        hit: true,
        point: Vec3::new(0.0, 0.0, distance),
        normal: Vec3::NEG_Z,
        distance,
        collider: Some(ColliderId(id as u32)),
        class,
    }
}

proptest! {
    /// Property: tracer length is clamped to the maximum, reaching it only on a miss
    #[test]
    fn tracer_length_never_exceeds_max(
        wall_distance in 0.5f32..200.0,
        max_length in 1.0f32..150.0,
    ) {
        prop_assume!((wall_distance - max_length).abs() > 1e-3);

        let mut world = ColliderWorld::new();
        world.insert(ColliderDesc::new(Shape::Box(Aabb::new(
            Vec3::new(-1.0, -1.0, wall_distance),
            Vec3::new(1.0, 1.0, wall_distance + 1.0),
        ))));

        let config = PointerConfig { max_length, ..PointerConfig::default() };
        let mut pointer: PointerRenderer<RecordedVisual> =
            PointerRenderer::new(config, PointerVisuals::default());
        pointer.set_active(true);

        let mut drones = DroneRoster::new();
        let out = pointer
            .tick(TickInputs {
                world: &world,
                origin: &Pose::default(),
                trigger: &false,
                drones: &mut drones,
            })
            .unwrap()
            .unwrap();

        prop_assert!(out.tracer_length <= max_length);
        prop_assert_eq!(out.tracer_length == max_length, !out.result.hit);
        prop_assert_eq!(out.appearance.cursor_local_position.z, out.tracer_length);
    }

    /// Property: rescale equals min(base * distance, cap) and never shrinks with distance
    #[test]
    fn rescale_is_capped_and_monotonic(
        base in 0.01f32..2.0,
        cap in 0.1f32..10.0,
        near in 0.1f32..50.0,
        extra in 0.0f32..50.0,
    ) {
        let config = PointerConfig {
            cursor_distance_rescale: true,
            max_cursor_scale: Vec3::splat(cap),
            ..PointerConfig::default()
        };
        let updater = AppearanceUpdater::new(&config, Vec3::splat(base));
        let far = near + extra;

        let scale_at = |distance: f32| {
            updater
                .update(distance, &Pose::default(), &HitState::default())
                .cursor_scale
        };
        let near_scale = scale_at(near);
        let far_scale = scale_at(far);

        prop_assert_eq!(near_scale, Vec3::splat((base * near).min(cap)));
        prop_assert!(far_scale.cmpge(near_scale).all());
        prop_assert!(far_scale.cmple(Vec3::splat(cap)).all());
    }

    /// Property: enter only on a changed collider; exit clears the current hit
    #[test]
    fn transitions_follow_collider_changes(
        sequence in prop::collection::vec(prop::option::of(0u8..3), 1..40),
    ) {
        let mut tracker = HitStateTracker::new();
        let mut held: Option<u8> = None;

        for struck in sequence {
            let result = match struck {
                Some(id) => hit(id, 5.0, SurfaceClass::Untagged),
                None => RayCastResult::MISS,
            };
            let transition = tracker.update(&result);

            let entered = transition.entered.and_then(|h| h.collider).map(|c| c.0 as u8);
            let exited = transition.exited.and_then(|h| h.collider).map(|c| c.0 as u8);

            if let Some(id) = entered {
                prop_assert_ne!(held, Some(id));
            }
            if exited.is_some() {
                prop_assert_eq!(exited, held);
                if entered.is_none() {
                    prop_assert!(tracker.state().current.is_none());
                }
            }
            prop_assert_eq!(entered.is_some(), struck.is_some() && struck != held);
            prop_assert_eq!(exited.is_some(), held.is_some() && struck != held);

            tracker.end_tick();
            held = struck;
        }
    }

    /// Property: repeating an update against the same prior state is idempotent
    #[test]
    fn updates_are_idempotent(
        previous in prop::option::of(0u8..3),
        current in prop::option::of(0u8..3),
        ground in any::<bool>(),
    ) {
        let class = if ground { SurfaceClass::Ground } else { SurfaceClass::Untagged };
        let result = current.map_or(RayCastResult::MISS, |id| hit(id, 8.0, class));

        let mut tracker = HitStateTracker::new();
        if let Some(id) = previous {
            tracker.update(&hit(id, 3.0, class));
            tracker.end_tick();
        }
        let first = tracker.update(&result);
        let second = tracker.update(&result);
        prop_assert_eq!(first, second);

        let mut resolver = SelectionResolver::new();
        let lines = WaypointLines::new();
        let mut drones = DroneRoster::new();
        let a = resolver.resolve(&result, &false, &lines, &mut drones).unwrap();
        let b = resolver.resolve(&result, &false, &lines, &mut drones).unwrap();
        prop_assert_eq!(a, b);
    }
}
