//! Per-tick ray query against the world.

use glam::Vec3;
use pointercast_core::{ColliderId, LayerMask, Pose, SurfaceClass};
use pointercast_physics::{PhysicsQuery, Ray, RaycastHit};
use serde::Serialize;

/// Outcome of one pointer raycast. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayCastResult {
    /// Whether anything was struck within range.
    pub hit: bool,
    /// World-space hit point (zero on a miss).
    pub point: Vec3,
    /// Surface normal (zero on a miss).
    pub normal: Vec3,
    /// Distance from the origin (zero on a miss).
    pub distance: f32,
    /// Struck collider.
    pub collider: Option<ColliderId>,
    /// Class of the struck collider.
    pub class: SurfaceClass,
}

impl RayCastResult {
    /// Sentinel returned when nothing is struck.
    pub const MISS: Self = Self {
        hit: false,
        point: Vec3::ZERO,
        normal: Vec3::ZERO,
        distance: 0.0,
        collider: None,
        class: SurfaceClass::Untagged,
    };
}

impl From<RaycastHit> for RayCastResult {
    fn from(hit: RaycastHit) -> Self {
        Self {
            hit: true,
            point: hit.point,
            normal: hit.normal,
            distance: hit.distance,
            collider: Some(hit.collider),
            class: hit.class,
        }
    }
}

/// Pluggable replacement for the default physics provider.
///
/// When installed, both the provider and its ignore mask replace the
/// pointer's own.
pub struct CustomRaycast {
    query: Box<dyn PhysicsQuery>,
    layers_to_ignore: LayerMask,
}

impl CustomRaycast {
    /// Wrap a provider with the layers it should skip.
    pub fn new(query: impl PhysicsQuery + 'static, layers_to_ignore: LayerMask) -> Self {
        Self {
            query: Box::new(query),
            layers_to_ignore,
        }
    }
}

/// Builds the pointer ray and runs it through a physics provider.
#[derive(Default)]
pub struct RaycastEngine {
    custom: Option<CustomRaycast>,
}

impl RaycastEngine {
    /// Engine that always queries the provider passed to [`Self::cast`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that ignores the default provider in favour of `custom`.
    pub fn with_custom(custom: CustomRaycast) -> Self {
        Self {
            custom: Some(custom),
        }
    }

    /// Cast from `origin` along its forward axis.
    pub fn cast(
        &self,
        default: &dyn PhysicsQuery,
        origin: &Pose,
        max_distance: f32,
        ignore: LayerMask,
    ) -> RayCastResult {
        if max_distance.is_nan() || max_distance <= 0.0 {
            return RayCastResult::MISS;
        }

        let ray = Ray::from_pose(origin);
        let hit = match &self.custom {
            Some(custom) => custom
                .query
                .query(&ray, max_distance, custom.layers_to_ignore),
            None => default.query(&ray, max_distance, ignore),
        };
        hit.map_or(RayCastResult::MISS, RayCastResult::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointercast_physics::{Aabb, ColliderDesc, ColliderWorld, Shape};

    fn wall(z: f32) -> ColliderDesc {
        ColliderDesc::new(Shape::Box(Aabb::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z + 1.0),
        )))
    }

    #[test]
    fn miss_returns_sentinel() {
        let world = ColliderWorld::new();
        let result = RaycastEngine::new().cast(&world, &Pose::default(), 100.0, LayerMask::empty());
        assert_eq!(result, RayCastResult::MISS);
    }

    #[test]
    fn hit_carries_collider_and_class() {
        let mut world = ColliderWorld::new();
        let id = world.insert(wall(10.0).with_class(SurfaceClass::Drone));
        let result = RaycastEngine::new().cast(&world, &Pose::default(), 100.0, LayerMask::empty());
        assert!(result.hit);
        assert_eq!(result.collider, Some(id));
        assert_eq!(result.class, SurfaceClass::Drone);
        assert_eq!(result.distance, 10.0);
        assert_eq!(result.point, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(result.normal, Vec3::NEG_Z);
    }

    #[test]
    fn non_positive_range_is_a_miss() {
        let mut world = ColliderWorld::new();
        world.insert(wall(0.0));
        let engine = RaycastEngine::new();
        assert!(!engine.cast(&world, &Pose::default(), 0.0, LayerMask::empty()).hit);
        assert!(!engine.cast(&world, &Pose::default(), f32::NAN, LayerMask::empty()).hit);
    }

    #[test]
    fn custom_provider_replaces_default_and_its_mask() {
        let mut default_world = ColliderWorld::new();
        default_world.insert(wall(2.0));

        let mut custom_world = ColliderWorld::new();
        custom_world.insert(wall(4.0).with_layer(LayerMask::UI));
        let expected = custom_world.insert(wall(8.0));

        let engine = RaycastEngine::with_custom(CustomRaycast::new(custom_world, LayerMask::UI));

        // The pointer's own mask would have let the UI wall through.
        let result = engine.cast(&default_world, &Pose::default(), 100.0, LayerMask::empty());
        assert_eq!(result.collider, Some(expected));
        assert_eq!(result.distance, 8.0);
    }
}
