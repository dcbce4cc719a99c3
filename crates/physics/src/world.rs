//! In-memory collider registry implementing [`PhysicsQuery`].

use crate::{PhysicsQuery, Ray, RaycastHit, Shape};
use pointercast_core::{ColliderId, LayerMask, SurfaceClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Registration data for one collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Geometry.
    pub shape: Shape,
    /// Layer the collider lives on (normally a single bit).
    #[serde(default = "default_layer")]
    pub layer: LayerMask,
    /// Semantic class, fixed at registration.
    #[serde(default)]
    pub class: SurfaceClass,
    /// Disabled colliders are skipped by queries.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_layer() -> LayerMask {
    LayerMask::DEFAULT
}

fn default_enabled() -> bool {
    true
}

impl ColliderDesc {
    /// Untagged, enabled collider on the default layer.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            layer: default_layer(),
            class: SurfaceClass::Untagged,
            enabled: true,
        }
    }

    /// Builder: set the layer.
    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    /// Builder: set the surface class.
    pub fn with_class(mut self, class: SurfaceClass) -> Self {
        self.class = class;
        self
    }
}

/// Deterministic collider set.
///
/// Ids are handed out monotonically and never reused. Iteration (and
/// therefore tie-breaking between equidistant hits) follows id order.
#[derive(Debug, Default)]
pub struct ColliderWorld {
    colliders: BTreeMap<ColliderId, ColliderDesc>,
    next_id: u32,
}

impl ColliderWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider and return its handle.
    pub fn insert(&mut self, desc: ColliderDesc) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        debug!(%id, class = %desc.class, "collider registered");
        self.colliders.insert(id, desc);
        id
    }

    /// Remove a collider, returning its description if it existed.
    pub fn remove(&mut self, id: ColliderId) -> Option<ColliderDesc> {
        let removed = self.colliders.remove(&id);
        if removed.is_some() {
            debug!(%id, "collider removed");
        }
        removed
    }

    /// Enable or disable a collider. Returns false for unknown ids.
    pub fn set_enabled(&mut self, id: ColliderId, enabled: bool) -> bool {
        match self.colliders.get_mut(&id) {
            Some(desc) => {
                desc.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Look up a collider.
    pub fn get(&self, id: ColliderId) -> Option<&ColliderDesc> {
        self.colliders.get(&id)
    }

    /// Number of registered colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True when no colliders are registered.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl PhysicsQuery for ColliderWorld {
    fn query(&self, ray: &Ray, max_distance: f32, ignore: LayerMask) -> Option<RaycastHit> {
        let mut nearest: Option<RaycastHit> = None;

        for (&id, desc) in &self.colliders {
            if !desc.enabled || desc.layer.intersects(ignore) {
                continue;
            }
            let Some(hit) = desc.shape.ray_intersection(ray) else {
                continue;
            };
            if hit.distance > max_distance {
                continue;
            }
            // Strictly nearer only, so equidistant hits keep the lower id.
            if nearest.map_or(true, |best| hit.distance < best.distance) {
                nearest = Some(RaycastHit {
                    point: ray.at(hit.distance),
                    normal: hit.normal,
                    distance: hit.distance,
                    collider: id,
                    class: desc.class,
                });
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aabb, Plane};
    use glam::Vec3;

    fn wall_at(z: f32) -> ColliderDesc {
        ColliderDesc::new(Shape::Box(Aabb::from_center_size(
            Vec3::new(0.0, 0.0, z + 0.5),
            Vec3::ONE,
        )))
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::Z)
    }

    #[test]
    fn returns_nearest_hit() {
        let mut world = ColliderWorld::new();
        let far = world.insert(wall_at(20.0));
        let near = world.insert(wall_at(10.0).with_class(SurfaceClass::Ground));

        let hit = world
            .query(&forward_ray(), 100.0, LayerMask::empty())
            .expect("hit");
        assert_eq!(hit.collider, near);
        assert_ne!(hit.collider, far);
        assert!((hit.distance - 10.0).abs() < 1e-4);
        assert_eq!(hit.class, SurfaceClass::Ground);
        assert_eq!(hit.normal, Vec3::NEG_Z);
    }

    #[test]
    fn respects_max_distance() {
        let mut world = ColliderWorld::new();
        world.insert(wall_at(10.0));
        assert!(world
            .query(&forward_ray(), 5.0, LayerMask::empty())
            .is_none());
    }

    #[test]
    fn ignored_layers_are_skipped() {
        let mut world = ColliderWorld::new();
        world.insert(wall_at(5.0).with_layer(LayerMask::IGNORE_RAYCAST));
        let visible = world.insert(wall_at(10.0));

        let hit = world
            .query(&forward_ray(), 100.0, LayerMask::IGNORE_RAYCAST)
            .expect("hit");
        assert_eq!(hit.collider, visible);
    }

    #[test]
    fn disabled_colliders_are_skipped() {
        let mut world = ColliderWorld::new();
        let id = world.insert(wall_at(5.0));
        assert!(world.set_enabled(id, false));
        assert!(world
            .query(&forward_ray(), 100.0, LayerMask::empty())
            .is_none());
        assert!(!world.set_enabled(ColliderId(99), true));
    }

    #[test]
    fn ties_resolve_to_lower_id() {
        let mut world = ColliderWorld::new();
        let first = world.insert(wall_at(5.0));
        world.insert(ColliderDesc::new(Shape::Plane(Plane {
            point: Vec3::new(0.0, 0.0, 5.0),
            normal: Vec3::NEG_Z,
        })));

        let hit = world
            .query(&forward_ray(), 100.0, LayerMask::empty())
            .expect("hit");
        assert_eq!(hit.collider, first);
    }

    #[test]
    fn removal_forgets_collider() {
        let mut world = ColliderWorld::new();
        let id = world.insert(wall_at(5.0));
        assert_eq!(world.len(), 1);
        assert!(world.remove(id).is_some());
        assert!(world.remove(id).is_none());
        assert!(world.is_empty());
    }
}
