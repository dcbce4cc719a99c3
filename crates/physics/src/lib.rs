#![warn(missing_docs)]
//! Ray queries against simple collider shapes.
//!
//! The pointer never talks to a physics backend directly; it goes through
//! [`PhysicsQuery`]. [`ColliderWorld`] is the in-memory provider used by the
//! headless runner and the tests.

pub mod shapes;
pub mod world;

use glam::Vec3;
use pointercast_core::{ColliderId, LayerMask, Pose, SurfaceClass};

pub use shapes::{Aabb, Plane, Shape, ShapeHit, Sphere};
pub use world::{ColliderDesc, ColliderWorld};

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit-length direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction` (zero-length falls back to `+Z`).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Ray leaving `pose.position` along `pose.forward`.
    pub fn from_pose(pose: &Pose) -> Self {
        Self::new(pose.position, pose.forward)
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection reported by a [`PhysicsQuery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
    /// Collider that was struck.
    pub collider: ColliderId,
    /// Class assigned to the collider when it was registered.
    pub class: SurfaceClass,
}

/// Physics query provider.
///
/// Implementations must return the nearest intersection within
/// `max_distance`, skipping colliders on any layer in `ignore`.
pub trait PhysicsQuery {
    /// Cast `ray` and return the nearest qualifying hit.
    fn query(&self, ray: &Ray, max_distance: f32, ignore: LayerMask) -> Option<RaycastHit>;
}

impl<T: PhysicsQuery + ?Sized> PhysicsQuery for &T {
    fn query(&self, ray: &Ray, max_distance: f32, ignore: LayerMask) -> Option<RaycastHit> {
        (**self).query(ray, max_distance, ignore)
    }
}

impl<T: PhysicsQuery + ?Sized> PhysicsQuery for Box<T> {
    fn query(&self, ray: &Ray, max_distance: f32, ignore: LayerMask) -> Option<RaycastHit> {
        (**self).query(ray, max_distance, ignore)
    }
}
