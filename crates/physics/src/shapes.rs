//! Collider shapes and their ray intersection routines.

use crate::Ray;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parallel rays closer than this to a plane are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Distance and surface normal of a ray/shape intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Distance along the ray.
    pub distance: f32,
    /// Outward surface normal at the hit point.
    pub normal: Vec3,
}

/// Axis-aligned bounding box used for collisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (x, y, z).
    pub min: Vec3,
    /// Maximum corner (x, y, z).
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Create an AABB from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Slab-method ray intersection.
    ///
    /// Reports the face the ray enters through. A ray starting inside the
    /// box reports the face it leaves through. A ray running along a face
    /// plane counts as touching the box.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<ShapeHit> {
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        let mut near_axis = 0;
        let mut far_axis = 0;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            if direction == 0.0 {
                // Parallel to this slab: inside it for every t, or never.
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = direction.recip();
            let t1 = (self.min[axis] - origin) * inv;
            let t2 = (self.max[axis] - origin) * inv;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            if near > tmin {
                tmin = near;
                near_axis = axis;
            }
            if far < tmax {
                tmax = far;
                far_axis = axis;
            }
        }

        // Entire box is behind the origin, or the slabs never overlap.
        if tmax < 0.0 || tmin > tmax {
            return None;
        }

        if tmin >= 0.0 {
            Some(ShapeHit {
                distance: tmin,
                normal: axis_normal(near_axis, -ray.direction[near_axis].signum()),
            })
        } else {
            Some(ShapeHit {
                distance: tmax,
                normal: axis_normal(far_axis, ray.direction[far_axis].signum()),
            })
        }
    }
}

fn axis_normal(axis: usize, sign: f32) -> Vec3 {
    let mut normal = Vec3::ZERO;
    normal[axis] = sign;
    normal
}

/// Sphere collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius (> 0).
    pub radius: f32,
}

impl Sphere {
    /// Ray/sphere intersection; a ray starting inside reports the far side.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<ShapeHit> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let (t0, t1) = (-b - root, -b + root);
        if t1 < 0.0 {
            return None;
        }

        let distance = if t0 >= 0.0 { t0 } else { t1 };
        let normal = (ray.at(distance) - self.center)
            .try_normalize()
            .unwrap_or(-ray.direction);
        Some(ShapeHit { distance, normal })
    }
}

/// Infinite one-sided plane; only rays travelling against `normal` hit it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3,
    /// Front-facing unit normal.
    pub normal: Vec3,
}

impl Plane {
    /// Ray/plane intersection against the front face.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<ShapeHit> {
        let normal = self.normal.try_normalize()?;
        let denom = ray.direction.dot(normal);
        if denom > -PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ShapeHit {
            distance: t,
            normal,
        })
    }
}

/// Any collider shape known to [`crate::ColliderWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box.
    Box(Aabb),
    /// Sphere.
    Sphere(Sphere),
    /// One-sided plane.
    Plane(Plane),
}

impl Shape {
    /// Intersect `ray` with this shape.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<ShapeHit> {
        match self {
            Shape::Box(aabb) => aabb.ray_intersection(ray),
            Shape::Sphere(sphere) => sphere.ray_intersection(ray),
            Shape::Plane(plane) => plane.ray_intersection(ray),
        }
    }
}
