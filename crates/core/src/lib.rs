#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod layer;
pub mod surface;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use layer::LayerMask;
pub use surface::{SurfaceClass, SurfaceClassError};

/// Fixed tick type; one tick is one rendered frame of the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Read-only snapshot of the emitting origin for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position of the emitter.
    pub position: Vec3,
    /// Forward direction; unit length when built through [`Pose::new`].
    pub forward: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
        }
    }
}

impl Pose {
    /// Create a pose, normalizing `forward`.
    ///
    /// A zero-length or non-finite direction falls back to `+Z`.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// The same pose with `forward` normalized, for poses built field by field.
    pub fn normalized(self) -> Self {
        Self::new(self.position, self.forward)
    }

    /// World-space point `distance` units along the forward axis.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.position + self.forward * distance
    }
}

/// Opaque handle to a collider registered with the physics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider#{}", self.0)
    }
}

/// Opaque handle to the waypoint that owns a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WaypointHandle(pub u32);

/// Opaque handle to a selectable drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DroneHandle(pub u32);

/// Linear RGBA colour applied to pointer materials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Opaque green, the default "valid target" colour.
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    /// Opaque red, the default "invalid target" colour.
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
}
