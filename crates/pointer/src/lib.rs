#![warn(missing_docs)]
//! Straight laser pointer: raycast, hit tracking, beam/cursor layout and
//! selection, driven once per frame.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use pointercast_core::Pose;
//! use pointercast_physics::{Aabb, ColliderDesc, ColliderWorld, Shape};
//! use pointercast_pointer::{
//!     DroneRoster, PointerConfig, PointerRenderer, PointerVisuals, RecordedVisual, TickInputs,
//! };
//!
//! let mut world = ColliderWorld::new();
//! world.insert(ColliderDesc::new(Shape::Box(Aabb::new(
//!     Vec3::new(-1.0, -1.0, 10.0),
//!     Vec3::new(1.0, 1.0, 11.0),
//! ))));
//!
//! let mut pointer: PointerRenderer<RecordedVisual> =
//!     PointerRenderer::new(PointerConfig::default(), PointerVisuals::default());
//! pointer.set_active(true);
//!
//! let mut drones = DroneRoster::new();
//! let output = pointer
//!     .tick(TickInputs {
//!         world: &world,
//!         origin: &Pose::default(),
//!         trigger: &false,
//!         drones: &mut drones,
//!     })
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(output.tracer_length, 10.0);
//! ```

pub mod appearance;
pub mod config;
pub mod controller;
mod error;
pub mod hit_state;
pub mod raycast;
pub mod selection;
pub mod visuals;

// Re-export commonly used types
pub use appearance::{AppearanceState, AppearanceUpdater, BEAM_ADJUST_OFFSET};
pub use config::PointerConfig;
pub use controller::{
    LengthOverride, OriginProvider, PointerRenderer, PointerState, TickInputs, TickOutput,
};
pub use error::PointerError;
pub use hit_state::{ColorDecision, HitState, HitStateTracker, HitTransition};
pub use raycast::{CustomRaycast, RayCastResult, RaycastEngine};
pub use selection::{
    Drone, DroneLookup, DroneRoster, DroneSelect, LineLookup, SelectionOutputs,
    SelectionResolver, SelectionTrigger, WaypointLines,
};
pub use visuals::{CursorSource, PointerVisuals, RecordedVisual, VisibilityState, VisualHandle};
