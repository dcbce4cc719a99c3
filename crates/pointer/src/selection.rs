//! Ground, line and drone outcomes derived from the tick's ray result.

use crate::error::PointerError;
use crate::raycast::RayCastResult;
use glam::Vec3;
use pointercast_core::{ColliderId, DroneHandle, SurfaceClass, WaypointHandle};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Resolves the waypoint that owns a line collider.
pub trait LineLookup {
    /// Owning waypoint of `collider`, if it has line properties.
    fn origin_waypoint(&self, collider: ColliderId) -> Option<WaypointHandle>;
}

/// Select action exposed by a drone.
pub trait DroneSelect {
    /// Mark the drone as selected.
    fn select(&mut self);
}

/// Resolves the drone that owns a collider.
pub trait DroneLookup {
    /// Select action for the drone owning `collider`.
    fn drone_for(&mut self, collider: ColliderId) -> Option<&mut dyn DroneSelect>;
}

/// Boolean "is pressed" query for the selection trigger.
pub trait SelectionTrigger {
    /// True while the trigger is held.
    fn is_pressed(&self) -> bool;
}

impl SelectionTrigger for bool {
    fn is_pressed(&self) -> bool {
        *self
    }
}

/// Line colliders and the waypoints that own them.
#[derive(Debug, Clone, Default)]
pub struct WaypointLines {
    lines: BTreeMap<ColliderId, WaypointHandle>,
}

impl WaypointLines {
    /// Empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach line properties to `collider`.
    pub fn insert(&mut self, collider: ColliderId, waypoint: WaypointHandle) {
        self.lines.insert(collider, waypoint);
    }
}

impl LineLookup for WaypointLines {
    fn origin_waypoint(&self, collider: ColliderId) -> Option<WaypointHandle> {
        self.lines.get(&collider).copied()
    }
}

/// A selectable drone that counts how often it was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drone {
    /// Drone identity.
    pub handle: DroneHandle,
    /// Number of select calls received.
    pub selections: u32,
}

impl DroneSelect for Drone {
    fn select(&mut self) {
        self.selections += 1;
    }
}

/// Drones keyed by the collider that represents them.
#[derive(Debug, Clone, Default)]
pub struct DroneRoster {
    drones: BTreeMap<ColliderId, Drone>,
}

impl DroneRoster {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the drone represented by `collider`.
    pub fn register(&mut self, collider: ColliderId, handle: DroneHandle) {
        self.drones.insert(
            collider,
            Drone {
                handle,
                selections: 0,
            },
        );
    }

    /// Number of selections received by `handle`.
    pub fn selections(&self, handle: DroneHandle) -> u32 {
        self.drones
            .values()
            .filter(|drone| drone.handle == handle)
            .map(|drone| drone.selections)
            .sum()
    }

    /// Iterate drones in collider order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColliderId, &Drone)> {
        self.drones.iter()
    }
}

impl DroneLookup for DroneRoster {
    fn drone_for(&mut self, collider: ColliderId) -> Option<&mut dyn DroneSelect> {
        self.drones
            .get_mut(&collider)
            .map(|drone| drone as &mut dyn DroneSelect)
    }
}

/// Semantic outcomes for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionOutputs {
    /// The beam rests on ground.
    pub is_over_ground: bool,
    /// Last point the beam struck; kept across misses.
    pub ground_point: Vec3,
    /// Waypoint owning the struck line, if any.
    pub selected_line: Option<WaypointHandle>,
    /// A drone select action was invoked this tick.
    pub drone_select_triggered: bool,
    /// Waypoint placement mode, toggled by the user.
    pub waypoint_mode: bool,
}

/// Derives [`SelectionOutputs`] and holds the few fields that persist across ticks.
#[derive(Debug, Clone, Default)]
pub struct SelectionResolver {
    ground_point: Vec3,
    on_ground: bool,
    waypoint_mode: bool,
}

impl SelectionResolver {
    /// Resolver with no ground contact yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip waypoint placement mode.
    pub fn toggle_waypoint_mode(&mut self) -> bool {
        self.waypoint_mode = !self.waypoint_mode;
        self.waypoint_mode
    }

    /// Whether the beam rested on ground at the last resolve.
    pub fn is_over_ground(&self) -> bool {
        self.on_ground
    }

    /// A waypoint can be placed wherever the beam touches ground.
    pub fn is_setting_waypoint(&self) -> bool {
        self.on_ground
    }

    /// Last known ground contact.
    pub fn ground_point(&self) -> Vec3 {
        self.ground_point
    }

    /// Run the ground, line and drone checks against `result`.
    ///
    /// Drone selection fires on every call while the trigger is held; there is
    /// no debounce. On error the ground flag and ground point are left as they
    /// were.
    pub fn resolve(
        &mut self,
        result: &RayCastResult,
        trigger: &dyn SelectionTrigger,
        lines: &dyn LineLookup,
        drones: &mut dyn DroneLookup,
    ) -> Result<SelectionOutputs, PointerError> {
        let on_ground = result.hit && result.class == SurfaceClass::Ground;
        let ground_point = if result.hit {
            result.point
        } else {
            self.ground_point
        };

        let struck = result.collider.filter(|_| result.hit);

        let selected_line = match struck {
            Some(collider) if result.class == SurfaceClass::Line => Some(
                lines
                    .origin_waypoint(collider)
                    .ok_or(PointerError::MissingLineProperties(collider))?,
            ),
            _ => None,
        };

        let mut drone_select_triggered = false;
        if let Some(collider) = struck {
            if result.class == SurfaceClass::Drone && trigger.is_pressed() {
                drones
                    .drone_for(collider)
                    .ok_or(PointerError::MissingDrone(collider))?
                    .select();
                info!(%collider, "drone selected");
                drone_select_triggered = true;
            }
        }

        self.on_ground = on_ground;
        self.ground_point = ground_point;
        Ok(SelectionOutputs {
            is_over_ground: on_ground,
            ground_point,
            selected_line,
            drone_select_triggered,
            waypoint_mode: self.waypoint_mode,
        })
    }
}
