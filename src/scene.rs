//! JSON scene files: colliders, their collaborators and a scripted timeline.

use crate::scripted_input::ScriptStep;
use pointercast_core::{
    ColliderId, DroneHandle, LayerMask, SurfaceClass, SurfaceClassError, WaypointHandle,
};
use pointercast_physics::{ColliderDesc, ColliderWorld, Shape};
use pointercast_pointer::{DroneRoster, WaypointLines};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors emitted while loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Wrap IO errors when reading the scene file.
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),
    /// A collider carries an unrecognised class name.
    #[error("collider `{name}`: {source}")]
    Class {
        /// Collider name.
        name: String,
        /// Underlying parse failure.
        source: SurfaceClassError,
    },
    /// Layer index outside 0..32.
    #[error("collider `{name}`: layer {layer} is out of range")]
    Layer {
        /// Collider name.
        name: String,
        /// Offending index.
        layer: u8,
    },
    /// A waypoint was attached to something other than a line collider.
    #[error("collider `{0}` has a waypoint but is not a line collider")]
    StrayWaypoint(String),
    /// A drone was attached to something other than a drone collider.
    #[error("collider `{0}` has a drone but is not a drone collider")]
    StrayDrone(String),
    /// Two colliders share a name.
    #[error("duplicate collider name `{0}`")]
    DuplicateName(String),
    /// The script refers to a collider that does not exist.
    #[error("script refers to unknown collider `{0}`")]
    UnknownCollider(String),
}

#[derive(Debug, Clone, Deserialize)]
struct SceneFile {
    #[serde(default)]
    colliders: Vec<ColliderEntry>,
    #[serde(default)]
    script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ColliderEntry {
    #[serde(default)]
    name: Option<String>,
    shape: Shape,
    /// Layer index; the default layer when omitted.
    #[serde(default)]
    layer: Option<u8>,
    #[serde(default)]
    class: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    waypoint: Option<u32>,
    #[serde(default)]
    drone: Option<u32>,
}

fn enabled_by_default() -> bool {
    true
}

/// A scene ready to drive the pointer.
pub struct Scene {
    pub world: ColliderWorld,
    pub lines: WaypointLines,
    pub drones: DroneRoster,
    pub script: Vec<ScriptStep>,
    names: BTreeMap<String, ColliderId>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(input: &str) -> Result<Self, SceneError> {
        let file: SceneFile = serde_json::from_str(input)?;

        let mut scene = Scene {
            world: ColliderWorld::new(),
            lines: WaypointLines::new(),
            drones: DroneRoster::new(),
            script: file.script,
            names: BTreeMap::new(),
        };

        for (index, entry) in file.colliders.into_iter().enumerate() {
            let name = entry
                .name
                .clone()
                .unwrap_or_else(|| format!("collider{index}"));
            scene.add_collider(name, entry)?;
        }

        for step in &scene.script {
            for name in step.disable_colliders.iter().chain(&step.enable_colliders) {
                if !scene.names.contains_key(name) {
                    return Err(SceneError::UnknownCollider(name.clone()));
                }
            }
        }

        Ok(scene)
    }

    fn add_collider(&mut self, name: String, entry: ColliderEntry) -> Result<(), SceneError> {
        if self.names.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }

        let class = SurfaceClass::parse(&entry.class).map_err(|source| SceneError::Class {
            name: name.clone(),
            source,
        })?;
        let layer = match entry.layer {
            Some(layer) => LayerMask::layer(layer).ok_or_else(|| SceneError::Layer {
                name: name.clone(),
                layer,
            })?,
            None => LayerMask::DEFAULT,
        };
        if entry.waypoint.is_some() && class != SurfaceClass::Line {
            return Err(SceneError::StrayWaypoint(name));
        }
        if entry.drone.is_some() && class != SurfaceClass::Drone {
            return Err(SceneError::StrayDrone(name));
        }

        let mut desc = ColliderDesc::new(entry.shape)
            .with_layer(layer)
            .with_class(class);
        desc.enabled = entry.enabled;
        let id = self.world.insert(desc);

        if let Some(waypoint) = entry.waypoint {
            self.lines.insert(id, WaypointHandle(waypoint));
        }
        if let Some(drone) = entry.drone {
            self.drones.register(id, DroneHandle(drone));
        }
        self.names.insert(name, id);
        Ok(())
    }

    /// Collider registered under `name`.
    pub fn collider(&self, name: &str) -> Option<ColliderId> {
        self.names.get(name).copied()
    }
}
