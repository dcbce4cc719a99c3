//! Boundary to the engine objects that draw the beam and cursor.

use glam::Vec3;
use pointercast_core::{Pose, Rgba};
use serde::{Deserialize, Serialize};

/// When a pointer element is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    /// Drawn only while the pointer is active.
    #[default]
    OnWhenActive,
    /// Always drawn; also keeps the pointer updating while inactive.
    AlwaysOn,
    /// Never drawn.
    AlwaysOff,
}

impl VisibilityState {
    /// Visibility for the given pointer activity.
    pub fn resolve(self, pointer_active: bool) -> bool {
        match self {
            VisibilityState::OnWhenActive => pointer_active,
            VisibilityState::AlwaysOn => true,
            VisibilityState::AlwaysOff => false,
        }
    }
}

/// Opaque engine object the pointer positions and colours.
///
/// Local transforms are relative to the pointer container, which follows the
/// origin pose.
pub trait VisualHandle {
    /// Set the scale relative to the container.
    fn set_local_scale(&mut self, scale: Vec3);
    /// Scale relative to the container.
    fn local_scale(&self) -> Vec3;
    /// Set the position relative to the container.
    fn set_local_position(&mut self, position: Vec3);
    /// Place the object in world space, facing `pose.forward`.
    fn set_world_pose(&mut self, pose: &Pose);
    /// Move the object in world space without turning it.
    fn set_world_position(&mut self, position: Vec3);
    /// Position in world space.
    fn world_position(&self) -> Vec3;
    /// Point the object's forward axis along `forward` (world space).
    fn set_forward(&mut self, forward: Vec3);
    /// Show or hide the object.
    fn set_visible(&mut self, visible: bool);
    /// Tint the object's material.
    fn set_material_color(&mut self, color: Rgba);
}

/// Plain-data visual that remembers the last value of every setter.
///
/// Used by the headless runner and tests in place of engine objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedVisual {
    /// Last local scale.
    pub local_scale: Vec3,
    /// Last local position.
    pub local_position: Vec3,
    /// Last world position.
    pub world_position: Vec3,
    /// Last forward axis.
    pub forward: Vec3,
    /// Whether the object is shown.
    pub visible: bool,
    /// Last material colour, if any was applied.
    pub color: Option<Rgba>,
}

impl Default for RecordedVisual {
    fn default() -> Self {
        Self {
            local_scale: Vec3::ONE,
            local_position: Vec3::ZERO,
            world_position: Vec3::ZERO,
            forward: Vec3::Z,
            visible: false,
            color: None,
        }
    }
}

impl RecordedVisual {
    /// Visual with an authored scale, standing in for a custom prefab.
    pub fn with_scale(scale: Vec3) -> Self {
        Self {
            local_scale: scale,
            ..Self::default()
        }
    }
}

impl VisualHandle for RecordedVisual {
    fn set_local_scale(&mut self, scale: Vec3) {
        self.local_scale = scale;
    }

    fn local_scale(&self) -> Vec3 {
        self.local_scale
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.local_position = position;
    }

    fn set_world_pose(&mut self, pose: &Pose) {
        self.world_position = pose.position;
        self.forward = pose.forward;
    }

    fn set_world_position(&mut self, position: Vec3) {
        self.world_position = position;
    }

    fn world_position(&self) -> Vec3 {
        self.world_position
    }

    fn set_forward(&mut self, forward: Vec3) {
        self.forward = forward;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_material_color(&mut self, color: Rgba) {
        self.color = Some(color);
    }
}

/// How the cursor object was provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSource {
    /// Default sphere, sized from the config.
    Primitive,
    /// Caller-provided object that keeps its own authored scale.
    Custom,
}

/// The objects a pointer drives.
#[derive(Debug, Clone)]
pub struct PointerVisuals<V> {
    /// Parent of tracer and cursor; follows the origin.
    pub container: V,
    /// Beam.
    pub tracer: V,
    /// Terminal marker.
    pub cursor: V,
    /// Optional proxy kept on the cursor for object interaction.
    pub interactor: Option<V>,
    /// Where the cursor came from.
    pub cursor_source: CursorSource,
}

impl<V> PointerVisuals<V> {
    /// Visuals using the default primitive cursor.
    pub fn new(container: V, tracer: V, cursor: V) -> Self {
        Self {
            container,
            tracer,
            cursor,
            interactor: None,
            cursor_source: CursorSource::Primitive,
        }
    }

    /// Visuals with a custom cursor whose authored scale is kept.
    pub fn with_custom_cursor(container: V, tracer: V, cursor: V) -> Self {
        Self {
            cursor_source: CursorSource::Custom,
            ..Self::new(container, tracer, cursor)
        }
    }

    /// Attach an object-interactor proxy.
    pub fn with_interactor(mut self, interactor: V) -> Self {
        self.interactor = Some(interactor);
        self
    }
}

impl<V: Default> Default for PointerVisuals<V> {
    fn default() -> Self {
        Self::new(V::default(), V::default(), V::default())
    }
}
