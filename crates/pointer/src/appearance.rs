//! Beam and cursor geometry derived from the tracer length.

use crate::config::PointerConfig;
use crate::hit_state::HitState;
use glam::Vec3;
use pointercast_core::Pose;
use serde::Serialize;

/// Added to the beam midpoint divisor.
pub const BEAM_ADJUST_OFFSET: f32 = 0.00001;

/// Growth applied to the cursor scale when sizing the object interactor.
pub const INTERACTOR_SCALE_INCREASE: f32 = 1.05;

/// Transforms to apply to the pointer visuals for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppearanceState {
    /// Beam scale: `(thickness, thickness, length)`.
    pub tracer_scale: Vec3,
    /// Beam midpoint along the container's forward axis.
    pub tracer_local_position: Vec3,
    /// Cursor scale after the optional distance rescale.
    pub cursor_scale: Vec3,
    /// Cursor position; always `(0, 0, length)`.
    pub cursor_local_position: Vec3,
    /// World forward for the cursor when rotation matching is on.
    pub cursor_forward: Option<Vec3>,
    /// Size for the object-interactor proxy.
    pub interactor_scale: Vec3,
}

/// Computes [`AppearanceState`] from the tracer length and hit state.
#[derive(Debug, Clone)]
pub struct AppearanceUpdater {
    thickness: f32,
    uniform_cursor_scale: Vec3,
    match_target_rotation: bool,
    distance_rescale: bool,
    max_cursor_scale: Vec3,
    cursor_base_scale: Vec3,
}

impl AppearanceUpdater {
    /// Updater for `config`.
    ///
    /// `cursor_base_scale` is the cursor's unscaled size, captured once when
    /// the cursor is created; it is the multiplicative base for rescaling.
    pub fn new(config: &PointerConfig, cursor_base_scale: Vec3) -> Self {
        Self {
            thickness: config.thickness,
            uniform_cursor_scale: config.default_cursor_scale(),
            match_target_rotation: config.cursor_match_target_rotation,
            distance_rescale: config.cursor_distance_rescale,
            max_cursor_scale: config.max_cursor_scale,
            cursor_base_scale,
        }
    }

    /// Geometry for a beam of `tracer_length` leaving `origin`.
    pub fn update(&self, tracer_length: f32, origin: &Pose, hit_state: &HitState) -> AppearanceState {
        let beam_position = tracer_length / (2.0 + BEAM_ADJUST_OFFSET);

        let mut state = AppearanceState {
            tracer_scale: Vec3::new(self.thickness, self.thickness, tracer_length),
            tracer_local_position: Vec3::Z * beam_position,
            cursor_scale: self.uniform_cursor_scale,
            cursor_local_position: Vec3::new(0.0, 0.0, tracer_length),
            cursor_forward: None,
            interactor_scale: self.uniform_cursor_scale * INTERACTOR_SCALE_INCREASE,
        };

        match &hit_state.current {
            Some(hit) => {
                if self.match_target_rotation {
                    state.cursor_forward = Some(-hit.normal);
                }
                if self.distance_rescale {
                    let distance = hit.point.distance(origin.position);
                    state.cursor_scale = self.rescaled(distance);
                }
            }
            None => {
                if self.match_target_rotation {
                    state.cursor_forward = Some(origin.forward);
                }
                if self.distance_rescale {
                    state.cursor_scale = self.rescaled(tracer_length);
                }
            }
        }

        state
    }

    fn rescaled(&self, distance: f32) -> Vec3 {
        (self.cursor_base_scale * distance).min(self.max_cursor_scale)
    }
}
