//! Pointer appearance and behaviour settings.

use crate::visuals::VisibilityState;
use glam::Vec3;
use pointercast_core::{LayerMask, Rgba};
use serde::{Deserialize, Serialize};

/// Settings for a straight laser pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Maximum length the beam can reach.
    pub max_length: f32,
    /// Beam cross-section; also the base unit for the cursor size.
    pub thickness: f32,
    /// Cursor size relative to `thickness`.
    pub cursor_scale_multiplier: f32,
    /// Turn the cursor to face into the struck surface.
    pub cursor_match_target_rotation: bool,
    /// Grow the cursor with distance so it keeps its apparent size.
    pub cursor_distance_rescale: bool,
    /// Upper bound for the rescaled cursor.
    pub max_cursor_scale: Vec3,
    /// Colour while the beam rests on a surface.
    pub valid_color: Rgba,
    /// Colour while nothing is in range.
    pub invalid_color: Rgba,
    /// When the beam is drawn.
    pub tracer_visibility: VisibilityState,
    /// When the cursor is drawn.
    pub cursor_visibility: VisibilityState,
    /// Layers the beam passes through.
    pub layers_to_ignore: LayerMask,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            max_length: 100.0,
            thickness: 0.002,
            cursor_scale_multiplier: 25.0,
            cursor_match_target_rotation: false,
            cursor_distance_rescale: false,
            max_cursor_scale: Vec3::INFINITY,
            valid_color: Rgba::GREEN,
            invalid_color: Rgba::RED,
            tracer_visibility: VisibilityState::OnWhenActive,
            cursor_visibility: VisibilityState::OnWhenActive,
            layers_to_ignore: LayerMask::IGNORE_RAYCAST,
        }
    }
}

impl PointerConfig {
    /// Uniform scale of the default primitive cursor.
    pub fn default_cursor_scale(&self) -> Vec3 {
        Vec3::splat(self.thickness * self.cursor_scale_multiplier)
    }

    /// True when either element ignores the pointer's active flag and stays on.
    pub fn is_forced_visible(&self) -> bool {
        self.tracer_visibility == VisibilityState::AlwaysOn
            || self.cursor_visibility == VisibilityState::AlwaysOn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_straight_pointer() {
        let config = PointerConfig::default();
        assert_eq!(config.max_length, 100.0);
        assert!(!config.cursor_match_target_rotation);
        assert!(!config.cursor_distance_rescale);
        assert!(config.max_cursor_scale.x.is_infinite());
        assert!(!config.is_forced_visible());
        assert_eq!(
            config.default_cursor_scale(),
            Vec3::splat(config.thickness * config.cursor_scale_multiplier)
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PointerConfig = toml::from_str(
            r#"
                max_length = 30.0
                cursor_distance_rescale = true
                max_cursor_scale = [5.0, 5.0, 5.0]
                cursor_visibility = "always_on"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.max_length, 30.0);
        assert!(config.cursor_distance_rescale);
        assert_eq!(config.max_cursor_scale, Vec3::splat(5.0));
        assert_eq!(config.cursor_visibility, VisibilityState::AlwaysOn);
        assert!(config.is_forced_visible());
        assert_eq!(config.thickness, 0.002);
        assert_eq!(config.layers_to_ignore, LayerMask::IGNORE_RAYCAST);
    }

    #[test]
    fn ignore_mask_uses_flag_names() {
        let config: PointerConfig =
            toml::from_str(r#"layers_to_ignore = "IGNORE_RAYCAST | UI""#).expect("valid config");
        assert_eq!(
            config.layers_to_ignore,
            LayerMask::IGNORE_RAYCAST | LayerMask::UI
        );
    }
}
