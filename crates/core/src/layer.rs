//! Collision layers used to exclude colliders from pointer raycasts.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Set of collision layers (32 layers, one bit each).
    ///
    /// The named layers mirror the conventional built-in slots; any other
    /// layer index is addressed with [`LayerMask::layer`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LayerMask: u32 {
        /// Layer 0.
        const DEFAULT = 1 << 0;
        /// Layer 1.
        const TRANSPARENT_FX = 1 << 1;
        /// Layer 2; pointer visuals live here so the beam never hits itself.
        const IGNORE_RAYCAST = 1 << 2;
        /// Layer 4.
        const WATER = 1 << 4;
        /// Layer 5.
        const UI = 1 << 5;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::empty()
    }
}

impl LayerMask {
    /// Number of addressable layers.
    pub const LAYER_COUNT: u8 = 32;

    /// Mask containing the single layer `index`, or `None` if out of range.
    pub fn layer(index: u8) -> Option<Self> {
        if index < Self::LAYER_COUNT {
            Some(Self::from_bits_retain(1 << index))
        } else {
            None
        }
    }
}
