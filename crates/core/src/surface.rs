//! Closed classification of pointer targets.
//!
//! A collider's class is decided once when it is registered with the physics
//! provider. Selection logic matches on the enum instead of comparing tag
//! strings on every tick.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown [`SurfaceClass`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown surface class `{0}`")]
pub struct SurfaceClassError(String);

/// Semantic class of a struck surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceClass {
    /// No special selection outcome.
    #[default]
    Untagged,
    /// Walkable terrain; waypoints are placed on it.
    Ground,
    /// Segment of a flight path owned by a waypoint.
    Line,
    /// A selectable drone.
    Drone,
}

impl SurfaceClass {
    /// Parse an authoring tag.
    ///
    /// Matching is case-insensitive and accepts the long form `Line Collider`.
    pub fn parse(input: &str) -> Result<Self, SurfaceClassError> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "untagged" => Ok(Self::Untagged),
            "ground" => Ok(Self::Ground),
            "line" | "line collider" | "line_collider" => Ok(Self::Line),
            "drone" => Ok(Self::Drone),
            _ => Err(SurfaceClassError(input.to_string())),
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Untagged => "untagged",
            Self::Ground => "ground",
            Self::Line => "line",
            Self::Drone => "drone",
        }
    }
}

impl fmt::Display for SurfaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceClass {
    type Err = SurfaceClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
