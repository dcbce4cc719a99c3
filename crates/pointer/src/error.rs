use pointercast_core::ColliderId;
use thiserror::Error;

/// Configuration faults surfaced by a pointer tick.
///
/// A miss is never an error. These variants mean a classified collider has no
/// matching collaborator registered, which the caller must fix before
/// activating the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    /// A `line` collider was struck but no line properties exist for it.
    #[error("line collider {0} has no line properties registered")]
    MissingLineProperties(ColliderId),
    /// A `drone` collider was selected but no drone is registered for it.
    #[error("drone collider {0} has no drone registered")]
    MissingDrone(ColliderId),
}
