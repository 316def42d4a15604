//! Motion error types

use crate::element::ElementId;
use thiserror::Error;

/// Failures inside the motion core.
///
/// None of these escape the public context surface: input events may race
/// with teardown, so every operation on a stale handle degrades to a logged
/// no-op instead of propagating. The enum exists so internal paths can state
/// precisely what went wrong before the boundary swallows it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// Operation on a handle the registry has never seen (or was cleared)
    #[error("element {0:?} is not tracked by the motion registry")]
    Untracked(ElementId),

    /// Focus/navigation on a tracked element outside the navigation chain
    #[error("element {0:?} is not part of the navigation chain")]
    NotNavigable(ElementId),

    /// The host reported no geometry for the handle
    #[error("host returned no geometry for element {0:?}")]
    NoGeometry(ElementId),

    /// A controller operation needs a registered surface element
    #[error("no surface element has been registered")]
    NoSurface,
}

/// Result type for motion operations
pub type Result<T> = std::result::Result<T, MotionError>;
