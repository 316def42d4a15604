//! Glint Core Vocabulary
//!
//! This crate provides the foundational types shared between the Glint motion
//! core and its host adapters:
//!
//! - **Geometry**: `Point`, `Size`, `Rect`
//! - **Element Handles**: opaque ids, registration roles, resolved styles
//! - **Host Abstraction**: frame-callback and element-access traits
//! - **Errors**: the motion error taxonomy
//!
//! # Architecture
//!
//! The host abstraction is built around two traits:
//!
//! - [`FrameSource`] - requests and cancels per-frame callbacks
//! - [`ElementHost`] - element geometry reads and style writes
//!
//! [`MotionHost`] combines the two and is blanket-implemented, so any type
//! providing both is usable as a host.

mod element;
mod error;
mod geometry;
mod host;

pub use element::{ElementId, ElementRole, Transform, TransformOrigin, VisualStyle};
pub use error::{MotionError, Result};
pub use geometry::{Point, Rect, Size};
pub use host::{ElementHost, FrameSource, FrameToken, MotionHost};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::element::{ElementId, ElementRole, Transform, TransformOrigin, VisualStyle};
    pub use crate::error::{MotionError, Result};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::host::{ElementHost, FrameSource, FrameToken, MotionHost};
}
