//! Host abstraction for the motion core
//!
//! The motion core is platform-agnostic: everything it needs from the
//! environment is expressed through two traits. [`FrameSource`] is the
//! display-refresh primitive (one callback per visual frame, on request);
//! [`ElementHost`] reads element geometry and writes resolved styles back.
//!
//! Hosts deliver a requested frame by calling the motion context's
//! `on_frame(timestamp)` with a monotonically increasing millisecond
//! timestamp. A token returned by [`FrameSource::request_frame`] identifies
//! the outstanding subscription so teardown can cancel it.

use crate::element::{ElementId, TransformOrigin, VisualStyle};
use crate::geometry::Rect;

/// Identifies one outstanding frame-callback subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Display-refresh primitive.
///
/// At most one subscription is outstanding at a time; the scheduler coalesces
/// repeated render requests before they reach the host.
pub trait FrameSource {
    /// Ask the host to deliver one frame callback.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel an outstanding subscription. Must be safe to call with a token
    /// that has already fired.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Element geometry and style access.
pub trait ElementHost {
    /// Live bounding geometry of an element, relative to the host viewport.
    /// Returns `None` for handles the host no longer knows about.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Write one element's resolved appearance for the current frame.
    fn write_style(&mut self, element: ElementId, style: &VisualStyle);

    /// Mirror the logical selection onto whatever indicator the host exposes
    /// (e.g. an `aria-selected` attribute).
    fn set_selected(&mut self, element: ElementId, selected: bool);

    /// Anchor edge for the element's scale transform.
    fn set_transform_origin(&mut self, element: ElementId, origin: TransformOrigin);

    /// Computed horizontal inset of a container element (its leading
    /// padding). Hosts without the concept can keep the default.
    fn computed_inset(&self, element: ElementId) -> f32 {
        let _ = element;
        0.0
    }
}

/// Everything the motion core needs from the environment.
pub trait MotionHost: ElementHost + FrameSource {}

impl<T: ElementHost + FrameSource> MotionHost for T {}
