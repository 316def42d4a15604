//! Element handles and resolved visual state
//!
//! The motion core never touches the host's widget objects directly. Each
//! animated element is addressed through an opaque [`ElementId`] minted by the
//! host, and its resolved per-frame appearance travels back to the host as a
//! [`VisualStyle`].

/// Opaque handle to a host-owned visual element.
///
/// The host assigns the raw value; the motion core only compares and hashes
/// it. Handles stay valid until the owning widget unmounts and the motion
/// context is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What an element is, decided once at registration.
///
/// The role replaces per-event attribute sniffing: the chain membership and
/// the controller's special handles are all derived from it up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementRole {
    /// Selectable menu entry, part of the keyboard navigation chain
    Item,
    /// The floating indicator that chases the selected item
    Highlight,
    /// The content container the items live in
    Surface,
    /// Tracked for animation only (e.g. a disabled entry)
    Decoration,
}

impl ElementRole {
    /// Whether elements of this role join the navigation chain
    pub fn is_navigable(self) -> bool {
        matches!(self, ElementRole::Item)
    }
}

/// Translate + scale applied to an element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Resolved appearance of one element for one frame.
///
/// Written back to the host in a single batched pass per frame so an element
/// never renders a half-updated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualStyle {
    pub opacity: f32,
    pub width: f32,
    pub height: f32,
    pub transform: Transform,
}

/// Anchor edge for scale transforms.
///
/// The overscroll stretch pins the container to the edge opposite the
/// pointer, so the surface appears to stretch toward the drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformOrigin {
    #[default]
    Center,
    Top,
    Bottom,
}
