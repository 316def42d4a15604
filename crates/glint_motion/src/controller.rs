//! Focus controller
//!
//! Translates pointer position and keyboard direction into spring
//! destinations: which item holds the selection, where the floating highlight
//! should chase to, and how the container stretches when a drag runs past its
//! edge.

use glint_core::{ElementId, ElementRole, MotionError, MotionHost, Rect, Result, TransformOrigin};
use tracing::{debug, warn};

use crate::channels::{Channel, Field};
use crate::registry::MotionRegistry;
use crate::scheduler::RenderScheduler;

/// Peak pointer deflection, in pixels
const WIGGLE_GAIN: f32 = 5.0;

/// The chased item follows at 90% of the highlight's deflection
const ITEM_FOLLOW_RATIO: f32 = 0.9;

/// First selection enters from the pointer's approach direction
const FIRST_FOCUS_BIAS: f32 = 3.0;

/// Highlight grows to 110% of the selected item's natural size; the item
/// itself scales by the same factor
const GROWTH: f32 = 1.1;

/// Overscroll saturates past this many pixels beyond the edge
const MAX_OVERSCROLL_DISTANCE: f32 = 100.0;

/// Container stretch at full overscroll
const MAX_OVERSCROLL_SCALE: f32 = 1.1;

/// Keyboard navigation direction, as decided by the widget layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Next,
    Previous,
}

/// Bounded, saturating vertical deflection of the highlight toward the
/// pointer: the offset from the item's midpoint, normalized by half its
/// height, squashed through tanh.
fn deflection(pointer_y: f32, item: &Rect) -> f32 {
    let distance_from_middle = pointer_y - item.mid_y();
    let normalized = distance_from_middle / (item.height() / 2.0);
    WIGGLE_GAIN * normalized.tanh()
}

/// Linear edge-distance to container-stretch mapping, saturating at
/// [`MAX_OVERSCROLL_SCALE`]
fn overscroll_scale(distance: f32) -> f32 {
    1.0 + (MAX_OVERSCROLL_SCALE - 1.0)
        * (distance.min(MAX_OVERSCROLL_DISTANCE) / MAX_OVERSCROLL_DISTANCE)
}

/// Owns the logical selection and the highlight/surface handles.
#[derive(Debug, Default)]
pub struct FocusController {
    selected: Option<ElementId>,
    highlight: Option<ElementId>,
    surface: Option<ElementId>,
    /// Leading padding of the surface, read once at first focus
    surface_inset: f32,
    /// Surface geometry frozen at drag start; scaling distorts the live rect
    drag_rect: Option<Rect>,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected element, if any
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Remember the special handles as they register
    pub fn attach(&mut self, element: ElementId, role: ElementRole) {
        match role {
            ElementRole::Highlight => self.highlight = Some(element),
            ElementRole::Surface => self.surface = Some(element),
            ElementRole::Item | ElementRole::Decoration => {}
        }
    }

    /// Move selection (and the highlight chase targets) to `target`.
    ///
    /// Untracked or non-navigable targets are dropped with a log line; input
    /// events race with teardown, so this must never escalate.
    pub fn focus(
        &mut self,
        registry: &mut MotionRegistry,
        scheduler: &mut RenderScheduler,
        host: &mut impl MotionHost,
        target: ElementId,
        pointer_y: f32,
    ) {
        if let Err(err) = self.try_focus(registry, scheduler, host, target, pointer_y) {
            warn!(%err, "focus dropped");
        }
    }

    fn try_focus(
        &mut self,
        registry: &mut MotionRegistry,
        scheduler: &mut RenderScheduler,
        host: &mut impl MotionHost,
        target: ElementId,
        pointer_y: f32,
    ) -> Result<()> {
        match registry.role(target) {
            None => return Err(MotionError::Untracked(target)),
            Some(role) if !role.is_navigable() => return Err(MotionError::NotNavigable(target)),
            Some(_) => {}
        }

        let surface = self.surface.ok_or(MotionError::NoSurface)?;
        let surface_rect = host
            .bounding_rect(surface)
            .ok_or(MotionError::NoGeometry(surface))?;
        let target_rect = host
            .bounding_rect(target)
            .ok_or(MotionError::NoGeometry(target))?;

        let wiggle = deflection(pointer_y, &target_rect);
        let item_translate_y = wiggle * ITEM_FOLLOW_RATIO;
        let relative_top = target_rect.top() - surface_rect.top();

        if self.selected != Some(target) {
            if let Some(previous) = self.selected {
                registry.reset_to_initial(previous);
                host.set_selected(previous, false);
            }

            // First selection of the session: the highlight has no sensible
            // origin to glide from, so it enters snapped near the pointer's
            // approach direction.
            if self.selected.is_none() {
                if let Some(highlight) = self.highlight {
                    self.surface_inset = host.computed_inset(surface);
                    registry.set_immediate(
                        highlight,
                        Channel::Y,
                        Field::Dest,
                        relative_top + wiggle * FIRST_FOCUS_BIAS,
                    );
                }
            }

            host.set_selected(target, true);
            self.selected = Some(target);
            debug!(?target, "selection moved");

            // Natural (unscaled) size comes from the registry, not the live
            // rect: the item may still carry scale from a previous pass.
            let (natural_w, natural_h) = registry
                .motion(target)
                .map(|motion| (motion.w.initial, motion.h.initial))
                .unwrap_or_default();
            let half_growth = (GROWTH - 1.0) * natural_w / 2.0;

            if let Some(highlight) = self.highlight {
                registry.set_immediate(highlight, Channel::Width, Field::Dest, natural_w * GROWTH);
                registry.set_immediate(highlight, Channel::Height, Field::Dest, natural_h * GROWTH);
                registry.set_immediate(
                    highlight,
                    Channel::X,
                    Field::Dest,
                    self.surface_inset - half_growth,
                );
            }

            registry.set(target, Channel::ScaleY, Field::Dest, GROWTH);
            registry.set(target, Channel::ScaleX, Field::Dest, GROWTH);
        }

        if let Some(highlight) = self.highlight {
            registry.set(highlight, Channel::Y, Field::Dest, relative_top + wiggle);
        }
        registry.set(target, Channel::Y, Field::Dest, item_translate_y);

        scheduler.request_render(host);
        Ok(())
    }

    /// Keyboard traversal: with no selection, "next" starts at the chain head
    /// and "previous" at the tail; otherwise step the chain with wraparound.
    pub fn on_key_down(
        &mut self,
        registry: &mut MotionRegistry,
        scheduler: &mut RenderScheduler,
        host: &mut impl MotionHost,
        direction: NavDirection,
    ) {
        let target = match (direction, self.selected) {
            (NavDirection::Next, None) => registry.first(),
            (NavDirection::Next, Some(selected)) => registry.next(selected),
            (NavDirection::Previous, None) => registry.last(),
            (NavDirection::Previous, Some(selected)) => registry.previous(selected),
        };

        if let Some(target) = target {
            self.focus(registry, scheduler, host, target, 0.0);
        }
    }

    /// Freeze the surface geometry for the duration of a pointer drag.
    pub fn begin_drag(&mut self, host: &impl MotionHost) {
        if let Some(surface) = self.surface {
            self.drag_rect = host.bounding_rect(surface);
        }
    }

    /// Continuous-drag handling past the container edges.
    ///
    /// Returns `true` when the overscroll path consumed the position (the
    /// pointer is beyond the frozen surface rect); `false` means the pointer
    /// is inside and the caller should hit-test and re-focus instead.
    pub fn drag(
        &mut self,
        registry: &mut MotionRegistry,
        scheduler: &mut RenderScheduler,
        host: &mut impl MotionHost,
        pointer_y: f32,
    ) -> bool {
        let (Some(surface), Some(rect)) = (self.surface, self.drag_rect) else {
            return false;
        };

        let distance = if pointer_y < rect.top() {
            host.set_transform_origin(surface, TransformOrigin::Bottom);
            rect.top() - pointer_y
        } else if pointer_y > rect.bottom() {
            host.set_transform_origin(surface, TransformOrigin::Top);
            pointer_y - rect.bottom()
        } else {
            return false;
        };

        registry.set(
            surface,
            Channel::ScaleY,
            Field::Dest,
            overscroll_scale(distance),
        );
        scheduler.request_render(host);
        true
    }

    /// Drag released: relax the container back to its natural height.
    pub fn end_drag(
        &mut self,
        registry: &mut MotionRegistry,
        scheduler: &mut RenderScheduler,
        host: &mut impl MotionHost,
    ) {
        self.drag_rect = None;
        if let Some(surface) = self.surface {
            registry.set(surface, Channel::ScaleY, Field::Dest, 1.0);
            scheduler.request_render(host);
        }
    }

    /// Forget everything; the owning widget is closing.
    pub fn reset(&mut self) {
        self.selected = None;
        self.highlight = None;
        self.surface = None;
        self.surface_inset = 0.0;
        self.drag_rect = None;
    }
}
