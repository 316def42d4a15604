//! Motion context
//!
//! The single object a widget constructs at mount and drops (or clears) at
//! unmount. Owns the host adapter, the registry, the scheduler, and the focus
//! controller; everything the surrounding widget components call goes through
//! here. No globals, no singletons — two open menus are two contexts.

use glint_core::{ElementId, ElementRole, MotionHost};
use tracing::debug;

use crate::channels::{Channel, Field, MotionConfig, MotionOverrides};
use crate::controller::{FocusController, NavDirection};
use crate::registry::MotionRegistry;
use crate::scheduler::RenderScheduler;

/// Everything needed to animate one menu instance.
pub struct MotionContext<H: MotionHost> {
    host: H,
    registry: MotionRegistry,
    scheduler: RenderScheduler,
    controller: FocusController,
}

impl<H: MotionHost> MotionContext<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: MotionRegistry::new(),
            scheduler: RenderScheduler::new(),
            controller: FocusController::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Start tracking an element with default spring tuning.
    pub fn register(&mut self, element: ElementId, role: ElementRole) {
        self.register_with(element, role, &MotionOverrides::default());
    }

    /// Start tracking an element, overriding tuning on selected channels.
    ///
    /// Captures the element's live geometry as its natural rest state. No-op
    /// if the element is already tracked or the host has no geometry for it.
    pub fn register_with(
        &mut self,
        element: ElementId,
        role: ElementRole,
        overrides: &MotionOverrides,
    ) {
        let Some(bounds) = self.host.bounding_rect(element) else {
            debug!(?element, "no geometry, not tracking");
            return;
        };
        self.registry.register(element, role, bounds, overrides);
        self.controller.attach(element, role);
    }

    /// Spring bundle of a tracked element
    pub fn motion(&self, element: ElementId) -> Option<&MotionConfig> {
        self.registry.motion(element)
    }

    /// Currently selected element, if any
    pub fn selected(&self) -> Option<ElementId> {
        self.controller.selected()
    }

    /// Whether the frame loop is fully at rest
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Write one field of one channel; takes effect on the next frame.
    pub fn set(&mut self, element: ElementId, channel: Channel, field: Field, value: f32) {
        self.registry.set(element, channel, field, value);
    }

    /// Like [`set`](Self::set), but snaps the channel to rest at its
    /// destination synchronously.
    pub fn set_immediate(&mut self, element: ElementId, channel: Channel, field: Field, value: f32) {
        self.registry.set_immediate(element, channel, field, value);
    }

    /// Animate every channel of the element back to its registration-time
    /// values
    pub fn reset_to_initial(&mut self, element: ElementId) {
        self.registry.reset_to_initial(element);
    }

    /// Successor in the navigation chain, wrapping at the tail
    pub fn next(&self, element: ElementId) -> Option<ElementId> {
        self.registry.next(element)
    }

    /// Predecessor in the navigation chain, wrapping at the head
    pub fn previous(&self, element: ElementId) -> Option<ElementId> {
        self.registry.previous(element)
    }

    /// Ask for an animation pass; coalesced while one is already pending.
    pub fn request_render(&mut self) {
        self.scheduler.request_render(&mut self.host);
    }

    /// Frame-callback delivery point. The host calls this with its monotonic
    /// millisecond timestamp for every subscription it granted.
    pub fn on_frame(&mut self, timestamp: f64) {
        self.scheduler
            .on_frame(timestamp, &mut self.registry, &mut self.host);
    }

    /// Move selection and the highlight chase to `target`.
    pub fn focus(&mut self, target: ElementId, pointer_y: f32) {
        self.controller.focus(
            &mut self.registry,
            &mut self.scheduler,
            &mut self.host,
            target,
            pointer_y,
        );
    }

    /// Keyboard traversal; other keys never reach the motion core.
    pub fn on_key_down(&mut self, direction: NavDirection) {
        self.controller.on_key_down(
            &mut self.registry,
            &mut self.scheduler,
            &mut self.host,
            direction,
        );
    }

    /// Freeze surface geometry at pointer-down.
    pub fn begin_drag(&mut self) {
        self.controller.begin_drag(&self.host);
    }

    /// Drag update. Returns `true` if consumed by the edge-overscroll path;
    /// `false` means the pointer is inside the surface and the caller should
    /// hit-test and call [`focus`](Self::focus).
    pub fn drag(&mut self, pointer_y: f32) -> bool {
        self.controller.drag(
            &mut self.registry,
            &mut self.scheduler,
            &mut self.host,
            pointer_y,
        )
    }

    /// Drag released: the surface relaxes back to its natural height.
    pub fn end_drag(&mut self) {
        self.controller.end_drag(
            &mut self.registry,
            &mut self.scheduler,
            &mut self.host,
        );
    }

    /// Tear down: cancel any pending frame callback, drop every node, forget
    /// the selection. A stale frame callback arriving afterwards is ignored.
    pub fn clear(&mut self) {
        self.scheduler.cancel(&mut self.host);
        self.registry.clear();
        self.controller.reset();
        debug!("motion context cleared");
    }
}
