//! End-to-end scenarios driving the motion core through a deterministic
//! in-memory host: pointer focus with the highlight chase, keyboard
//! traversal, edge overscroll, and teardown.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glint_core::{
    ElementHost, ElementId, ElementRole, FrameSource, FrameToken, Rect, TransformOrigin,
    VisualStyle,
};
use glint_motion::{Channel, Field, MotionContext, NavDirection, STEP_MS};

#[derive(Default)]
struct HostState {
    rects: HashMap<ElementId, Rect>,
    insets: HashMap<ElementId, f32>,
    styles: HashMap<ElementId, VisualStyle>,
    selected: HashMap<ElementId, bool>,
    origins: HashMap<ElementId, TransformOrigin>,
    write_count: u64,
    next_token: u64,
    total_requests: u64,
    cancelled: Vec<FrameToken>,
}

/// Shared-handle host so the test can inspect state the context owns.
#[derive(Clone, Default)]
struct TestHost(Rc<RefCell<HostState>>);

impl TestHost {
    fn with_rect(self, element: ElementId, rect: Rect) -> Self {
        self.0.borrow_mut().rects.insert(element, rect);
        self
    }

    fn with_inset(self, element: ElementId, inset: f32) -> Self {
        self.0.borrow_mut().insets.insert(element, inset);
        self
    }

    fn style(&self, element: ElementId) -> VisualStyle {
        self.0.borrow().styles[&element]
    }

    fn is_selected(&self, element: ElementId) -> bool {
        self.0
            .borrow()
            .selected
            .get(&element)
            .copied()
            .unwrap_or(false)
    }
}

impl FrameSource for TestHost {
    fn request_frame(&mut self) -> FrameToken {
        let mut state = self.0.borrow_mut();
        state.next_token += 1;
        state.total_requests += 1;
        FrameToken::new(state.next_token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.0.borrow_mut().cancelled.push(token);
    }
}

impl ElementHost for TestHost {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.0.borrow().rects.get(&element).copied()
    }

    fn write_style(&mut self, element: ElementId, style: &VisualStyle) {
        let mut state = self.0.borrow_mut();
        state.styles.insert(element, *style);
        state.write_count += 1;
    }

    fn set_selected(&mut self, element: ElementId, selected: bool) {
        self.0.borrow_mut().selected.insert(element, selected);
    }

    fn set_transform_origin(&mut self, element: ElementId, origin: TransformOrigin) {
        self.0.borrow_mut().origins.insert(element, origin);
    }

    fn computed_inset(&self, element: ElementId) -> f32 {
        self.0
            .borrow()
            .insets
            .get(&element)
            .copied()
            .unwrap_or(0.0)
    }
}

const SURFACE: ElementId = ElementId::new(1);
const HIGHLIGHT: ElementId = ElementId::new(2);
const ITEM1: ElementId = ElementId::new(10);
const ITEM2: ElementId = ElementId::new(11);
const ITEM3: ElementId = ElementId::new(12);

/// Three 100x30 items stacked inside a surface, highlight on top.
fn menu() -> (MotionContext<TestHost>, TestHost) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let host = TestHost::default()
        .with_rect(SURFACE, Rect::new(0.0, 0.0, 120.0, 100.0))
        .with_inset(SURFACE, 8.0)
        .with_rect(HIGHLIGHT, Rect::new(0.0, 0.0, 10.0, 10.0))
        .with_rect(ITEM1, Rect::new(0.0, 10.0, 100.0, 30.0))
        .with_rect(ITEM2, Rect::new(0.0, 40.0, 100.0, 30.0))
        .with_rect(ITEM3, Rect::new(0.0, 70.0, 100.0, 30.0));

    let mut ctx = MotionContext::new(host.clone());
    ctx.register(SURFACE, ElementRole::Surface);
    ctx.register(HIGHLIGHT, ElementRole::Highlight);
    ctx.register(ITEM1, ElementRole::Item);
    ctx.register(ITEM2, ElementRole::Item);
    ctx.register(ITEM3, ElementRole::Item);
    (ctx, host)
}

/// Deliver 17ms frames until the context settles; returns the next timestamp.
fn run_to_rest(ctx: &mut MotionContext<TestHost>, mut t: f64) -> f64 {
    let mut frames = 0;
    while !ctx.is_idle() {
        ctx.on_frame(t);
        t += STEP_MS;
        frames += 1;
        assert!(frames < 1000, "animation never settled");
    }
    t
}

#[test]
fn test_highlight_chases_focused_item() {
    let (mut ctx, host) = menu();

    // Pointer dead on item2's vertical midpoint: no deflection
    ctx.focus(ITEM2, 55.0);
    run_to_rest(&mut ctx, 0.0);

    let highlight = host.style(HIGHLIGHT);
    assert!((highlight.width - 110.0).abs() < 0.01);
    assert!((highlight.height - 33.0).abs() < 0.01);
    // Centered over item2: inset minus half the width growth
    assert!((highlight.transform.x - 3.0).abs() < 0.01);
    // relativeTop of item2 within the surface
    assert!((highlight.transform.y - 40.0).abs() < 0.01);

    let item = host.style(ITEM2);
    assert!((item.transform.scale_x - 1.1).abs() < 0.01);
    assert!((item.transform.scale_y - 1.1).abs() < 0.01);
    assert!(host.is_selected(ITEM2));
}

#[test]
fn test_first_focus_snaps_from_approach_direction() {
    let (mut ctx, _host) = menu();

    // Pointer well above item2's midpoint: negative deflection
    ctx.focus(ITEM2, 41.0);

    let motion = ctx.motion(HIGHLIGHT).unwrap();
    let wiggle = 5.0 * ((41.0f32 - 55.0) / 15.0).tanh();
    // Entry position applied immediately, biased three times as far
    assert!((motion.y.current - (40.0 + wiggle * 3.0)).abs() < 1e-4);
    assert_eq!(motion.y.velocity, 0.0);
    // Steady-state chase target carries the plain deflection
    assert!((motion.y.dest - (40.0 + wiggle)).abs() < 1e-4);
    // Size growth lands synchronously as well
    assert!((motion.w.current - 110.0).abs() < 0.01);
    assert!((motion.h.current - 33.0).abs() < 0.01);
}

#[test]
fn test_moving_focus_retracts_previous_item() {
    let (mut ctx, host) = menu();

    ctx.focus(ITEM1, 25.0);
    run_to_rest(&mut ctx, 0.0);
    assert!(host.is_selected(ITEM1));

    ctx.focus(ITEM3, 85.0);
    run_to_rest(&mut ctx, 10_000.0);

    assert!(!host.is_selected(ITEM1));
    assert!(host.is_selected(ITEM3));

    // Item1 fully retracted to its natural state
    let item1 = host.style(ITEM1);
    assert!((item1.transform.scale_x - 1.0).abs() < 0.01);
    assert!((item1.transform.y - 0.0).abs() < 0.01);

    // Highlight now parked over item3
    let highlight = host.style(HIGHLIGHT);
    assert!((highlight.transform.y - 70.0).abs() < 0.01);
}

#[test]
fn test_keyboard_traversal_wraps() {
    let (mut ctx, _host) = menu();

    // Nothing selected: "next" starts at the head
    ctx.on_key_down(NavDirection::Next);
    assert_eq!(ctx.selected(), Some(ITEM1));

    ctx.on_key_down(NavDirection::Next);
    assert_eq!(ctx.selected(), Some(ITEM2));
    ctx.on_key_down(NavDirection::Next);
    assert_eq!(ctx.selected(), Some(ITEM3));

    // Tail wraps to head
    ctx.on_key_down(NavDirection::Next);
    assert_eq!(ctx.selected(), Some(ITEM1));

    // Head wraps back to tail
    ctx.on_key_down(NavDirection::Previous);
    assert_eq!(ctx.selected(), Some(ITEM3));
}

#[test]
fn test_keyboard_previous_starts_at_tail() {
    let (mut ctx, _host) = menu();
    ctx.on_key_down(NavDirection::Previous);
    assert_eq!(ctx.selected(), Some(ITEM3));
}

#[test]
fn test_focus_on_non_navigable_is_ignored() {
    let (mut ctx, host) = menu();
    ctx.focus(HIGHLIGHT, 5.0);
    assert_eq!(ctx.selected(), None);
    assert_eq!(host.0.borrow().total_requests, 0);

    ctx.focus(ElementId::new(999), 5.0);
    assert_eq!(ctx.selected(), None);
}

#[test]
fn test_immediate_set_needs_no_frame() {
    let (mut ctx, host) = menu();

    ctx.set_immediate(ITEM1, Channel::Opacity, Field::Dest, 0.0);

    let motion = ctx.motion(ITEM1).unwrap();
    assert_eq!(motion.opacity.current, 0.0);
    assert_eq!(motion.opacity.velocity, 0.0);
    assert_eq!(host.0.borrow().total_requests, 0);
}

#[test]
fn test_render_requests_coalesce() {
    let (mut ctx, host) = menu();

    for _ in 0..4 {
        ctx.request_render();
    }
    assert_eq!(host.0.borrow().total_requests, 1);
}

#[test]
fn test_clear_cancels_and_ignores_stale_frames() {
    let (mut ctx, host) = menu();

    ctx.focus(ITEM2, 55.0);
    assert_eq!(host.0.borrow().total_requests, 1);

    ctx.clear();
    assert_eq!(host.0.borrow().cancelled.len(), 1);
    assert!(ctx.is_idle());
    assert_eq!(ctx.selected(), None);
    assert!(ctx.motion(ITEM2).is_none());

    // The already-scheduled callback fires anyway: nothing happens
    let requests_before = host.0.borrow().total_requests;
    ctx.on_frame(17.0);
    assert!(ctx.is_idle());
    assert_eq!(host.0.borrow().write_count, 0);
    assert_eq!(host.0.borrow().total_requests, requests_before);
}

#[test]
fn test_overscroll_stretches_surface_from_far_edge() {
    let (mut ctx, host) = menu();

    ctx.begin_drag();

    // 50px past the bottom edge: halfway to the cap
    assert!(ctx.drag(150.0));
    let motion = ctx.motion(SURFACE).unwrap();
    assert!((motion.scale_y.dest - 1.05).abs() < 1e-6);
    assert_eq!(
        host.0.borrow().origins[&SURFACE],
        TransformOrigin::Top
    );

    // Far past the top edge: saturates at the cap, anchored to the bottom
    assert!(ctx.drag(-400.0));
    let motion = ctx.motion(SURFACE).unwrap();
    assert!((motion.scale_y.dest - 1.1).abs() < 1e-6);
    assert_eq!(
        host.0.borrow().origins[&SURFACE],
        TransformOrigin::Bottom
    );

    // Inside the frozen rect: not consumed, caller hit-tests instead
    assert!(!ctx.drag(50.0));

    ctx.end_drag();
    run_to_rest(&mut ctx, 0.0);
    let surface = host.style(SURFACE);
    assert!((surface.transform.scale_y - 1.0).abs() < 0.01);
}
