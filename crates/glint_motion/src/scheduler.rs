//! Render scheduler
//!
//! Coalesces render requests into at most one outstanding frame-callback
//! subscription, advances every spring on a fixed tick when the callback
//! fires, writes resolved styles back in one batched pass, and re-requests
//! a frame only while something is still moving.
//!
//! Physics advances in whole `STEP_MS` ticks counted from the moment the
//! current animation run started, never by raw elapsed time: a dropped frame
//! steps the springs twice instead of once with a doubled dt, so the curve a
//! user sees is identical regardless of frame-rate jitter.

use glint_core::{FrameSource, FrameToken, MotionHost};
use tracing::{debug, trace};

use crate::registry::MotionRegistry;

/// Fixed physics tick in milliseconds (60fps-equivalent)
pub const STEP_MS: f64 = 17.0;

/// Fixed physics tick in seconds, as fed to the integrator
pub const STEP_SECONDS: f32 = (STEP_MS / 1000.0) as f32;

/// Where the scheduler is in its frame cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Nothing moving, no callback outstanding
    Idle,
    /// One frame callback outstanding with the host
    Requested(FrameToken),
    /// Inside the frame callback, advancing springs
    Stepping,
}

/// Drives the per-frame animation loop.
///
/// The owning context forwards host frame callbacks to
/// [`RenderScheduler::on_frame`]; a callback arriving in any phase other than
/// `Requested` (e.g. after teardown cancelled the subscription) is ignored.
#[derive(Debug)]
pub struct RenderScheduler {
    phase: Phase,
    /// Timestamp the physics has been advanced to, in ms. `None` between
    /// animation runs so a new run starts a fresh baseline.
    animated_until: Option<f64>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            animated_until: None,
        }
    }

    /// Whether nothing is scheduled or stepping
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Ask for a frame, unless one is already on its way
    pub fn request_render(&mut self, host: &mut impl FrameSource) {
        if self.phase != Phase::Idle {
            return;
        }
        let token = host.request_frame();
        trace!(?token, "frame requested");
        self.phase = Phase::Requested(token);
    }

    /// Frame-callback delivery. `timestamp` is the host's monotonic clock in
    /// milliseconds.
    pub fn on_frame(
        &mut self,
        timestamp: f64,
        registry: &mut MotionRegistry,
        host: &mut impl MotionHost,
    ) {
        let Phase::Requested(_) = self.phase else {
            debug!(timestamp, "stale frame callback ignored");
            return;
        };
        self.phase = Phase::Stepping;

        let still_animating = self.advance(timestamp, registry, host);

        if still_animating {
            let token = host.request_frame();
            self.phase = Phase::Requested(token);
        } else {
            self.phase = Phase::Idle;
            self.animated_until = None;
        }
    }

    /// Cancel any outstanding subscription and reset to idle
    pub fn cancel(&mut self, host: &mut impl FrameSource) {
        if let Phase::Requested(token) = self.phase {
            host.cancel_frame(token);
        }
        self.phase = Phase::Idle;
        self.animated_until = None;
    }

    fn advance(
        &mut self,
        timestamp: f64,
        registry: &mut MotionRegistry,
        host: &mut impl MotionHost,
    ) -> bool {
        let base = self.animated_until.unwrap_or(timestamp);
        let steps = (((timestamp - base) / STEP_MS).floor()).max(0.0) as u32;
        self.animated_until = Some(base + steps as f64 * STEP_MS);

        let mut still_animating = false;
        registry.for_each_spring_mut(|spring| {
            for _ in 0..steps {
                spring.step(STEP_SECONDS);
            }
            if spring.at_rest() {
                spring.snap_to_rest();
            } else {
                still_animating = true;
            }
        });

        // One write pass after all springs have moved, so no element renders
        // a half-updated frame.
        registry.for_each(|element, motion| {
            host.write_style(element, &motion.style());
        });

        still_animating
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}
