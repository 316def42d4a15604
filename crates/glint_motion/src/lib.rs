//! Glint Motion Core
//!
//! Spring-driven motion for menu/popover widgets: a floating highlight that
//! chases pointer and keyboard focus, with per-item scale/position/opacity
//! transitions.
//!
//! # Features
//!
//! - **Spring Physics**: semi-implicit Euler integration, fixed tick,
//!   velocity carries across retargets
//! - **Motion Registry**: one seven-channel spring bundle per tracked
//!   element, navigable elements threaded into a wrap-around chain
//! - **Render Scheduler**: coalesced frame-callback subscriptions, batched
//!   style writes, stops at rest
//! - **Focus Controller**: highlight chase with bounded pointer deflection,
//!   keyboard traversal, edge-overscroll stretch
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{ElementId, ElementRole};
//! use glint_motion::MotionContext;
//!
//! let mut ctx = MotionContext::new(host);
//! ctx.register(surface, ElementRole::Surface);
//! ctx.register(highlight, ElementRole::Highlight);
//! ctx.register(item, ElementRole::Item);
//!
//! // Pointer moved over `item`:
//! ctx.focus(item, pointer_y);
//!
//! // Host delivers the requested frame:
//! ctx.on_frame(timestamp);
//! ```

pub mod channels;
pub mod context;
pub mod controller;
pub mod registry;
pub mod scheduler;
pub mod spring;

pub use channels::{Channel, Field, MotionConfig, MotionOverrides};
pub use context::MotionContext;
pub use controller::{FocusController, NavDirection};
pub use registry::MotionRegistry;
pub use scheduler::{RenderScheduler, STEP_MS, STEP_SECONDS};
pub use spring::{Spring, SpringTuning, REST_DELTA, REST_VELOCITY};
