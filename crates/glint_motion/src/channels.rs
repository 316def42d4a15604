//! Animatable channels
//!
//! Every tracked element carries exactly seven spring channels. The set is
//! closed: translation, size, scale, and opacity are all the motion this
//! widget family performs, so channels and fields are enums rather than
//! string keys — a bad channel name cannot reach the registry.

use glint_core::{Size, Transform, VisualStyle};
use smallvec::SmallVec;

use crate::spring::{Spring, SpringTuning};

/// The seven animatable scalar properties of a tracked element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Width,
    Height,
    Opacity,
    ScaleX,
    ScaleY,
}

impl Channel {
    /// All channels, in style-write order
    pub const ALL: [Channel; 7] = [
        Channel::X,
        Channel::Y,
        Channel::Width,
        Channel::Height,
        Channel::Opacity,
        Channel::ScaleX,
        Channel::ScaleY,
    ];
}

/// The mutable fields of a spring channel.
///
/// `initial` is absent on purpose: it is fixed at registration and only read
/// back (for relative targets and retraction).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Current,
    Dest,
    Velocity,
    Stiffness,
    Damping,
}

/// Sparse per-channel tuning overrides supplied at registration.
///
/// Channels without an entry use the default tuning for the element's
/// lifetime.
#[derive(Clone, Debug, Default)]
pub struct MotionOverrides {
    entries: SmallVec<[(Channel, SpringTuning); 7]>,
}

impl MotionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one channel's tuning (last write wins)
    pub fn with(mut self, channel: Channel, tuning: SpringTuning) -> Self {
        self.entries.retain(|(c, _)| *c != channel);
        self.entries.push((channel, tuning));
        self
    }

    /// Tuning for a channel, falling back to the default
    pub fn tuning(&self, channel: Channel) -> SpringTuning {
        self.entries
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }
}

/// The full spring bundle for one tracked element — all seven channels always
/// exist.
#[derive(Clone, Debug)]
pub struct MotionConfig {
    pub x: Spring,
    pub y: Spring,
    pub w: Spring,
    pub h: Spring,
    pub opacity: Spring,
    pub scale_x: Spring,
    pub scale_y: Spring,
}

impl MotionConfig {
    /// Build a config at natural rest: no translation, measured size, fully
    /// opaque, unscaled.
    pub fn at_rest(natural_size: Size, overrides: &MotionOverrides) -> Self {
        Self {
            x: Spring::at_value(0.0, overrides.tuning(Channel::X)),
            y: Spring::at_value(0.0, overrides.tuning(Channel::Y)),
            w: Spring::at_value(natural_size.width, overrides.tuning(Channel::Width)),
            h: Spring::at_value(natural_size.height, overrides.tuning(Channel::Height)),
            opacity: Spring::at_value(1.0, overrides.tuning(Channel::Opacity)),
            scale_x: Spring::at_value(1.0, overrides.tuning(Channel::ScaleX)),
            scale_y: Spring::at_value(1.0, overrides.tuning(Channel::ScaleY)),
        }
    }

    pub fn channel(&self, channel: Channel) -> &Spring {
        match channel {
            Channel::X => &self.x,
            Channel::Y => &self.y,
            Channel::Width => &self.w,
            Channel::Height => &self.h,
            Channel::Opacity => &self.opacity,
            Channel::ScaleX => &self.scale_x,
            Channel::ScaleY => &self.scale_y,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Spring {
        match channel {
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::Width => &mut self.w,
            Channel::Height => &mut self.h,
            Channel::Opacity => &mut self.opacity,
            Channel::ScaleX => &mut self.scale_x,
            Channel::ScaleY => &mut self.scale_y,
        }
    }

    /// Visit every spring mutably
    pub fn for_each_spring_mut(&mut self, mut f: impl FnMut(&mut Spring)) {
        for channel in Channel::ALL {
            f(self.channel_mut(channel));
        }
    }

    /// Animate every channel back to its registration-time value
    pub fn retract(&mut self) {
        for channel in Channel::ALL {
            let spring = self.channel_mut(channel);
            spring.dest = spring.initial;
        }
    }

    /// Resolved appearance from the current spring values
    pub fn style(&self) -> VisualStyle {
        VisualStyle {
            opacity: self.opacity.current,
            width: self.w.current,
            height: self.h.current,
            transform: Transform {
                x: self.x.current,
                y: self.y.current,
                scale_x: self.scale_x.current,
                scale_y: self.scale_y.current,
            },
        }
    }
}

/// Write one field of one spring, optionally snapping the channel to rest at
/// its (possibly new) destination.
pub(crate) fn apply(spring: &mut Spring, field: Field, value: f32, immediate: bool) {
    match field {
        Field::Current => spring.current = value,
        Field::Dest => spring.dest = value,
        Field::Velocity => spring.velocity = value,
        Field::Stiffness => spring.stiffness = value,
        Field::Damping => spring.damping = value,
    }
    if immediate {
        spring.snap_to_rest();
    }
}
