//! Spring physics
//!
//! Semi-implicit Euler integration of a unit-mass damped harmonic oscillator.
//! Each spring relaxes its `current` value toward `dest`; interrupting an
//! animation is just writing a new `dest`, velocity carries over.

/// Velocity below which a spring counts as stopped
pub const REST_VELOCITY: f32 = 0.01;

/// Remaining displacement below which a spring counts as arrived
pub const REST_DELTA: f32 = 0.01;

const DEFAULT_STIFFNESS: f32 = 150.0;
const DEFAULT_DAMPING: f32 = 15.0;

/// Stiffness/damping pair for a spring.
///
/// Higher stiffness snaps harder toward the target, higher damping bleeds off
/// oscillation. Mass is fixed at 1; tune k and b instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTuning {
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringTuning {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }

    /// A tighter spring with little visible overshoot (good for small hops)
    pub fn snappy() -> Self {
        Self::new(300.0, 28.0)
    }

    /// A loose spring with a pronounced wobble
    pub fn soft() -> Self {
        Self::new(120.0, 10.0)
    }

    /// Calculate critical damping for this stiffness (unit mass)
    pub fn critical_damping(&self) -> f32 {
        2.0 * self.stiffness.sqrt()
    }

    /// Check if the spring will oscillate before settling
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringTuning {
    fn default() -> Self {
        Self::new(DEFAULT_STIFFNESS, DEFAULT_DAMPING)
    }
}

/// One animatable scalar channel.
///
/// `initial` is captured once when the owning element is registered and never
/// rewritten; retracting an element animates `dest` back to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub initial: f32,
    pub current: f32,
    pub dest: f32,
    pub velocity: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring {
    /// Create a spring at rest at `value`
    pub fn at_value(value: f32, tuning: SpringTuning) -> Self {
        Self {
            initial: value,
            current: value,
            dest: value,
            velocity: 0.0,
            stiffness: tuning.stiffness,
            damping: tuning.damping,
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Velocity integrates before position (semi-implicit Euler), which keeps
    /// the oscillator stable at the fixed tick used by the scheduler.
    pub fn step(&mut self, dt: f32) {
        let spring_force = -self.stiffness * (self.current - self.dest);
        let damping_force = -self.damping * self.velocity;
        let acceleration = spring_force + damping_force;
        self.velocity += acceleration * dt;
        self.current += self.velocity * dt;
    }

    /// Whether both velocity and remaining displacement are inside the rest
    /// thresholds
    pub fn at_rest(&self) -> bool {
        self.velocity.abs() < REST_VELOCITY && (self.dest - self.current).abs() < REST_DELTA
    }

    /// Finish the animation: land exactly on `dest` with zero velocity
    pub fn snap_to_rest(&mut self) {
        self.current = self.dest;
        self.velocity = 0.0;
    }
}
