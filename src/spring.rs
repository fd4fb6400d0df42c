//! Discrete-time mass-spring-damper integrator.
//!
//! [`step`] is a pure function over `(value, velocity, target, dt)`; [`Spring`]
//! wraps it with the rest/tracking state used by the progress bar.
//!
//! Integration is semi-implicit Euler, sub-stepped so that a single step never
//! exceeds [`SpringConfig::stable_substep`]: at most [`MAX_SUBSTEP`] seconds,
//! and shorter for stiff or heavily damped springs. With the default parameters
//! (stiffness 100, damping 30, mass 1) the system is over-damped and the
//! discrete update has real positive eigenvalues, so the output approaches the
//! target without oscillating.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest integration step in seconds
pub const MAX_SUBSTEP: f64 = 1.0 / 120.0;

/// Shortest integration step a configuration may require
pub const MIN_SUBSTEP: f64 = 1.0e-5;

/// Spring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Displacement below which the spring may settle
    pub rest_delta: f64,
    /// Speed below which the spring may settle
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::ConfigError(format!(
                    "spring {} must be a positive finite number, got {}",
                    name, v
                )));
            }
        }
        let h = self.stable_substep();
        if h < MIN_SUBSTEP {
            return Err(Error::ConfigError(format!(
                "spring is too stiff or too damped to integrate (stable step {:.2e}s, minimum {:.0e}s)",
                h, MIN_SUBSTEP
            )));
        }
        Ok(())
    }

    /// Largest step the integrator can take and stay stable.
    ///
    /// Keeps `omega * h` and `damping * h / mass` at or below 0.5, where
    /// `omega = sqrt(stiffness / mass)`, and never exceeds [`MAX_SUBSTEP`].
    pub fn stable_substep(&self) -> f64 {
        let omega = (self.stiffness / self.mass).sqrt();
        (0.5 / omega).min(0.5 * self.mass / self.damping).min(MAX_SUBSTEP)
    }

    /// Damping ratio; 1.0 is critical, above is over-damped
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Whether `(value, velocity)` is close enough to `target` to stop
    pub fn is_at_rest(&self, value: f64, velocity: f64, target: f64) -> bool {
        (target - value).abs() < self.rest_delta && velocity.abs() < self.rest_speed
    }
}

/// Advance the spring by `dt` seconds and return `(value, velocity)`.
///
/// Non-positive or non-finite `dt` returns the input unchanged.
pub fn step(value: f64, velocity: f64, target: f64, dt: f64, config: &SpringConfig) -> (f64, f64) {
    if !dt.is_finite() || dt <= 0.0 {
        return (value, velocity);
    }
    let substeps = (dt / config.stable_substep()).ceil().max(1.0) as u32;
    let h = dt / substeps as f64;

    let (mut x, mut v) = (value, velocity);
    for _ in 0..substeps {
        let spring_force = -config.stiffness * (x - target);
        let damping_force = -config.damping * v;
        let accel = (spring_force + damping_force) / config.mass;
        v += accel * h;
        x += v * h;
    }
    (x, v)
}

/// Spring phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringPhase {
    /// Output equals the target; ticks do nothing
    Rest,
    /// Output is moving toward the target
    Tracking,
}

/// Stateful spring following a target value
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    phase: SpringPhase,
}

impl Spring {
    /// A spring resting at `initial`
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            phase: SpringPhase::Rest,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn phase(&self) -> SpringPhase {
        self.phase
    }

    pub fn is_at_rest(&self) -> bool {
        self.phase == SpringPhase::Rest
    }

    /// Set a new target. A target within the rest threshold of a resting
    /// spring is absorbed without animation; anything else re-enters tracking.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if self.phase == SpringPhase::Rest && self.config.is_at_rest(self.value, self.velocity, target) {
            self.value = target;
            return;
        }
        self.phase = SpringPhase::Tracking;
    }

    /// Jump to `value` with no animation
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.phase = SpringPhase::Rest;
    }

    /// Advance by `dt` seconds. Returns true while still tracking.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.phase == SpringPhase::Rest {
            return false;
        }
        let (value, velocity) = step(self.value, self.velocity, self.target, dt, &self.config);
        self.value = value;
        self.velocity = velocity;

        if self.config.is_at_rest(value, velocity, self.target) {
            self.value = self.target;
            self.velocity = 0.0;
            self.phase = SpringPhase::Rest;
            return false;
        }
        true
    }
}
