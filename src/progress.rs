//! Scroll progress indicator driver.
//!
//! Maps the raw document scroll fraction onto a spring-smoothed scale factor
//! for the fixed progress bar at the top of the page.

use crate::spring::{Spring, SpringConfig, SpringPhase};
use log::warn;

/// Clamp a raw scroll fraction into `[0, 1]`. Non-finite input reads as 0,
/// which is what a page without scrollable overflow reports.
pub fn sanitize_fraction(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Smoothed scroll progress
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    raw: f64,
    spring: Spring,
}

impl ProgressIndicator {
    /// Start at `initial` (the only point where the output may jump)
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        let initial = sanitize_fraction(initial);
        Self {
            raw: initial,
            spring: Spring::new(initial, config),
        }
    }

    /// Feed a new raw scroll fraction
    pub fn set_raw(&mut self, raw: f64) {
        if !raw.is_finite() {
            warn!("ignoring non-finite scroll fraction {}; treating as 0", raw);
        }
        self.raw = sanitize_fraction(raw);
        self.spring.set_target(self.raw);
    }

    /// Advance the smoothing by one animation frame of `dt` seconds and
    /// return the smoothed value
    pub fn tick(&mut self, dt: f64) -> f64 {
        self.spring.tick(dt);
        self.spring.value()
    }

    /// Latest raw fraction
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Smoothed fraction; may overshoot `[0, 1]` very slightly while moving
    pub fn value(&self) -> f64 {
        self.spring.value()
    }

    /// Horizontal scale for the progress bar
    pub fn scale_x(&self) -> f64 {
        sanitize_fraction(self.spring.value())
    }

    pub fn phase(&self) -> SpringPhase {
        self.spring.phase()
    }

    pub fn is_settled(&self) -> bool {
        self.spring.is_at_rest()
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new(0.0, SpringConfig::default())
    }
}
