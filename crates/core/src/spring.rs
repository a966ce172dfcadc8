//! Second-order spring filter.
//!
//! Each call to [`Spring::step`] treats the target as constant for the frame
//! and advances position and velocity with the closed-form solution of
//!
//! ```text
//! m·x'' + c·x' + k·x = 0      (x = position - target)
//! ```
//!
//! so the trajectory is the same at 30 Hz, 60 Hz, or 144 Hz, and large
//! deltas cannot blow up the way an explicit integrator would.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Below this distance from 1.0 the damping ratio is treated as critical.
const CRITICAL_EPSILON: f64 = 1e-6;

/// Default snap distance, in output units.
pub const DEFAULT_REST_DELTA: f64 = 0.005;
/// Default snap speed, in output units per second.
pub const DEFAULT_REST_SPEED: f64 = 0.01;

/// Spring constants plus rest thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// The spring snaps to its target once closer than this...
    pub rest_delta: f64,
    /// ...and slower than this.
    pub rest_speed: f64,
}

impl SpringConfig {
    /// Builds a config with the default rest thresholds.
    ///
    /// Returns `Error::InvalidSpring` unless `stiffness > 0`, `damping >= 0`,
    /// `mass > 0`, and all three are finite.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self, Error> {
        let valid = stiffness.is_finite()
            && damping.is_finite()
            && mass.is_finite()
            && stiffness > 0.0
            && damping >= 0.0
            && mass > 0.0;
        if !valid {
            return Err(Error::InvalidSpring {
                stiffness,
                damping,
                mass,
            });
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
        })
    }

    /// A config from hand-tuned constants, with the default rest thresholds.
    ///
    /// Not validated; use [`new`](Self::new) for anything user-supplied.
    pub const fn tuned(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
        }
    }

    /// Undamped angular frequency `sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// `c / (2 sqrt(k m))`. At or above 1.0 a step response never overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// One axis of spring-smoothed motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
}

impl Spring {
    /// A spring at rest at `position`.
    pub fn new(config: SpringConfig, position: f64) -> Self {
        Self {
            config,
            position,
            velocity: 0.0,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Puts the spring at rest at `position`.
    pub fn reset(&mut self, position: f64) {
        self.position = position;
        self.velocity = 0.0;
    }

    /// True once the spring has snapped onto `target`.
    pub fn is_at_rest(&self, target: f64) -> bool {
        self.position == target && self.velocity == 0.0
    }

    /// Advances `dt` seconds toward `target` and returns the new position.
    ///
    /// A non-finite target or a non-positive `dt` leaves the state untouched.
    pub fn step(&mut self, target: f64, dt: f64) -> f64 {
        if !target.is_finite() || dt.is_nan() || dt <= 0.0 {
            return self.position;
        }

        let x0 = self.position - target;
        let v0 = self.velocity;
        let (x, v) = self.solve(x0, v0, dt);

        if x.abs() < self.config.rest_delta && v.abs() < self.config.rest_speed {
            self.position = target;
            self.velocity = 0.0;
        } else if x.is_finite() && v.is_finite() {
            self.position = target + x;
            self.velocity = v;
        } else {
            // Only reachable with absurd constants; settle rather than poison.
            self.position = target;
            self.velocity = 0.0;
        }
        self.position
    }

    /// Displacement and velocity after `t` seconds from `(x0, v0)`.
    fn solve(&self, x0: f64, v0: f64, t: f64) -> (f64, f64) {
        let w0 = self.config.natural_frequency();
        let zeta = self.config.damping_ratio();

        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            let decay = (-w0 * t).exp();
            let b = v0 + w0 * x0;
            let x = decay * (x0 + b * t);
            let v = decay * (v0 - w0 * t * b);
            (x, v)
        } else if zeta < 1.0 {
            let a = zeta * w0;
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-a * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = decay * (x0 * cos + (v0 + a * x0) / wd * sin);
            let v = decay * (v0 * cos - (a * v0 + w0 * w0 * x0) / wd * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            let e1 = (r1 * t).exp();
            let e2 = (r2 * t).exp();
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }
}
