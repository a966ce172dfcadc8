//! Depth- and seed-derived presentation hints for the renderer.
//!
//! Nothing here feeds back into motion; a renderer may ignore any of it.

use crate::particle::Particle;
use serde::{Deserialize, Serialize};

/// Static per-particle styling, fixed for the life of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub scale: f64,
    /// Degrees, in `[-6, 6)`.
    pub rotate_x: f64,
    /// Degrees, in `[-8, 8)`.
    pub rotate_y: f64,
    /// Pixels; far particles are softer, near ones sharp.
    pub blur: f64,
    /// Drop-shadow radius in pixels.
    pub glow: f64,
}

impl Appearance {
    pub fn of(particle: &Particle) -> Self {
        let Particle { depth, seed, .. } = *particle;
        Self {
            scale: 0.7 + (depth - 0.7) * 0.6,
            rotate_x: -6.0 + seed * 12.0,
            rotate_y: -8.0 + seed * 16.0,
            blur: ((1.6 - depth) * 3.0).max(0.0),
            glow: 4.0 + seed * 6.0,
        }
    }
}
