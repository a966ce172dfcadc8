//! The `Animator` trait every frame-driven field implements.
//!
//! The trait is object-safe so hosts (CLI, browser bindings) can hold a
//! `Box<dyn Animator>` without knowing the concrete field type.

use crate::error::Error;
use crate::pointer::Bounds;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the renderer should draw one particle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Index of the layer the particle belongs to.
    pub layer: usize,
    pub id: u32,
    /// Static anchor as percentages of the container.
    pub left_percent: f64,
    pub top_percent: f64,
    /// Pixel translation applied on top of the anchor.
    pub offset: DVec2,
    pub size: f64,
}

/// A pointer-reactive animation advanced once per display frame.
pub trait Animator {
    /// Feeds a pointer-move event in client coordinates.
    ///
    /// Returns `false` when the event was skipped because `bounds` has no
    /// usable size. Never fails.
    fn pointer_move(&mut self, client: DVec2, bounds: &Bounds) -> bool;

    /// Advances all motion by `dt` seconds.
    ///
    /// Returns `Error::InvalidTimeStep` for a negative or non-finite `dt`,
    /// leaving state untouched.
    fn step(&mut self, dt: f64) -> Result<(), Error>;

    /// The shared, spring-smoothed pointer signal.
    fn signal(&self) -> DVec2;

    /// Current placement of every particle, layer by layer.
    fn placements(&self) -> Vec<Placement>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema of the accepted parameters with types, defaults, and descriptions.
    fn param_schema(&self) -> Value;

    /// Returns to the freshly mounted state.
    fn reset(&mut self);
}
