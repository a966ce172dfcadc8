//! Error types for the heartfield core.

use thiserror::Error;

/// Errors produced by heartfield operations.
///
/// Pointer updates against unusable geometry are deliberately *not* errors:
/// they are skipped so a field that has not been laid out yet simply stays
/// still. The variants here cover construction and host-driven calls.
#[derive(Debug, Error)]
pub enum Error {
    /// A container box had a zero, negative, or non-finite extent.
    #[error("invalid geometry: container is {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },

    /// A frame delta was negative or non-finite.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// Spring constants outside their physical domain.
    #[error("invalid spring: stiffness={stiffness}, damping={damping}, mass={mass}")]
    InvalidSpring {
        stiffness: f64,
        damping: f64,
        mass: f64,
    },

    /// A scene description failed validation.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// No preset is registered under this name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// The passphrase did not match.
    #[error("login rejected")]
    Rejected,

    /// Writing a trace or other output failed.
    #[error("I/O error: {0}")]
    Io(String),
}
