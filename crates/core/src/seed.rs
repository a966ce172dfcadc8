//! Stateless sine-hash used for every "random" choice in a field.
//!
//! Layout and motion phases are derived from particle ids through these
//! functions, never from a seeded generator, so any two evaluations of the
//! same field agree bit-for-bit regardless of call order.

/// Multiplier for the primary hash.
const PRIMARY: f64 = 12.9898;
/// Multiplier for the jitter hash, decorrelated from [`PRIMARY`].
const JITTER: f64 = 78.233;
/// Output scale before taking the fractional part.
const SPREAD: f64 = 43758.5453;

/// Scale applied to the id for the horizontal layout draw.
pub const AXIS_X: f64 = 7.231;
/// Scale applied to the id for the vertical layout draw.
pub const AXIS_Y: f64 = 13.997;

fn sine_hash(x: f64, k: f64) -> f64 {
    let h = ((x * k).sin() * SPREAD).abs().fract();
    if h.is_finite() {
        h
    } else {
        0.0
    }
}

/// Deterministic value in `[0, 1)` for an integer input.
///
/// `frac(|sin(n * 12.9898) * 43758.5453|)`. Total over `i64`.
pub fn seed(n: i64) -> f64 {
    sine_hash(n as f64, PRIMARY)
}

/// Same hash as [`seed`] over a real input.
///
/// Used with scaled ids (`id * AXIS_X`, `id * AXIS_Y`) so the two layout axes
/// are not correlated. Non-finite input maps to `0.0`.
pub fn seed_at(x: f64) -> f64 {
    sine_hash(x, PRIMARY)
}

/// Second, independent hash in `[0, 1)` for resting offsets and amplitudes.
pub fn jitter_seed(n: i64) -> f64 {
    sine_hash(n as f64, JITTER)
}
