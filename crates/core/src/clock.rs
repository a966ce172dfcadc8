//! Host timestamps to frame deltas.

/// Delta used for the first frame, before there is a previous timestamp.
pub const FIRST_FRAME_DT: f64 = 1.0 / 60.0;
/// Longest delta handed to the springs, in seconds.
pub const MAX_FRAME_DT: f64 = 0.040;

/// Turns the millisecond timestamps passed to an animation-frame callback
/// into clamped deltas in seconds.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, in `[0, MAX_FRAME_DT]`.
    ///
    /// A timestamp that goes backwards or is not finite yields `0.0`; a
    /// non-finite timestamp is also not remembered.
    pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms.replace(timestamp_ms) {
            None => FIRST_FRAME_DT,
            Some(prev) => ((timestamp_ms - prev) / 1000.0).max(0.0),
        };
        dt.min(MAX_FRAME_DT)
    }

    /// Forgets the previous timestamp, e.g. after the page was hidden.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
