//! Reproducible description of a simulated run.
//!
//! A [`Scene`] captures everything needed to replay a headless run: preset
//! name, container size, pointer script, frame count and rate, and parameter
//! overrides. The same scene fed to the same binary produces bit-identical
//! traces.

use crate::error::Error;
use crate::pointer::Bounds;
use serde::{Deserialize, Serialize};

/// Default frame rate for simulated runs.
pub const DEFAULT_FPS: f64 = 60.0;

fn still() -> String {
    "still".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub preset: String,
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
    pub params: serde_json::Value,
    /// Pointer script in its textual form, e.g. `step:0.9,0.2`.
    #[serde(default = "still")]
    pub pointer: String,
    pub frames: usize,
    pub fps: f64,
}

impl Scene {
    /// A scene with empty params (`{}`), a still pointer, zero frames, and
    /// 60 fps.
    pub fn new(preset: &str, width: f64, height: f64) -> Self {
        Self {
            preset: preset.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            pointer: still(),
            frames: 0,
            fps: DEFAULT_FPS,
        }
    }

    /// The container as a box at the client origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::sized(self.width, self.height)
    }

    /// Seconds per frame.
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.fps
    }

    /// Checks the container has a usable size and the frame rate is positive.
    pub fn validate(&self) -> Result<(), Error> {
        self.bounds().validate()?;
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(Error::InvalidScene(format!("fps must be positive, got {}", self.fps)));
        }
        if !self.params.is_object() {
            return Err(Error::InvalidScene("params must be a JSON object".into()));
        }
        Ok(())
    }
}
