#![deny(unsafe_code)]
//! Browser bindings for heartfield.
//!
//! The host page owns `requestAnimationFrame` and pointer listeners; it feeds
//! timestamps and pointer events in and reads placements back as a flat
//! `Float64Array`, [`PLACEMENT_STRIDE`] numbers per particle.

use heartfield_core::error::Error;
use heartfield_core::{Animator, Bounds, DVec2, FrameClock, Gate, Placement, Session};
use heartfield_presets::{ParallaxField, Preset};
use std::sync::Once;
use wasm_bindgen::prelude::*;

/// Numbers per placement in [`FieldHandle::placements`]:
/// `layer, id, left_percent, top_percent, offset_x, offset_y, size`.
pub const PLACEMENT_STRIDE: usize = 7;

static LOGGER: Once = Once::new();

fn init_logging() {
    LOGGER.call_once(|| {
        console_log::init_with_level(log::Level::Info).ok();
    });
}

fn to_js(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn flatten(placements: &[Placement]) -> Vec<f64> {
    placements
        .iter()
        .flat_map(|p| {
            [
                p.layer as f64,
                f64::from(p.id),
                p.left_percent,
                p.top_percent,
                p.offset.x,
                p.offset.y,
                p.size,
            ]
        })
        .collect()
}

/// A mounted field plus the clock that turns frame timestamps into steps.
#[wasm_bindgen]
pub struct FieldHandle {
    field: ParallaxField,
    clock: FrameClock,
}

impl FieldHandle {
    fn build(preset: &str, params_json: &str) -> Result<Self, Error> {
        let params: serde_json::Value = if params_json.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(params_json)
                .map_err(|e| Error::InvalidScene(format!("invalid params JSON: {e}")))?
        };
        let field = Preset::from_name(preset)?.build(&params)?;
        Ok(Self {
            field,
            clock: FrameClock::new(),
        })
    }

    fn tick(&mut self, timestamp_ms: f64) -> Result<(), Error> {
        let dt = self.clock.advance(timestamp_ms);
        self.field.step(dt)
    }
}

#[wasm_bindgen]
impl FieldHandle {
    /// Builds the named preset with JSON overrides (`""` for none).
    pub fn mount(preset: &str, params_json: &str) -> Result<FieldHandle, JsValue> {
        init_logging();
        let handle = Self::build(preset, params_json).map_err(to_js)?;
        log::info!(
            "mounted {preset} with {} particles",
            handle.field.particle_count()
        );
        Ok(handle)
    }

    /// Feeds a pointer-move event. Returns `false` if the container had no
    /// usable size and the event was skipped.
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        let bounds = Bounds::new(left, top, width, height);
        self.field
            .pointer_move(DVec2::new(client_x, client_y), &bounds)
    }

    /// Advances to the given `requestAnimationFrame` timestamp.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<(), JsValue> {
        self.tick(timestamp_ms).map_err(to_js)
    }

    /// Current placements, [`PLACEMENT_STRIDE`] numbers each.
    pub fn placements(&self) -> Vec<f64> {
        flatten(&self.field.placements())
    }

    pub fn particle_count(&self) -> usize {
        self.field.particle_count()
    }

    pub fn signal_x(&self) -> f64 {
        self.field.signal().x
    }

    pub fn signal_y(&self) -> f64 {
        self.field.signal().y
    }

    /// Current parameters as a JSON string.
    pub fn params(&self) -> String {
        self.field.params().to_string()
    }

    /// Returns to the freshly mounted state; the next frame is a first frame.
    pub fn reset(&mut self) {
        self.field.reset();
        self.clock.reset();
    }
}

/// Login state for the page shell.
#[wasm_bindgen]
pub struct SessionGate {
    gate: Gate,
    session: Session,
}

#[wasm_bindgen]
impl SessionGate {
    #[wasm_bindgen(constructor)]
    pub fn new(passphrase: &str) -> SessionGate {
        SessionGate {
            gate: Gate::new(passphrase),
            session: Session::default(),
        }
    }

    /// Returns whether the session is authenticated afterwards.
    pub fn login(&mut self, candidate: &str) -> bool {
        self.gate.login(&mut self.session, candidate).is_ok()
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
