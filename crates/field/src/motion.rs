//! Per-layer motion constants and the pure target functions the springs chase.

use glam::DVec2;
use heartfield_core::error::Error;
use heartfield_core::params::{param_f64, param_pair, param_positive};
use heartfield_core::particle::Particle;
use heartfield_core::seed::jitter_seed;
use heartfield_core::spring::SpringConfig;
use serde_json::{json, Value};

/// Depth cap for card layers; deeper cards move no more than depth 1.0.
const CARD_DEPTH_CAP: f64 = 1.0;
/// Full width of the resting-offset box for cards, in pixels.
const CARD_JITTER: f64 = 36.0;
/// Id offset for the vertical noise-amplitude draw.
const AMPLITUDE_Y_OFFSET: i64 = 7;

/// Where a particle's idle-noise amplitude comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplitudeDraw {
    /// The particle seed, one amplitude for both axes.
    Seed,
    /// `jitter_seed(id)` for x and `jitter_seed(id + 7)` for y.
    Jitter,
}

impl AmplitudeDraw {
    pub fn name(&self) -> &'static str {
        match self {
            AmplitudeDraw::Seed => "seed",
            AmplitudeDraw::Jitter => "jitter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "seed" => Some(AmplitudeDraw::Seed),
            "jitter" => Some(AmplitudeDraw::Jitter),
            _ => None,
        }
    }
}

/// Motion constants shared by every particle of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Per-axis scale from smoothed signal to pixels.
    pub gain: DVec2,
    /// Depth beyond which particles move no further. `None` leaves depth
    /// uncapped.
    pub depth_cap: Option<f64>,
    /// Full width of the resting-offset box in pixels.
    pub jitter: f64,
    pub noise_frequency: DVec2,
    /// Multiplies the particle seed to phase each axis of the noise.
    pub noise_phase: DVec2,
    pub noise_amplitude: f64,
    pub noise_amplitude_range: f64,
    pub noise_gain: f64,
    pub amplitude_draw: AmplitudeDraw,
    /// Eases the depth-scaled parallax per particle. `None` uses it directly.
    pub parallax_spring: Option<SpringConfig>,
    pub noise_spring: SpringConfig,
}

impl MotionParams {
    /// Small hearts: eased parallax, speed-scaled idle drift.
    ///
    /// `speed` stiffens the springs, raises the noise frequency and
    /// amplitude, and increases the parallax gain.
    pub fn hearts(speed: f64) -> Self {
        let speed = if speed.is_finite() { speed } else { 1.0 };
        let drift = 0.005 * speed.max(0.5);
        let gain = speed.max(0.12);
        Self {
            gain: DVec2::new(gain / 12.0, gain / 16.0),
            depth_cap: None,
            jitter: 0.0,
            noise_frequency: DVec2::new(drift, drift * 1.2),
            noise_phase: DVec2::new(10.0, 13.0),
            noise_amplitude: 2.0,
            noise_amplitude_range: 6.0,
            noise_gain: speed.max(0.6),
            amplitude_draw: AmplitudeDraw::Seed,
            parallax_spring: Some(SpringConfig::tuned(
                (40.0 * speed.max(0.4)).max(8.0),
                (26.0 / speed.max(0.5)).max(8.0),
                1.0,
            )),
            noise_spring: SpringConfig::tuned(
                (12.0 * speed.max(0.5)).max(6.0),
                (10.0 / speed.max(0.5)).max(6.0),
                0.9,
            ),
        }
    }

    /// Photo cards: direct parallax capped at depth 1, jittered rest, slow noise.
    ///
    /// Both noise axes share the seed as their phase.
    pub fn cards() -> Self {
        Self {
            gain: DVec2::ONE,
            depth_cap: Some(CARD_DEPTH_CAP),
            jitter: CARD_JITTER,
            noise_frequency: DVec2::new(0.012, 0.014),
            noise_phase: DVec2::ONE,
            noise_amplitude: 4.0,
            noise_amplitude_range: 6.0,
            noise_gain: 1.0,
            amplitude_draw: AmplitudeDraw::Jitter,
            parallax_spring: None,
            noise_spring: SpringConfig::tuned(10.0, 9.0, 0.9),
        }
    }

    /// How strongly a particle of this depth follows the signal.
    pub fn depth_factor(&self, depth: f64) -> f64 {
        match self.depth_cap {
            Some(cap) => depth.min(cap),
            None => depth,
        }
    }

    /// Idle-noise amplitude for a draw in `[0, 1)`.
    pub fn amplitude_for(&self, draw: f64) -> f64 {
        (self.noise_amplitude + draw * self.noise_amplitude_range) * self.noise_gain
    }

    /// Per-axis idle-noise amplitude of `particle`.
    pub fn amplitude(&self, particle: &Particle) -> DVec2 {
        match self.amplitude_draw {
            AmplitudeDraw::Seed => DVec2::splat(self.amplitude_for(particle.seed)),
            AmplitudeDraw::Jitter => {
                let id = i64::from(particle.id);
                DVec2::new(
                    self.amplitude_for(jitter_seed(id)),
                    self.amplitude_for(jitter_seed(id + AMPLITUDE_Y_OFFSET)),
                )
            }
        }
    }

    /// Depth-scaled parallax target.
    pub fn parallax_target(&self, particle: &Particle, rest: DVec2, signal: DVec2) -> DVec2 {
        signal * self.gain * self.depth_factor(particle.depth) + rest
    }

    /// Idle-noise target: a periodic function of the smoothed signal, phased
    /// by the particle seed. `sin` on x and `cos` on y so the drift is not
    /// diagonal.
    pub fn noise_target(&self, particle: &Particle, amplitude: DVec2, signal: DVec2) -> DVec2 {
        let phase = self.noise_phase * particle.seed;
        DVec2::new(
            (signal.x * self.noise_frequency.x + phase.x).sin() * amplitude.x,
            (signal.y * self.noise_frequency.y + phase.y).cos() * amplitude.y,
        )
    }

    /// Applies the overrides in `params`, keeping `self` for missing keys.
    ///
    /// Returns `Error::InvalidSpring` if the merged spring constants are
    /// invalid (only possible through `*_damping` being negative).
    pub fn merge_json(self, params: &Value) -> Result<Self, Error> {
        let noise_spring = SpringConfig::new(
            param_positive(params, "noise_stiffness", self.noise_spring.stiffness),
            param_f64(params, "noise_damping", self.noise_spring.damping),
            param_positive(params, "noise_mass", self.noise_spring.mass),
        )?;
        let parallax_spring = match self.parallax_spring {
            Some(s) => Some(SpringConfig::new(
                param_positive(params, "parallax_stiffness", s.stiffness),
                param_f64(params, "parallax_damping", s.damping),
                param_positive(params, "parallax_mass", s.mass),
            )?),
            None => None,
        };
        let depth_cap = match params.get("depth_cap") {
            Some(Value::Null) => None,
            Some(v) => v
                .as_f64()
                .filter(|c| c.is_finite() && *c > 0.0)
                .or(self.depth_cap),
            None => self.depth_cap,
        };
        let amplitude_draw = params
            .get("amplitude_draw")
            .and_then(Value::as_str)
            .and_then(AmplitudeDraw::from_name)
            .unwrap_or(self.amplitude_draw);
        Ok(Self {
            gain: param_pair(params, "gain", self.gain),
            depth_cap,
            jitter: param_f64(params, "jitter", self.jitter).abs(),
            noise_frequency: param_pair(params, "noise_frequency", self.noise_frequency),
            noise_phase: param_pair(params, "noise_phase", self.noise_phase),
            noise_amplitude: param_f64(params, "noise_amplitude", self.noise_amplitude),
            noise_amplitude_range: param_f64(params, "noise_amplitude_range", self.noise_amplitude_range),
            noise_gain: param_f64(params, "noise_gain", self.noise_gain),
            amplitude_draw,
            parallax_spring,
            noise_spring,
        })
    }

    pub fn to_json(&self) -> Value {
        let mut v = json!({
            "gain": [self.gain.x, self.gain.y],
            "depth_cap": self.depth_cap,
            "jitter": self.jitter,
            "noise_frequency": [self.noise_frequency.x, self.noise_frequency.y],
            "noise_phase": [self.noise_phase.x, self.noise_phase.y],
            "noise_amplitude": self.noise_amplitude,
            "noise_amplitude_range": self.noise_amplitude_range,
            "noise_gain": self.noise_gain,
            "amplitude_draw": self.amplitude_draw.name(),
            "noise_stiffness": self.noise_spring.stiffness,
            "noise_damping": self.noise_spring.damping,
            "noise_mass": self.noise_spring.mass,
        });
        if let Some(s) = self.parallax_spring {
            v["parallax_stiffness"] = json!(s.stiffness);
            v["parallax_damping"] = json!(s.damping);
            v["parallax_mass"] = json!(s.mass);
        }
        v
    }
}

/// Schema for the keys [`MotionParams::merge_json`] understands.
pub fn motion_schema() -> Value {
    json!({
        "gain": {
            "type": "pair",
            "description": "Per-axis scale from smoothed signal to pixels"
        },
        "depth_cap": {
            "type": "number",
            "min": 0.1,
            "max": 10.0,
            "description": "Depth above which particles stop moving further; null removes the cap"
        },
        "jitter": {
            "type": "number",
            "min": 0.0,
            "max": 200.0,
            "description": "Width of the box resting offsets are drawn from, in pixels"
        },
        "noise_frequency": {
            "type": "pair",
            "description": "Idle-noise frequency per axis, in radians per signal unit"
        },
        "noise_phase": {
            "type": "pair",
            "description": "Seed multiplier phasing the idle noise per axis"
        },
        "noise_amplitude": {
            "type": "number",
            "min": 0.0,
            "max": 50.0,
            "description": "Minimum idle-noise amplitude in pixels"
        },
        "noise_amplitude_range": {
            "type": "number",
            "min": 0.0,
            "max": 50.0,
            "description": "Seed-dependent extra idle-noise amplitude in pixels"
        },
        "noise_gain": {
            "type": "number",
            "min": 0.0,
            "max": 5.0,
            "description": "Overall idle-noise multiplier"
        },
        "amplitude_draw": {
            "type": "string",
            "options": ["seed", "jitter"],
            "description": "Draw idle-noise amplitude from the particle seed (both axes) or the jitter hash (per axis)"
        },
        "noise_stiffness": {
            "type": "number",
            "min": 1.0,
            "max": 200.0,
            "description": "Idle-noise spring stiffness"
        },
        "noise_damping": {
            "type": "number",
            "min": 0.0,
            "max": 100.0,
            "description": "Idle-noise spring damping"
        },
        "noise_mass": {
            "type": "number",
            "min": 0.1,
            "max": 10.0,
            "description": "Idle-noise spring mass"
        },
        "parallax_stiffness": {
            "type": "number",
            "min": 1.0,
            "max": 200.0,
            "description": "Per-particle parallax spring stiffness, for layers that ease parallax"
        },
        "parallax_damping": {
            "type": "number",
            "min": 0.0,
            "max": 100.0,
            "description": "Per-particle parallax spring damping"
        },
        "parallax_mass": {
            "type": "number",
            "min": 0.1,
            "max": 10.0,
            "description": "Per-particle parallax spring mass"
        }
    })
}
