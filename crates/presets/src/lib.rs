#![deny(unsafe_code)]
//! Preset registry: maps page names to fully configured parallax fields.
//!
//! Sits between `heartfield-field` (which implements the motion pipeline) and
//! the hosts. Both the CLI and the WASM bindings go through this crate so the
//! tuning for each page lives in one place.

pub mod script;
pub mod trace;

use glam::DVec2;
use heartfield_core::error::Error;
use heartfield_core::params::{param_f64, param_positive, param_usize};
use heartfield_core::particle::{particle_ids, LayoutParams, Particle};
use heartfield_core::pointer::PointerConfig;
use heartfield_core::scene::Scene;
use heartfield_core::spring::SpringConfig;
pub use heartfield_field::{Layer, MotionParams, ParallaxField};
use serde_json::Value;

/// All preset names, in display order.
const PRESET_NAMES: &[&str] = &["dashboard", "gallery", "story"];

/// Default heart speed.
const DEFAULT_SPEED: f64 = 1.9;
/// Default heart count where a page does not choose one.
const DEFAULT_HEARTS: usize = 12;
/// Cards on the dashboard.
const DEFAULT_CARDS: usize = 15;
/// Upper bound on particles per layer.
pub const MAX_PARTICLES: usize = 10_000;

/// Hand-spaced dashboard cards, id `i + 1` at index `i`:
/// `(left %, top %, depth, gap x px, gap y px)`.
const DASHBOARD_CARDS: [(f64, f64, f64, f64, f64); DEFAULT_CARDS] = [
    (8.0, 12.0, 1.1, -120.0, -60.0),
    (78.0, 18.0, 1.3, 120.0, -60.0),
    (14.0, 72.0, 0.9, -100.0, 80.0),
    (74.0, 74.0, 1.15, 100.0, 80.0),
    (50.0, 8.0, 0.95, 0.0, -120.0),
    (4.0, 46.0, 1.05, -140.0, 0.0),
    (92.0, 6.0, 1.3, 140.0, -100.0),
    (94.0, 82.0, 0.9, 160.0, 100.0),
    (2.0, 86.0, 0.9, -160.0, 100.0),
    (30.0, 6.0, 0.95, -40.0, -140.0),
    (60.0, 6.0, 1.0, 40.0, -140.0),
    (86.0, 36.0, 1.1, 120.0, 0.0),
    (28.0, 88.0, 0.9, -80.0, 140.0),
    (64.0, 88.0, 0.95, 80.0, 140.0),
    (50.0, 81.0, 0.8, 0.0, 0.0),
];

/// Dashboard cards: the hand-spaced table first, generated cards past it.
fn dashboard_cards(count: usize, layout: &LayoutParams) -> Vec<Particle> {
    particle_ids(count)
        .map(|id| {
            let generated = layout.particle(id);
            match DASHBOARD_CARDS.get(id as usize - 1) {
                Some(&(left, top, depth, gap_x, gap_y)) => Particle::placed(
                    id,
                    DVec2::new(left, top),
                    depth,
                    generated.size,
                    DVec2::new(gap_x, gap_y),
                ),
                None => generated,
            }
        })
        .collect()
}

/// `params[name]` as a particle count, clamped to [`MAX_PARTICLES`].
fn param_count(params: &Value, name: &str, default: usize) -> usize {
    let count = param_usize(params, name, default);
    if count > MAX_PARTICLES {
        log::warn!("{name}={count} exceeds {MAX_PARTICLES}, clamping");
        MAX_PARTICLES
    } else {
        count
    }
}

/// The pages that host a parallax field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Heavy, slow pointer spring; hearts plus photo cards.
    Dashboard,
    /// Snappier pointer and a denser, livelier heart layer.
    Gallery,
    /// Hearts drifting on a page that does not track the pointer.
    Story,
}

impl Preset {
    /// Looks a preset up by name.
    ///
    /// Returns `Error::UnknownPreset` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "dashboard" => Ok(Preset::Dashboard),
            "gallery" => Ok(Preset::Gallery),
            "story" => Ok(Preset::Story),
            _ => Err(Error::UnknownPreset(name.to_string())),
        }
    }

    /// Returns a slice of all recognized preset names.
    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Dashboard => "dashboard",
            Preset::Gallery => "gallery",
            Preset::Story => "story",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Dashboard => "hearts and photo cards behind a heavy, slow pointer spring",
            Preset::Gallery => "thirty lively hearts with a quick pointer spring",
            Preset::Story => "twelve hearts drifting without pointer tracking",
        }
    }

    fn defaults(&self) -> (f64, SpringConfig, usize, f64, usize) {
        // (multiplier, pointer spring, hearts, intensity, cards)
        match self {
            Preset::Dashboard => (200.0, SpringConfig::tuned(34.0, 42.0, 7.8), DEFAULT_HEARTS, 1.0, DEFAULT_CARDS),
            Preset::Gallery => (500.0, SpringConfig::tuned(60.0, 20.0, 1.0), 30, 1.4, 0),
            Preset::Story => (0.0, SpringConfig::tuned(60.0, 20.0, 1.0), DEFAULT_HEARTS, 1.0, 0),
        }
    }

    /// Builds the preset's field, applying overrides from `params`.
    ///
    /// Top-level keys: `multiplier`, `stiffness`, `damping`, `mass` (pointer
    /// spring), `count`, `intensity`, `speed` (hearts), `cards` (card count).
    /// Counts are clamped to [`MAX_PARTICLES`]. Nested `hearts_motion` /
    /// `cards_motion` objects are passed to [`MotionParams::merge_json`],
    /// `hearts_layout` / `cards_layout` to [`LayoutParams::merge_json`].
    ///
    /// Dashboard cards come from a hand-spaced table unless `cards_layout` is
    /// given, which generates every card from the seed instead.
    pub fn build(&self, params: &Value) -> Result<ParallaxField, Error> {
        let (multiplier, pointer_spring, hearts, intensity, cards) = self.defaults();

        let pointer = PointerConfig {
            multiplier: param_f64(params, "multiplier", multiplier).max(0.0),
            spring: SpringConfig::new(
                param_positive(params, "stiffness", pointer_spring.stiffness),
                param_f64(params, "damping", pointer_spring.damping),
                param_positive(params, "mass", pointer_spring.mass),
            )?,
        };

        let hearts = param_count(params, "count", hearts);
        let intensity = param_positive(params, "intensity", intensity);
        let speed = param_positive(params, "speed", DEFAULT_SPEED);
        let cards = param_count(params, "cards", cards);

        let mut field = ParallaxField::new(pointer);
        if hearts > 0 {
            let layout = LayoutParams::hearts(intensity).merge_json(nested(params, "hearts_layout"));
            let motion = MotionParams::hearts(speed).merge_json(nested(params, "hearts_motion"))?;
            field = field.with_layer(Layer::new("hearts", hearts, layout, motion));
        }
        if cards > 0 {
            let motion = MotionParams::cards().merge_json(nested(params, "cards_motion"))?;
            let layer = match params.get("cards_layout") {
                Some(overrides) => {
                    let layout = LayoutParams::cards().merge_json(overrides);
                    Layer::new("cards", cards, layout, motion)
                }
                None => {
                    let particles = dashboard_cards(cards, &LayoutParams::cards());
                    Layer::with_particles("cards", particles, motion)
                }
            };
            field = field.with_layer(layer);
        }
        log::debug!(
            "built preset {} with {} particles",
            self.name(),
            field.particle_count()
        );
        Ok(field)
    }
}

/// Builds the field a scene describes.
pub fn from_scene(scene: &Scene) -> Result<ParallaxField, Error> {
    Preset::from_name(&scene.preset)?.build(&scene.params)
}

fn nested<'a>(params: &'a Value, key: &str) -> &'a Value {
    params.get(key).unwrap_or(&Value::Null)
}
