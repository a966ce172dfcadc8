#![deny(unsafe_code)]
//! Pointer-driven parallax field.
//!
//! A [`ParallaxField`] owns one shared [`PointerSignal`] and any number of
//! [`Layer`]s. Each frame the pointer springs advance once; every particle in
//! every layer then reads that single smoothed signal and runs it through:
//!
//! 1. depth scaling, `signal * gain * min(depth, depth_cap) + rest`,
//!    optionally eased by a per-particle spring;
//! 2. an idle-noise term, `sin`/`cos` of the signal phased by the particle
//!    seed, eased by its own softer spring;
//! 3. composition, `offset = parallax + noise`.
//!
//! Per-particle state is a flat array parallel to the particle array; there
//! is no graph of derived values.

mod motion;

pub use motion::{motion_schema, AmplitudeDraw, MotionParams};

use glam::DVec2;
use heartfield_core::appearance::Appearance;
use heartfield_core::error::Error;
use heartfield_core::particle::{build_particles, LayoutParams, Particle};
use heartfield_core::pointer::{Bounds, PointerConfig, PointerSignal};
use heartfield_core::seed::jitter_seed;
use heartfield_core::spring::Spring;
use heartfield_core::{Animator, Placement};
use serde_json::{json, Value};

/// Id offset for the vertical resting-offset draw.
const REST_Y_OFFSET: i64 = 31;

/// Spring memory and cached constants for one particle.
#[derive(Debug, Clone)]
struct Motion {
    /// Resting offset in pixels, where the particle sits with a neutral pointer.
    rest: DVec2,
    /// Idle-noise amplitude per axis.
    amplitude: DVec2,
    parallax: Option<[Spring; 2]>,
    noise: [Spring; 2],
    offset: DVec2,
}

impl Motion {
    /// State as if the signal had been neutral forever.
    fn settled(particle: &Particle, params: &MotionParams) -> Self {
        let id = i64::from(particle.id);
        let rest = DVec2::new(jitter_seed(id) - 0.5, jitter_seed(id + REST_Y_OFFSET) - 0.5)
            * params.jitter;
        let amplitude = params.amplitude(particle);

        let parallax = params.parallax_target(particle, rest, DVec2::ZERO);
        let noise = params.noise_target(particle, amplitude, DVec2::ZERO);
        Self {
            rest,
            amplitude,
            parallax: params.parallax_spring.map(|cfg| {
                [Spring::new(cfg, parallax.x), Spring::new(cfg, parallax.y)]
            }),
            noise: [
                Spring::new(params.noise_spring, noise.x),
                Spring::new(params.noise_spring, noise.y),
            ],
            offset: parallax + noise,
        }
    }

    fn step(&mut self, particle: &Particle, params: &MotionParams, signal: DVec2, dt: f64) {
        let target = params.parallax_target(particle, self.rest, signal);
        let parallax = match &mut self.parallax {
            Some([x, y]) => DVec2::new(x.step(target.x, dt), y.step(target.y, dt)),
            None => target,
        };

        let target = params.noise_target(particle, self.amplitude, signal);
        let [nx, ny] = &mut self.noise;
        let noise = DVec2::new(nx.step(target.x, dt), ny.step(target.y, dt));

        self.offset = parallax + noise;
    }
}

/// A group of particles sharing layout and motion parameters.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    params: MotionParams,
    layout: Option<LayoutParams>,
    particles: Vec<Particle>,
    motion: Vec<Motion>,
}

impl Layer {
    /// Generates `count` particles from `layout`.
    pub fn new(name: &str, count: usize, layout: LayoutParams, params: MotionParams) -> Self {
        let mut layer = Self::with_particles(name, build_particles(count, &layout), params);
        layer.layout = Some(layout);
        layer
    }

    /// Uses a hand-placed set of particles instead of generating one.
    pub fn with_particles(name: &str, particles: Vec<Particle>, params: MotionParams) -> Self {
        let motion = particles
            .iter()
            .map(|p| Motion::settled(p, &params))
            .collect();
        Self {
            name: name.to_string(),
            params,
            layout: None,
            particles,
            motion,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current pixel offset of each particle, in particle order, not counting
    /// the particle's static gap.
    pub fn offsets(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.motion.iter().map(|m| m.offset)
    }

    /// Resting offset of each particle, in particle order.
    pub fn rests(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.motion.iter().map(|m| m.rest)
    }

    /// Idle-noise amplitude per axis for each particle.
    pub fn amplitudes(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.motion.iter().map(|m| m.amplitude)
    }

    pub fn appearances(&self) -> Vec<Appearance> {
        self.particles.iter().map(Appearance::of).collect()
    }

    fn step(&mut self, signal: DVec2, dt: f64) {
        let params = &self.params;
        for (p, m) in self.particles.iter().zip(self.motion.iter_mut()) {
            m.step(p, params, signal, dt);
        }
    }

    fn reset(&mut self) {
        let params = &self.params;
        self.motion = self
            .particles
            .iter()
            .map(|p| Motion::settled(p, params))
            .collect();
    }

    fn placements(&self, index: usize) -> impl Iterator<Item = Placement> + '_ {
        self.particles
            .iter()
            .zip(&self.motion)
            .map(move |(p, m)| Placement {
                layer: index,
                id: p.id,
                left_percent: p.base.x,
                top_percent: p.base.y,
                offset: m.offset + p.gap,
                size: p.size,
            })
    }

    fn to_json(&self) -> Value {
        let mut v = json!({
            "name": self.name,
            "count": self.particles.len(),
            "motion": self.params.to_json(),
        });
        if let Some(layout) = &self.layout {
            v["layout"] = layout.to_json();
        }
        v
    }
}

/// Layers of floating particles driven by one pointer signal.
///
/// Mounting is construction; unmounting is drop. Nothing outlives the value.
#[derive(Debug, Clone)]
pub struct ParallaxField {
    pointer: PointerSignal,
    layers: Vec<Layer>,
    frames: u64,
    elapsed: f64,
}

impl ParallaxField {
    pub fn new(pointer: PointerConfig) -> Self {
        Self {
            pointer: PointerSignal::new(pointer),
            layers: Vec::new(),
            frames: 0,
            elapsed: 0.0,
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn pointer(&self) -> &PointerSignal {
        &self.pointer
    }

    /// Sets the normalized pointer offset directly, e.g. from a script.
    pub fn set_signal_target(&mut self, offset: DVec2) {
        self.pointer.set_raw(offset);
    }

    /// Frames stepped since mount or the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds simulated since mount or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }
}

impl Animator for ParallaxField {
    fn pointer_move(&mut self, client: DVec2, bounds: &Bounds) -> bool {
        self.pointer.update(client, bounds)
    }

    fn step(&mut self, dt: f64) -> Result<(), Error> {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("rejecting frame with dt={dt}");
            return Err(Error::InvalidTimeStep(dt));
        }
        let signal = self.pointer.step(dt);
        for layer in &mut self.layers {
            layer.step(signal, dt);
        }
        self.frames += 1;
        self.elapsed += dt;
        Ok(())
    }

    fn signal(&self) -> DVec2 {
        self.pointer.smoothed()
    }

    fn placements(&self) -> Vec<Placement> {
        let mut out = Vec::with_capacity(self.particle_count());
        for (i, layer) in self.layers.iter().enumerate() {
            out.extend(layer.placements(i));
        }
        out
    }

    fn params(&self) -> Value {
        let cfg = self.pointer.config();
        json!({
            "multiplier": cfg.multiplier,
            "stiffness": cfg.spring.stiffness,
            "damping": cfg.spring.damping,
            "mass": cfg.spring.mass,
            "layers": self.layers.iter().map(Layer::to_json).collect::<Vec<_>>(),
        })
    }

    fn param_schema(&self) -> Value {
        let mut schema = json!({
            "multiplier": {
                "type": "number",
                "default": self.pointer.config().multiplier,
                "min": 0.0,
                "max": 1000.0,
                "description": "Pointer signal magnitude at the container edge; 0 ignores the pointer"
            },
            "stiffness": {
                "type": "number",
                "default": self.pointer.config().spring.stiffness,
                "min": 1.0,
                "max": 500.0,
                "description": "Pointer spring stiffness"
            },
            "damping": {
                "type": "number",
                "default": self.pointer.config().spring.damping,
                "min": 0.0,
                "max": 100.0,
                "description": "Pointer spring damping"
            },
            "mass": {
                "type": "number",
                "default": self.pointer.config().spring.mass,
                "min": 0.1,
                "max": 20.0,
                "description": "Pointer spring mass"
            }
        });
        if let (Some(obj), Value::Object(motion)) = (schema.as_object_mut(), motion_schema()) {
            obj.extend(motion);
        }
        schema
    }

    fn reset(&mut self) {
        self.pointer.reset();
        for layer in &mut self.layers {
            layer.reset();
        }
        self.frames = 0;
        self.elapsed = 0.0;
    }
}
