//! Headless runs and their JSON traces.
//!
//! A [`Trace`] pairs the [`Scene`] that produced it with sampled placements,
//! so a trace file is enough to reproduce itself.

use crate::from_scene;
use crate::script::PointerScript;
use glam::DVec2;
use heartfield_core::error::Error;
use heartfield_core::scene::Scene;
use heartfield_core::{Animator, Placement};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Field state at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub frame: usize,
    /// Seconds since mount.
    pub time: f64,
    pub signal: DVec2,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub scene: Scene,
    pub samples: Vec<Sample>,
}

impl Trace {
    /// The last sample, i.e. the state after all frames ran.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

fn sample(field: &dyn Animator, frame: usize, time: f64) -> Sample {
    Sample {
        frame,
        time,
        signal: field.signal(),
        placements: field.placements(),
    }
}

/// Runs `scene` and samples the mount state, every `every`-th frame, and the
/// final frame. `every == 0` keeps only the mount and final samples.
pub fn run(scene: &Scene, every: usize) -> Result<Trace, Error> {
    scene.validate()?;
    let script: PointerScript = scene.pointer.parse()?;
    let mut field = from_scene(scene)?;
    let bounds = scene.bounds();
    let dt = scene.frame_dt();

    let mut samples = vec![sample(&field, 0, 0.0)];
    for frame in 1..=scene.frames {
        let time = frame as f64 * dt;
        if let Some(client) = script.position(time, &bounds) {
            field.pointer_move(client, &bounds);
        }
        field.step(dt)?;
        let due = every > 0 && frame % every == 0;
        if due || frame == scene.frames {
            samples.push(sample(&field, frame, time));
        }
    }
    log::info!(
        "ran {} for {} frames under '{}', kept {} samples",
        scene.preset,
        scene.frames,
        script,
        samples.len()
    );
    Ok(Trace {
        scene: scene.clone(),
        samples,
    })
}

/// Writes a trace as pretty-printed JSON.
///
/// Returns `Error::Io` if the file cannot be created or written.
pub fn write_json(trace: &Trace, path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), trace).map_err(|e| Error::Io(e.to_string()))
}
