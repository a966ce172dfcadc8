#![deny(unsafe_code)]
//! CLI binary for heartfield.
//!
//! Subcommands:
//! - `list`: print available presets
//! - `layout <preset>`: print the resting layout of a preset
//! - `simulate <preset>`: run a preset headlessly and write a JSON trace

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use heartfield_core::{Animator, Appearance, Scene};
use heartfield_presets::{trace, Preset};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "heartfield", about = "Pointer-driven parallax field CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available presets.
    List,
    /// Print every particle of a preset at rest.
    Layout {
        /// Preset name (e.g. "dashboard").
        preset: String,

        /// Preset overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Run a preset for N frames under a scripted pointer and write a JSON trace.
    Simulate {
        /// Preset name (e.g. "gallery").
        preset: String,

        /// Container width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280.0)]
        width: f64,

        /// Container height in pixels.
        #[arg(short = 'H', long, default_value_t = 800.0)]
        height: f64,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// Frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Pointer script: still, step:FX,FY, or orbit:RADIUS,PERIOD.
        #[arg(short, long, default_value = "still")]
        pointer: String,

        /// Keep a sample every N frames (0 keeps only first and last).
        #[arg(short, long, default_value_t = 60)]
        every: usize,

        /// Output file path.
        #[arg(short, long, default_value = "trace.json")]
        output: PathBuf,

        /// Preset overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_params(params: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(value)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            if cli.json {
                let info: Vec<_> = presets
                    .iter()
                    .filter_map(|name| Preset::from_name(name).ok())
                    .map(|p| serde_json::json!({"name": p.name(), "description": p.description()}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    let preset = Preset::from_name(name)?;
                    println!("  {name:<10} {}", preset.description());
                }
            }
        }
        Command::Layout { preset, params } => {
            let params = parse_params(&params)?;
            let field = Preset::from_name(&preset)?.build(&params)?;

            if cli.json {
                let layers: Vec<_> = field
                    .layers()
                    .iter()
                    .map(|layer| {
                        serde_json::json!({
                            "name": layer.name(),
                            "particles": layer.particles(),
                            "appearances": layer.appearances(),
                        })
                    })
                    .collect();
                let info = serde_json::json!({
                    "preset": preset,
                    "params": field.params(),
                    "layers": layers,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for layer in field.layers() {
                    println!("{} ({} particles)", layer.name(), layer.len());
                    println!("  {:>4} {:>5} {:>5} {:>6} {:>5} {:>6} {:>5}", "id", "left", "top", "depth", "size", "scale", "blur");
                    for p in layer.particles() {
                        let look = Appearance::of(p);
                        println!(
                            "  {:>4} {:>5} {:>5} {:>6.3} {:>5} {:>6.3} {:>5.2}",
                            p.id, p.base.x, p.base.y, p.depth, p.size, look.scale, look.blur
                        );
                    }
                }
            }
        }
        Command::Simulate {
            preset,
            width,
            height,
            frames,
            fps,
            pointer,
            every,
            output,
            params,
        } => {
            let scene = Scene {
                frames,
                fps,
                pointer,
                params: parse_params(&params)?,
                ..Scene::new(&preset, width, height)
            };

            let trace = trace::run(&scene, every)?;
            trace::write_json(&trace, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "preset": preset,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "fps": fps,
                    "pointer": scene.pointer,
                    "samples": trace.samples.len(),
                    "signal": trace.last().map(|s| s.signal),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "simulated {preset} ({width}x{height}, {frames} frames at {fps} fps, pointer {}) -> {}",
                    scene.pointer,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
