//! Scripted pointer paths for headless runs.
//!
//! Textual forms, all coordinates as fractions of the container:
//! - `still`: no pointer events at all
//! - `step:FX,FY`: jump to `(FX, FY)` on the first frame and stay
//! - `orbit:R,PERIOD`: circle the center at radius `R` (fraction of the
//!   half-extent) once every `PERIOD` seconds

use glam::DVec2;
use heartfield_core::error::Error;
use heartfield_core::pointer::Bounds;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerScript {
    Still,
    Step { to: DVec2 },
    Orbit { radius: f64, period: f64 },
}

impl PointerScript {
    /// Client-space pointer position at `t` seconds, or `None` for no event.
    pub fn position(&self, t: f64, bounds: &Bounds) -> Option<DVec2> {
        match *self {
            PointerScript::Still => None,
            PointerScript::Step { to } => Some(DVec2::new(
                bounds.left + to.x * bounds.width,
                bounds.top + to.y * bounds.height,
            )),
            PointerScript::Orbit { radius, period } => {
                let (sin, cos) = (TAU * t / period).sin_cos();
                let half = DVec2::new(bounds.width, bounds.height) / 2.0;
                Some(bounds.center() + DVec2::new(cos, sin) * half * radius)
            }
        }
    }
}

fn invalid(s: &str) -> Error {
    Error::InvalidScene(format!(
        "invalid pointer script '{s}': expected still, step:FX,FY, or orbit:R,PERIOD"
    ))
}

fn two_numbers(s: &str, args: &str) -> Result<(f64, f64), Error> {
    let (a, b) = args.split_once(',').ok_or_else(|| invalid(s))?;
    let a: f64 = a.trim().parse().map_err(|_| invalid(s))?;
    let b: f64 = b.trim().parse().map_err(|_| invalid(s))?;
    if a.is_finite() && b.is_finite() {
        Ok((a, b))
    } else {
        Err(invalid(s))
    }
}

impl FromStr for PointerScript {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, args) = s.split_once(':').unwrap_or((s, ""));
        match kind.trim() {
            "still" if args.is_empty() => Ok(PointerScript::Still),
            "step" => {
                let (x, y) = two_numbers(s, args)?;
                Ok(PointerScript::Step {
                    to: DVec2::new(x, y),
                })
            }
            "orbit" => {
                let (radius, period) = two_numbers(s, args)?;
                if period <= 0.0 {
                    return Err(invalid(s));
                }
                Ok(PointerScript::Orbit { radius, period })
            }
            _ => Err(invalid(s)),
        }
    }
}

impl fmt::Display for PointerScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerScript::Still => write!(f, "still"),
            PointerScript::Step { to } => write!(f, "step:{},{}", to.x, to.y),
            PointerScript::Orbit { radius, period } => write!(f, "orbit:{radius},{period}"),
        }
    }
}
