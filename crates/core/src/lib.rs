#![deny(unsafe_code)]
//! Core types and traits for heartfield, a pointer-driven parallax layer of
//! floating hearts and photo cards.
//!
//! Provides the sine-hash [`seed`](seed::seed) functions, the particle layout
//! builder, the closed-form [`Spring`] filter, pointer normalization and the
//! shared [`PointerSignal`], the [`Animator`] trait, presentation hints,
//! the frame clock, the login [`Session`], and parameter helpers.

pub mod animator;
pub mod appearance;
pub mod clock;
pub mod error;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod scene;
pub mod seed;
pub mod session;
pub mod spring;

pub use animator::{Animator, Placement};
pub use appearance::Appearance;
pub use clock::FrameClock;
pub use error::Error;
pub use particle::{build_particles, particle_ids, LayoutParams, Particle};
pub use pointer::{Bounds, PointerConfig, PointerSignal};
pub use scene::Scene;
pub use session::{Gate, Session};
pub use spring::{Spring, SpringConfig};

pub use glam::DVec2;
