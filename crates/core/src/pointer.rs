//! Pointer input: container geometry, normalization, and the shared
//! spring-smoothed signal every particle in a field reads from.

use crate::error::Error;
use crate::spring::{Spring, SpringConfig};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A container's bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A box at the client origin, e.g. the window itself.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// False until the container has a positive, finite size on both axes.
    pub fn is_laid_out(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Returns `Error::InvalidGeometry` unless [`is_laid_out`](Self::is_laid_out).
    pub fn validate(&self) -> Result<(), Error> {
        if self.is_laid_out() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Centered, scaled pointer offset.
    ///
    /// `(client - center) / half_extent * multiplier`, roughly in
    /// `[-multiplier, multiplier]` while the pointer is inside the box.
    /// `None` when the box is not laid out or the pointer is not finite.
    pub fn normalize(&self, client: DVec2, multiplier: f64) -> Option<DVec2> {
        if !self.is_laid_out() || !client.is_finite() || !multiplier.is_finite() {
            return None;
        }
        let half = DVec2::new(self.width, self.height) / 2.0;
        Some((client - self.center()) / half * multiplier)
    }
}

/// How raw pointer positions become the shared smoothed signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Signal magnitude at the container edge. Zero ignores the pointer.
    pub multiplier: f64,
    pub spring: SpringConfig,
}

/// The one pointer signal shared by every particle of a field.
///
/// The pointer handler writes [`raw`](Self::raw); the frame loop advances the
/// per-axis springs once and all particles read the same
/// [`smoothed`](Self::smoothed) value.
#[derive(Debug, Clone)]
pub struct PointerSignal {
    config: PointerConfig,
    raw: DVec2,
    x: Spring,
    y: Spring,
}

impl PointerSignal {
    /// A neutral signal: raw and smoothed both `(0, 0)`.
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            raw: DVec2::ZERO,
            x: Spring::new(config.spring, 0.0),
            y: Spring::new(config.spring, 0.0),
        }
    }

    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Latest normalized pointer offset, before smoothing.
    pub fn raw(&self) -> DVec2 {
        self.raw
    }

    /// Spring-smoothed pointer offset.
    pub fn smoothed(&self) -> DVec2 {
        DVec2::new(self.x.position(), self.y.position())
    }

    /// Applies a pointer-move event.
    ///
    /// Returns `false` and keeps the previous signal when the container has
    /// no usable geometry yet.
    pub fn update(&mut self, client: DVec2, bounds: &Bounds) -> bool {
        match bounds.normalize(client, self.config.multiplier) {
            Some(offset) => {
                self.raw = offset;
                true
            }
            None => {
                log::debug!(
                    "skipping pointer update at ({}, {}): container is {}x{}",
                    client.x,
                    client.y,
                    bounds.width,
                    bounds.height
                );
                false
            }
        }
    }

    /// Sets the normalized offset directly, bypassing geometry.
    ///
    /// Non-finite offsets are ignored.
    pub fn set_raw(&mut self, offset: DVec2) {
        if offset.is_finite() {
            self.raw = offset;
        }
    }

    /// Advances both springs by `dt` seconds and returns the smoothed signal.
    pub fn step(&mut self, dt: f64) -> DVec2 {
        self.x.step(self.raw.x, dt);
        self.y.step(self.raw.y, dt);
        self.smoothed()
    }

    /// Back to the neutral state, as on a fresh mount.
    pub fn reset(&mut self) {
        self.raw = DVec2::ZERO;
        self.x.reset(0.0);
        self.y.reset(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn dashboard() -> PointerConfig {
        PointerConfig {
            multiplier: 200.0,
            spring: SpringConfig::new(34.0, 42.0, 7.8).unwrap(),
        }
    }

    // ---- Normalization ----

    #[test]
    fn center_normalizes_to_zero() {
        let b = Bounds::new(100.0, 50.0, 800.0, 600.0);
        let v = b.normalize(DVec2::new(500.0, 350.0), 200.0).unwrap();
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn edges_normalize_to_multiplier() {
        let b = Bounds::new(100.0, 50.0, 800.0, 600.0);
        let right_bottom = b.normalize(DVec2::new(900.0, 650.0), 200.0).unwrap();
        assert!((right_bottom.x - 200.0).abs() < 1e-12);
        assert!((right_bottom.y - 200.0).abs() < 1e-12);
        let left_top = b.normalize(DVec2::new(100.0, 50.0), 200.0).unwrap();
        assert!((left_top.x + 200.0).abs() < 1e-12);
        assert!((left_top.y + 200.0).abs() < 1e-12);
    }

    #[test]
    fn zero_size_box_does_not_normalize() {
        let p = DVec2::new(10.0, 10.0);
        assert!(Bounds::sized(0.0, 600.0).normalize(p, 200.0).is_none());
        assert!(Bounds::sized(800.0, 0.0).normalize(p, 200.0).is_none());
        assert!(Bounds::sized(-1.0, 600.0).normalize(p, 200.0).is_none());
    }

    #[test]
    fn nan_pointer_does_not_normalize() {
        let b = Bounds::sized(800.0, 600.0);
        assert!(b.normalize(DVec2::new(f64::NAN, 1.0), 200.0).is_none());
    }

    #[test]
    fn validate_reports_extent() {
        let err = Bounds::sized(0.0, 300.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { width, height } if width == 0.0 && height == 300.0));
        assert!(Bounds::sized(1.0, 1.0).validate().is_ok());
    }

    // ---- Signal ----

    #[test]
    fn signal_starts_neutral() {
        let s = PointerSignal::new(dashboard());
        assert_eq!(s.raw(), DVec2::ZERO);
        assert_eq!(s.smoothed(), DVec2::ZERO);
    }

    #[test]
    fn stepping_without_events_stays_neutral() {
        let mut s = PointerSignal::new(dashboard());
        for _ in 0..120 {
            assert_eq!(s.step(FRAME), DVec2::ZERO);
        }
    }

    #[test]
    fn update_sets_raw_but_not_smoothed() {
        let mut s = PointerSignal::new(dashboard());
        assert!(s.update(DVec2::new(800.0, 300.0), &Bounds::sized(800.0, 600.0)));
        assert!((s.raw().x - 200.0).abs() < 1e-12);
        assert_eq!(s.raw().y, 0.0);
        assert_eq!(s.smoothed(), DVec2::ZERO);
    }

    #[test]
    fn zero_width_update_leaves_signal_unchanged() {
        let mut s = PointerSignal::new(dashboard());
        s.update(DVec2::new(700.0, 100.0), &Bounds::sized(800.0, 600.0));
        for _ in 0..30 {
            s.step(FRAME);
        }
        let raw = s.raw();
        let smoothed = s.smoothed();

        assert!(!s.update(DVec2::new(10.0, 10.0), &Bounds::sized(0.0, 600.0)));
        assert_eq!(s.raw(), raw);
        assert_eq!(s.smoothed(), smoothed);
    }

    #[test]
    fn smoothed_approaches_step_target_monotonically() {
        let mut s = PointerSignal::new(dashboard());
        s.set_raw(DVec2::new(150.0, -80.0));
        let mut prev = DVec2::ZERO;
        for _ in 0..1200 {
            let v = s.step(FRAME);
            assert!(v.x >= prev.x && v.x <= 150.0);
            assert!(v.y <= prev.y && v.y >= -80.0);
            prev = v;
        }
        assert_eq!(s.smoothed(), DVec2::new(150.0, -80.0));
    }

    #[test]
    fn zero_multiplier_ignores_pointer() {
        let mut s = PointerSignal::new(PointerConfig {
            multiplier: 0.0,
            ..dashboard()
        });
        assert!(s.update(DVec2::new(0.0, 0.0), &Bounds::sized(800.0, 600.0)));
        assert_eq!(s.raw(), DVec2::ZERO);
    }

    #[test]
    fn set_raw_ignores_non_finite() {
        let mut s = PointerSignal::new(dashboard());
        s.set_raw(DVec2::new(5.0, 5.0));
        s.set_raw(DVec2::new(f64::NAN, 0.0));
        assert_eq!(s.raw(), DVec2::new(5.0, 5.0));
    }

    #[test]
    fn reset_returns_to_neutral() {
        let mut s = PointerSignal::new(dashboard());
        s.set_raw(DVec2::new(100.0, 100.0));
        s.step(0.5);
        s.reset();
        assert_eq!(s.raw(), DVec2::ZERO);
        assert_eq!(s.smoothed(), DVec2::ZERO);
    }
}
