//! Particle records and the deterministic field builder.
//!
//! Every property of a [`Particle`] is a pure function of its id and the
//! [`LayoutParams`], so a layout computed for a first paint matches any later
//! recomputation exactly.

use crate::params::{param_f64, param_positive};
use crate::seed::{seed, seed_at, AXIS_X, AXIS_Y};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::ops::RangeInclusive;

/// One floating element (heart or photo card).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// 1-based, stable for the life of the field.
    pub id: u32,
    /// Resting position as percentages of the container, `(left, top)`.
    pub base: DVec2,
    /// Parallax strength; nearer particles move more.
    pub depth: f64,
    /// Edge length in pixels.
    pub size: f64,
    /// `seed(id)`, kept for the motion and appearance stages.
    pub seed: f64,
    /// Static pixel translation from the anchor, for hand-spaced layouts.
    #[serde(default)]
    pub gap: DVec2,
}

impl Particle {
    /// A hand-placed particle. Only the seed is derived from the id.
    pub fn placed(id: u32, base: DVec2, depth: f64, size: f64, gap: DVec2) -> Self {
        Self {
            id,
            base,
            depth,
            size,
            seed: seed(i64::from(id)),
            gap,
        }
    }
}

/// Shape of a generated layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Inset from each container edge, in percent.
    pub pad: f64,
    pub depth_base: f64,
    pub depth_range: f64,
    pub depth_min: f64,
    pub size_base: f64,
    pub size_range: f64,
    pub size_min: f64,
    /// Scales both the depth and size spread.
    pub intensity: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::hearts(1.0)
    }
}

impl LayoutParams {
    /// Small glowing hearts: depth `>= 0.5`, size `>= 10` px.
    pub fn hearts(intensity: f64) -> Self {
        Self {
            pad: 3.0,
            depth_base: 0.7,
            depth_range: 1.1,
            depth_min: 0.5,
            size_base: 12.0,
            size_range: 64.0,
            size_min: 10.0,
            intensity,
        }
    }

    /// Large photo cards: depth in `[0.8, 1.3]`, fixed 256 px.
    pub fn cards() -> Self {
        Self {
            pad: 3.0,
            depth_base: 0.8,
            depth_range: 0.5,
            depth_min: 0.5,
            size_base: 256.0,
            size_range: 0.0,
            size_min: 10.0,
            intensity: 1.0,
        }
    }

    /// Overrides any field present in `params`, keeping `self` for the rest.
    ///
    /// `pad` is clamped to `[0, 50]` so positions stay inside the container.
    pub fn merge_json(self, params: &Value) -> Self {
        Self {
            pad: param_f64(params, "pad", self.pad).clamp(0.0, 50.0),
            depth_base: param_f64(params, "depth_base", self.depth_base),
            depth_range: param_f64(params, "depth_range", self.depth_range),
            depth_min: param_positive(params, "depth_min", self.depth_min),
            size_base: param_f64(params, "size_base", self.size_base),
            size_range: param_f64(params, "size_range", self.size_range),
            size_min: param_positive(params, "size_min", self.size_min),
            intensity: param_positive(params, "intensity", self.intensity),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "pad": self.pad,
            "depth_base": self.depth_base,
            "depth_range": self.depth_range,
            "depth_min": self.depth_min,
            "size_base": self.size_base,
            "size_range": self.size_range,
            "size_min": self.size_min,
            "intensity": self.intensity,
        })
    }

    /// Builds the particle with the given id.
    pub fn particle(&self, id: u32) -> Particle {
        let s = seed(i64::from(id));
        let fid = f64::from(id);
        let span = 100.0 - self.pad * 2.0;
        let base = DVec2::new(
            self.pad + (seed_at(fid * AXIS_X) * span).round(),
            self.pad + (seed_at(fid * AXIS_Y) * span).round(),
        );
        let depth = (self.depth_base + s * self.depth_range * self.intensity).max(self.depth_min);
        let size = (self.size_base + s * self.size_range * self.intensity)
            .round()
            .max(self.size_min);
        Particle {
            id,
            base,
            depth,
            size,
            seed: s,
            gap: DVec2::ZERO,
        }
    }
}

/// Ids `1..=count`, saturating at `u32::MAX`.
pub fn particle_ids(count: usize) -> RangeInclusive<u32> {
    1..=u32::try_from(count).unwrap_or(u32::MAX)
}

/// Builds `count` particles with ids `1..=count`.
pub fn build_particles(count: usize, layout: &LayoutParams) -> Vec<Particle> {
    particle_ids(count).map(|id| layout.particle(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(p: &Particle) -> [u64; 5] {
        [
            p.base.x.to_bits(),
            p.base.y.to_bits(),
            p.depth.to_bits(),
            p.size.to_bits(),
            p.seed.to_bits(),
        ]
    }

    #[test]
    fn ids_run_from_one_to_count() {
        let ps = build_particles(12, &LayoutParams::hearts(1.0));
        let ids: Vec<u32> = ps.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn empty_field_for_zero_count() {
        assert!(build_particles(0, &LayoutParams::default()).is_empty());
    }

    #[test]
    fn ids_saturate_instead_of_wrapping() {
        let ids = particle_ids(u32::MAX as usize + 2);
        assert_eq!(*ids.start(), 1);
        assert_eq!(*ids.end(), u32::MAX);
        assert_eq!(particle_ids(3).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(particle_ids(0).count(), 0);
    }

    #[test]
    fn generated_particles_have_no_gap() {
        assert!(build_particles(10, &LayoutParams::cards())
            .iter()
            .all(|p| p.gap == DVec2::ZERO));
    }

    #[test]
    fn placed_particle_keeps_layout_and_derives_seed() {
        let p = Particle::placed(7, DVec2::new(92.0, 6.0), 1.3, 256.0, DVec2::new(140.0, -100.0));
        assert_eq!(p.base, DVec2::new(92.0, 6.0));
        assert_eq!(p.depth, 1.3);
        assert_eq!(p.gap, DVec2::new(140.0, -100.0));
        assert_eq!(p.seed.to_bits(), seed(7).to_bits());
    }

    #[test]
    fn gap_defaults_when_missing_from_json() {
        let p: Particle = serde_json::from_value(json!({
            "id": 2, "base": [10.0, 20.0], "depth": 1.0, "size": 30.0, "seed": 0.25
        }))
        .unwrap();
        assert_eq!(p.gap, DVec2::ZERO);
    }

    #[test]
    fn twelve_hearts_at_unit_intensity_respect_bounds() {
        let ps = build_particles(12, &LayoutParams::hearts(1.0));
        assert_eq!(ps.len(), 12);
        for p in &ps {
            assert!((3.0..=97.0).contains(&p.base.x), "x {} for id {}", p.base.x, p.id);
            assert!((3.0..=97.0).contains(&p.base.y), "y {} for id {}", p.base.y, p.id);
            assert!(p.size >= 10.0, "size {} for id {}", p.size, p.id);
            assert!(p.depth >= 0.5, "depth {} for id {}", p.depth, p.id);
        }
    }

    #[test]
    fn builder_is_deterministic() {
        let layout = LayoutParams::hearts(1.4);
        let a = build_particles(30, &layout);
        let b = build_particles(30, &layout);
        assert!(a.iter().zip(&b).all(|(pa, pb)| bits(pa) == bits(pb)));
    }

    #[test]
    fn particle_matches_its_slot_in_a_larger_field() {
        let layout = LayoutParams::hearts(1.0);
        let big = build_particles(40, &layout);
        assert_eq!(bits(&layout.particle(17)), bits(&big[16]));
    }

    #[test]
    fn positions_are_whole_percentages() {
        for p in build_particles(20, &LayoutParams::hearts(1.0)) {
            assert_eq!(p.base.x.fract(), 0.0);
            assert_eq!(p.base.y.fract(), 0.0);
        }
    }

    #[test]
    fn x_and_y_are_not_identical() {
        let ps = build_particles(12, &LayoutParams::hearts(1.0));
        assert!(ps.iter().any(|p| p.base.x != p.base.y));
    }

    #[test]
    fn intensity_widens_depth_and_size() {
        let calm = LayoutParams::hearts(1.0).particle(5);
        let lively = LayoutParams::hearts(1.4).particle(5);
        assert!(lively.depth >= calm.depth);
        assert!(lively.size >= calm.size);
        assert_eq!(lively.base, calm.base);
    }

    #[test]
    fn cards_have_fixed_size_and_bounded_depth() {
        for p in build_particles(15, &LayoutParams::cards()) {
            assert_eq!(p.size, 256.0);
            assert!((0.8..=1.3).contains(&p.depth), "depth {}", p.depth);
        }
    }

    #[test]
    fn merge_json_overrides_and_keeps_rest() {
        let merged = LayoutParams::hearts(1.0).merge_json(&json!({"intensity": 2.0, "pad": 80.0}));
        assert_eq!(merged.intensity, 2.0);
        assert_eq!(merged.pad, 50.0);
        assert_eq!(merged.size_base, 12.0);
    }

    #[test]
    fn merge_json_ignores_non_positive_minimums() {
        let merged = LayoutParams::hearts(1.0).merge_json(&json!({"size_min": -3.0}));
        assert_eq!(merged.size_min, 10.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_id_stays_inside_padding(id in 1_u32..100_000, pad in 0.0_f64..20.0) {
                let layout = LayoutParams { pad, ..LayoutParams::hearts(1.0) };
                let p = layout.particle(id);
                // Rounding can push half a percent past the padded span.
                prop_assert!(p.base.x >= pad - 0.5 && p.base.x <= 100.0 - pad + 0.5);
                prop_assert!(p.base.y >= pad - 0.5 && p.base.y <= 100.0 - pad + 0.5);
            }

            #[test]
            fn minimums_hold_for_any_intensity(id in 1_u32..10_000, intensity in 0.0_f64..5.0) {
                let p = LayoutParams::hearts(intensity).particle(id);
                prop_assert!(p.depth >= 0.5);
                prop_assert!(p.size >= 10.0);
            }
        }
    }
}
