//! Drip policy
//!
//! After every deposit there is a small, fixed chance of paint running.
//! A drip is a tapered mark placed a little below the last mark of the
//! deposit, in that mark's color.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DRIP_PROBABILITY, DRIP_OFFSET, DRIP_SLIDE_STEP};
use crate::mark::{MarkShape, PaintMark};

/// When and where drips appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DripPolicy {
    /// Chance per deposit, 0.0-1.0
    pub probability: f32,
    /// Distance below the anchor mark
    pub offset: f32,
}

impl Default for DripPolicy {
    fn default() -> Self {
        Self {
            probability: DEFAULT_DRIP_PROBABILITY,
            offset: DRIP_OFFSET,
        }
    }
}

impl DripPolicy {
    pub fn with_probability(probability: f32) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Roll once; true means this deposit drips
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.r#gen::<f32>() < self.probability
    }

    /// Build the drip mark for `anchor` at brush size `size`
    pub fn drip_below(&self, anchor: &PaintMark, size: f32) -> PaintMark {
        PaintMark::new(
            MarkShape::Drip {
                top_width: size,
                length: size * 2.0,
            },
            anchor.position - Vec3::Y * self.offset,
            anchor.color,
            anchor.opacity,
        )
    }
}

/// Remaining downward travel of a sliding drip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DripMotion {
    remaining: f32,
}

impl DripMotion {
    /// Pick a total travel distance in 0.5-1.0
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            remaining: rng.gen_range(0.5..1.0),
        }
    }

    pub fn with_distance(distance: f32) -> Self {
        Self {
            remaining: distance.max(0.0),
        }
    }

    /// Advance one frame; returns how far to move down (0.0 once finished)
    pub fn step(&mut self) -> f32 {
        let delta = self.remaining.min(DRIP_SLIDE_STEP);
        self.remaining -= delta;
        delta
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }
}
