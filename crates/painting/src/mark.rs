//! Paint mark records
//!
//! A mark is the unit the renderer draws. Marks are created by the pattern
//! generators and the drip policy and never change afterwards.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::PaintColor;

/// Geometry of a single mark, relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkShape {
    /// A filled circle
    Disc { radius: f32 },
    /// A straight segment between two world-space endpoints
    Line { start: Vec3, end: Vec3, width: f32 },
    /// A rectangle rotated about the wall normal (radians)
    Rect {
        length: f32,
        width: f32,
        rotation: f32,
    },
    /// A downward taper: `top_width` wide at the top, a point at the bottom
    Drip { top_width: f32, length: f32 },
}

/// A single mark of paint on the wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintMark {
    pub shape: MarkShape,
    /// World-space center of the mark
    pub position: Vec3,
    pub color: PaintColor,
    /// 0.0-1.0
    pub opacity: f32,
}

impl PaintMark {
    pub fn new(shape: MarkShape, position: Vec3, color: PaintColor, opacity: f32) -> Self {
        Self {
            shape,
            position,
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn is_drip(&self) -> bool {
        matches!(self.shape, MarkShape::Drip { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_clamped_and_drip_detected() {
        let disc = PaintMark::new(MarkShape::Disc { radius: 0.1 }, Vec3::ZERO, PaintColor::BLACK, 1.5);
        assert_eq!(disc.opacity, 1.0);
        assert!(!disc.is_drip());

        let drip = PaintMark::new(
            MarkShape::Drip {
                top_width: 0.1,
                length: 0.2,
            },
            Vec3::ZERO,
            PaintColor::default(),
            -0.5,
        );
        assert_eq!(drip.opacity, 0.0);
        assert!(drip.is_drip());
    }
}
