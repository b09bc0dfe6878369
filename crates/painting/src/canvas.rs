//! The paint canvas: an explicit, owned model of what is on the wall.
//!
//! A renderer mirrors this model; it never owns paint state itself.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::PaintColor;
use crate::mark::PaintMark;
use crate::raycast::WallPlane;

/// Scene-wide ambient light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: PaintColor,
    pub brightness: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        // 0x404040
        Self {
            color: PaintColor::from_rgb8(0x40, 0x40, 0x40),
            brightness: 1.0,
        }
    }
}

/// Wall, light and every mark placed so far, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    wall: Option<WallPlane>,
    ambient: Option<AmbientLight>,
    marks: Vec<PaintMark>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas that already has its wall and light
    pub fn with_wall(wall: WallPlane, ambient: AmbientLight) -> Self {
        Self {
            wall: Some(wall),
            ambient: Some(ambient),
            marks: Vec::new(),
        }
    }

    pub fn wall(&self) -> Option<&WallPlane> {
        self.wall.as_ref()
    }

    /// Install the wall once its texture is ready
    pub fn set_wall(&mut self, wall: WallPlane) {
        self.wall = Some(wall);
    }

    pub fn ambient(&self) -> Option<&AmbientLight> {
        self.ambient.as_ref()
    }

    pub fn set_ambient(&mut self, ambient: AmbientLight) {
        self.ambient = Some(ambient);
    }

    /// Append marks in order
    pub fn insert(&mut self, marks: impl IntoIterator<Item = PaintMark>) {
        self.marks.extend(marks);
    }

    pub fn marks(&self) -> &[PaintMark] {
        &self.marks
    }

    /// Marks from `start` onward, with their insertion index
    pub fn marks_from(&self, start: usize) -> impl Iterator<Item = (usize, &PaintMark)> {
        self.marks.iter().enumerate().skip(start)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub fn drip_count(&self) -> usize {
        self.marks.iter().filter(|m| m.is_drip()).count()
    }

    /// Wall + light + marks
    pub fn child_count(&self) -> usize {
        usize::from(self.wall.is_some()) + usize::from(self.ambient.is_some()) + self.marks.len()
    }

    pub fn is_blank(&self) -> bool {
        self.marks.is_empty()
    }

    /// Remove every mark and drip, keeping the wall and the light.
    ///
    /// Returns how many marks were removed.
    pub fn reset(&mut self) -> usize {
        let removed = self.marks.len();
        self.marks.clear();
        info!("Canvas reset, removed {} marks", removed);
        removed
    }
}
