//! Viewport-dependent placement of the camera and the wall.
//!
//! Landscape viewports see the wall from the default distance. Portrait
//! viewports shift the wall up on screen (the control panel sits below it)
//! and pull the camera back until the full wall width fits. The wall keeps
//! its world position so marks already placed stay on it; only the camera
//! moves.

use glam::Vec3;

use crate::raycast::WallPlane;

/// Camera distance from the wall in landscape
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;

/// How far the wall is shifted up on screen in portrait, in world units
pub const PORTRAIT_WALL_LIFT: f32 = 0.5;

/// Horizontal breathing room when fitting the wall in portrait
const FIT_MARGIN: f32 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    pub camera_position: Vec3,
    /// Point the camera looks at
    pub camera_target: Vec3,
    /// Width / height of the viewport
    pub aspect: f32,
}

impl ViewportLayout {
    /// Layout for a `width` x `height` viewport and a vertical field of view
    /// (radians). `wall` gives the configured wall center and size.
    pub fn for_viewport(width: f32, height: f32, fov_y: f32, wall: &WallPlane) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };

        let (camera_target, distance) = if aspect >= 1.0 {
            (wall.center, DEFAULT_CAMERA_DISTANCE)
        } else {
            let half_width_per_unit = (fov_y * 0.5).tan() * aspect;
            let fit = if half_width_per_unit > 0.0 {
                wall.width * 0.5 / half_width_per_unit * FIT_MARGIN
            } else {
                DEFAULT_CAMERA_DISTANCE
            };
            (
                wall.center - Vec3::Y * PORTRAIT_WALL_LIFT,
                fit.max(DEFAULT_CAMERA_DISTANCE),
            )
        };

        Self {
            camera_position: camera_target + Vec3::Z * distance,
            camera_target,
            aspect,
        }
    }

    pub fn is_portrait(&self) -> bool {
        self.aspect < 1.0
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_position.distance(self.camera_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOV: f32 = 75.0 * std::f32::consts::PI / 180.0;

    #[test]
    fn test_landscape_keeps_defaults() {
        let wall = WallPlane::default();
        let layout = ViewportLayout::for_viewport(1280.0, 720.0, FOV, &wall);
        assert!(!layout.is_portrait());
        assert_eq!(layout.camera_target, wall.center);
        assert_eq!(layout.camera_position, Vec3::new(0.0, 1.0, 5.0));
    }

    #[test]
    fn test_portrait_fits_wall_width() {
        let wall = WallPlane::default();
        let layout = ViewportLayout::for_viewport(390.0, 844.0, FOV, &wall);
        assert!(layout.is_portrait());
        // Looking below the wall center puts the wall higher on screen
        assert_eq!(layout.camera_target.y, wall.center.y - PORTRAIT_WALL_LIFT);
        assert!(layout.camera_distance() > DEFAULT_CAMERA_DISTANCE);

        let visible_half_width = (FOV * 0.5).tan() * layout.aspect * layout.camera_distance();
        assert!(visible_half_width >= wall.width * 0.5);
    }

    #[test]
    fn test_zero_height_does_not_panic() {
        let layout = ViewportLayout::for_viewport(100.0, 0.0, FOV, &WallPlane::default());
        assert_eq!(layout.aspect, 1.0);
    }
}
