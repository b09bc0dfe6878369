//! Shared configuration for TagMaster
//!
//! This crate provides the single source of truth for window dimensions,
//! the wall, and paint defaults shared across both build modes
//! (native Bevy, browser/WASM).

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 1280;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 720;

/// Asset path of the wall texture
pub const DEFAULT_WALL_TEXTURE: &str = "textures/concrete_wall.png";

/// Display configuration for window and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct DisplayConfig {
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov_degrees: 75.0,
        }
    }
}

impl DisplayConfig {
    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

/// The paintable wall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct WallConfig {
    /// Asset path of the wall texture
    pub texture_path: String,
    pub width: f32,
    pub height: f32,
    /// World-space center in landscape layout
    pub center: [f32; 3],
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            texture_path: DEFAULT_WALL_TEXTURE.to_string(),
            width: 10.0,
            height: 5.0,
            center: [0.0, 1.0, 0.0],
        }
    }
}

/// Paint defaults and drip behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct PaintConfig {
    /// Initial color as `#rrggbb`
    pub default_color: String,
    /// Initial pattern key
    pub default_pattern: String,
    /// Initial brush size in world units
    pub default_size: f32,
    /// Chance per deposit of a drip (not adjustable at runtime)
    pub drip_probability: f32,
    /// Distance between a mark and its drip
    pub drip_offset: f32,
    /// Let drips slide down after spawning
    pub animate_drips: bool,
    /// Fixed seed for reproducible sessions; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            default_color: "#000000".to_string(),
            default_pattern: "normal".to_string(),
            default_size: 0.1,
            drip_probability: 0.005,
            drip_offset: 0.2,
            animate_drips: false,
            seed: None,
        }
    }
}

/// Everything the scene needs at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub wall: WallConfig,
    pub paint: PaintConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.width_f32() / config.height_f32(), 16.0 / 9.0);
        assert!((config.fov_radians() - 75f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_paint_defaults() {
        let paint = PaintConfig::default();
        assert_eq!(paint.drip_probability, 0.005);
        assert!(!paint.animate_drips);
        assert!(paint.seed.is_none());
    }

    #[test]
    fn test_wall_defaults() {
        let wall = WallConfig::default();
        assert_eq!(wall.texture_path, DEFAULT_WALL_TEXTURE);
        assert_eq!((wall.width, wall.height), (10.0, 5.0));
    }
}
