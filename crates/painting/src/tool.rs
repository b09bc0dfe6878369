//! Tool state
//!
//! UI handlers write to a single [`ToolState`]; the deposit pipeline only
//! ever sees the immutable [`ToolConfig`] snapshot taken for that deposit.
//! Changing the tool therefore only affects later deposits.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::color::{ColorError, PaintColor};
use crate::constants::{BRUSH_SIZE_STEP, DEFAULT_BRUSH_SIZE, DEFAULT_DRIP_PROBABILITY, MIN_BRUSH_SIZE};
use crate::pattern::SprayPattern;

#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("Brush size must be a positive number, got {0}")]
    InvalidSize(f32),
    #[error("Drip probability must be within 0.0-1.0, got {0}")]
    InvalidDripProbability(f32),
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Snapshot of the tool used for one deposit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub color: PaintColor,
    pub pattern: SprayPattern,
    /// Brush size in world units, always > 0
    pub size: f32,
    /// Chance per deposit of spawning a drip, 0.0-1.0
    pub drip_probability: f32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            color: PaintColor::BLACK,
            pattern: SprayPattern::Normal,
            size: DEFAULT_BRUSH_SIZE,
            drip_probability: DEFAULT_DRIP_PROBABILITY,
        }
    }
}

/// The single writable holder of the current tool
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    current: ToolConfig,
}

impl ToolState {
    /// Create a tool state, validating the initial values
    pub fn new(config: ToolConfig) -> Result<Self, ToolError> {
        validate_size(config.size)?;
        validate_drip_probability(config.drip_probability)?;
        Ok(Self { current: config })
    }

    /// Current tool as an immutable value
    pub fn snapshot(&self) -> ToolConfig {
        self.current
    }

    pub fn set_color(&mut self, color: PaintColor) {
        debug!("Tool color -> {}", color);
        self.current.color = color;
    }

    /// Set the color from a hex string such as `#ff0000`
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ToolError> {
        let color = PaintColor::from_hex(hex)?;
        self.set_color(color);
        Ok(())
    }

    pub fn set_pattern(&mut self, pattern: SprayPattern) {
        debug!("Tool pattern -> {}", pattern);
        self.current.pattern = pattern;
    }

    /// Set the pattern from a selector key (unknown keys select `normal`)
    pub fn set_pattern_key(&mut self, key: &str) {
        self.set_pattern(SprayPattern::from_key(key));
    }

    /// Set the brush size; non-positive or non-finite sizes are rejected
    pub fn set_size(&mut self, size: f32) -> Result<(), ToolError> {
        validate_size(size)?;
        debug!("Tool size -> {}", size);
        self.current.size = size;
        Ok(())
    }

    /// Increase the brush size by one step
    pub fn grow_size(&mut self) -> f32 {
        self.current.size += BRUSH_SIZE_STEP;
        self.current.size
    }

    /// Decrease the brush size by one step, never below the minimum
    pub fn shrink_size(&mut self) -> f32 {
        self.current.size = (self.current.size - BRUSH_SIZE_STEP).max(MIN_BRUSH_SIZE);
        self.current.size
    }
}

fn validate_size(size: f32) -> Result<(), ToolError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ToolError::InvalidSize(size))
    }
}

fn validate_drip_probability(p: f32) -> Result<(), ToolError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ToolError::InvalidDripProbability(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        let tool = ToolState::default().snapshot();
        assert_eq!(tool.pattern, SprayPattern::Normal);
        assert_eq!(tool.size, DEFAULT_BRUSH_SIZE);
        assert_eq!(tool.drip_probability, DEFAULT_DRIP_PROBABILITY);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = ToolState::default();
        let before = state.snapshot();
        state.set_pattern(SprayPattern::Spray);
        state.set_size(0.3).unwrap();

        assert_eq!(before.pattern, SprayPattern::Normal);
        assert_eq!(state.snapshot().pattern, SprayPattern::Spray);
        assert_eq!(state.snapshot().size, 0.3);
    }

    #[test]
    fn test_reject_invalid_size() {
        let mut state = ToolState::default();
        assert_eq!(state.set_size(0.0), Err(ToolError::InvalidSize(0.0)));
        assert!(state.set_size(-1.0).is_err());
        assert!(state.set_size(f32::NAN).is_err());
        assert!(state.set_size(f32::INFINITY).is_err());
        assert_eq!(state.snapshot().size, DEFAULT_BRUSH_SIZE);
    }

    #[test]
    fn test_color_hex() {
        let mut state = ToolState::default();
        state.set_color_hex("#ff0000").unwrap();
        assert_eq!(state.snapshot().color, PaintColor::rgb(1.0, 0.0, 0.0));

        assert!(matches!(state.set_color_hex("nope"), Err(ToolError::Color(_))));
        assert_eq!(state.snapshot().color, PaintColor::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_pattern_key_fallback() {
        let mut state = ToolState::default();
        state.set_pattern_key("streak");
        assert_eq!(state.snapshot().pattern, SprayPattern::Streak);
        state.set_pattern_key("unknown");
        assert_eq!(state.snapshot().pattern, SprayPattern::Normal);
    }

    #[test]
    fn test_shrink_stops_at_minimum() {
        let mut state = ToolState::default();
        for _ in 0..10 {
            state.shrink_size();
        }
        assert_eq!(state.snapshot().size, MIN_BRUSH_SIZE);
        let grown = state.grow_size();
        assert!((grown - (MIN_BRUSH_SIZE + BRUSH_SIZE_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_new_validates() {
        let bad = ToolConfig {
            drip_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            ToolState::new(bad),
            Err(ToolError::InvalidDripProbability(_))
        ));
    }
}
