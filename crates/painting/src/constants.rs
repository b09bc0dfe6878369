/// Wall width in world units.
pub const WALL_WIDTH: f32 = 10.0;

/// Wall height in world units.
pub const WALL_HEIGHT: f32 = 5.0;

/// Wall center in world space.
pub const WALL_CENTER: [f32; 3] = [0.0, 1.0, 0.0];

/// Brush size used until the user picks another one.
pub const DEFAULT_BRUSH_SIZE: f32 = 0.1;

/// Smallest brush size reachable through the shrink hotkey.
pub const MIN_BRUSH_SIZE: f32 = 0.05;

/// Brush size change per grow/shrink step.
pub const BRUSH_SIZE_STEP: f32 = 0.05;

/// Chance that a deposit also spawns a drip.
pub const DEFAULT_DRIP_PROBABILITY: f32 = 0.005;

/// Vertical distance between a mark and the drip spawned below it.
pub const DRIP_OFFSET: f32 = 0.2;

/// Distance a sliding drip moves per frame.
pub const DRIP_SLIDE_STEP: f32 = 0.01;

/// Thin lines and streaks are this fraction of the brush size wide.
pub const LINE_WIDTH_RATIO: f32 = 0.1;

/// Number of random base36 characters in an export filename.
pub const EXPORT_SUFFIX_LEN: usize = 6;

/// Prefix of every exported artwork filename.
pub const EXPORT_PREFIX: &str = "TagMaster";
