//! Native host configuration
//!
//! Starts from [`AppConfig`] defaults and applies `TAGMASTER_*` environment
//! overrides to the paint settings. Unparseable values are logged and
//! ignored.

use std::path::PathBuf;

use bevy::prelude::*;
use tagmaster_config::AppConfig;

/// Seed for the paint RNG, for reproducible sessions
pub const ENV_SEED: &str = "TAGMASTER_SEED";
/// Chance per deposit of a drip, 0.0-1.0
pub const ENV_DRIP_PROBABILITY: &str = "TAGMASTER_DRIP_PROBABILITY";
/// Directory exported PNGs are written to
pub const ENV_EXPORT_DIR: &str = "TAGMASTER_EXPORT_DIR";
/// `1`/`true` to let drips slide down after spawning
pub const ENV_ANIMATE_DRIPS: &str = "TAGMASTER_ANIMATE_DRIPS";

/// Settings only the native host needs
#[derive(Resource, Debug, Clone)]
pub struct NativeConfig {
    pub export_dir: PathBuf,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
        }
    }
}

impl NativeConfig {
    /// Read the export directory from TAGMASTER_EXPORT_DIR
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(ENV_EXPORT_DIR) {
            Some(dir) if !dir.trim().is_empty() => Self {
                export_dir: PathBuf::from(dir),
            },
            _ => Self::default(),
        }
    }
}

/// Apply environment overrides to the paint settings
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {

    if let Some(raw) = lookup(ENV_SEED) {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.paint.seed = Some(seed),
            Err(err) => tracing::warn!("Ignoring {}={:?}: {}", ENV_SEED, raw, err),
        }
    }

    if let Some(raw) = lookup(ENV_DRIP_PROBABILITY) {
        match raw.trim().parse::<f32>() {
            Ok(p) if (0.0..=1.0).contains(&p) => config.paint.drip_probability = p,
            Ok(p) => tracing::warn!("Ignoring {}={}: outside 0.0-1.0", ENV_DRIP_PROBABILITY, p),
            Err(err) => tracing::warn!("Ignoring {}={:?}: {}", ENV_DRIP_PROBABILITY, raw, err),
        }
    }

    if let Some(raw) = lookup(ENV_ANIMATE_DRIPS) {
        config.paint.animate_drips = matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn app_config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, lookup);
        config
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = app_config_from_lookup(lookup(&[]));
        assert_eq!(config.paint.seed, None);
        assert_eq!(config.paint.drip_probability, 0.005);
        assert!(!config.paint.animate_drips);
    }

    #[test]
    fn test_overrides_applied() {
        let config = app_config_from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_DRIP_PROBABILITY, "0.25"),
            (ENV_ANIMATE_DRIPS, "TRUE"),
        ]));
        assert_eq!(config.paint.seed, Some(42));
        assert_eq!(config.paint.drip_probability, 0.25);
        assert!(config.paint.animate_drips);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let config = app_config_from_lookup(lookup(&[
            (ENV_SEED, "abc"),
            (ENV_DRIP_PROBABILITY, "1.5"),
        ]));
        assert_eq!(config.paint.seed, None);
        assert_eq!(config.paint.drip_probability, 0.005);
    }

    #[test]
    fn test_export_dir() {
        let native = NativeConfig::from_lookup(lookup(&[(ENV_EXPORT_DIR, "/tmp/art")]));
        assert_eq!(native.export_dir, PathBuf::from("/tmp/art"));

        let blank = NativeConfig::from_lookup(lookup(&[(ENV_EXPORT_DIR, "  ")]));
        assert_eq!(blank.export_dir, PathBuf::from("."));
    }
}
