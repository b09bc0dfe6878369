//! TagMaster - native graffiti wall

use bevy::prelude::*;
use bevy::window::WindowResolution;
use tagmaster_config::{AppConfig, DisplayConfig};

mod artwork;
mod config;
mod input;

use config::NativeConfig;
use tagmaster_scene::ScenePlugin;

/// Primary window sized from the display configuration
fn primary_window(display: &DisplayConfig) -> Window {
    Window {
        title: "TagMaster".into(),
        resolution: WindowResolution::new(display.width, display.height),
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    }
}

fn main() {
    let mut config = AppConfig::default();

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(primary_window(&config.display)),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                ..default()
            }),
    );

    // Applied after LogPlugin so override warnings are visible
    config::apply_env_overrides(&mut config);
    let native = NativeConfig::from_env();
    info!(
        "Starting TagMaster {}x{} (seed: {:?}, exports to {})",
        config.display.width,
        config.display.height,
        config.paint.seed,
        native.export_dir.display()
    );

    app.insert_resource(config)
        .insert_resource(native)
        .add_plugins(ScenePlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(artwork::ArtworkPlugin)
        .run();
}
