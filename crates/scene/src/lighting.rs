//! Ambient lighting
//!
//! The wall and paint use unlit materials, so the scene has a single dim
//! ambient light and nothing else.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::painting_system::PaintingResource;

/// Plugin for the scene's ambient light
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lighting);
    }
}

/// Set the global ambient light from the canvas model
fn setup_lighting(mut commands: Commands, painting: Res<PaintingResource>) {
    let Some(ambient) = painting.canvas.ambient() else {
        return;
    };

    let [r, g, b] = ambient.color.to_array();

    // Global ambient light is a resource, not an entity
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(r, g, b),
        brightness: ambient.brightness,
        ..default()
    });

    info!("Ambient light set to {}", ambient.color);
}
