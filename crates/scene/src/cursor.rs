//! Crosshair cursor over the render surface

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};

pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_crosshair_cursor);
    }
}

fn set_crosshair_cursor(mut commands: Commands, windows: Query<Entity, With<PrimaryWindow>>) {
    let Ok(window) = windows.single() else {
        return;
    };
    commands
        .entity(window)
        .insert(CursorIcon::from(SystemCursorIcon::Crosshair));
}
