//! Input handling for the native host
//!
//! Pointer painting lives in the scene crate; this module only adds the
//! keyboard shortcuts that stand in for the browser UI controls.

use bevy::input::InputSystems;
use bevy::prelude::*;

mod hotkeys;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, hotkeys::handle_tool_hotkeys.after(InputSystems));

        info!("Input plugin initialized");
    }
}
