//! Shared graffiti wall scene for TagMaster
//!
//! This crate provides the 3D scene used by both the native Bevy app and
//! the browser WASM build: camera, ambient light, the textured wall, paint
//! input, and the systems that mirror the paint canvas as entities.

use bevy::prelude::*;
use tagmaster_config::AppConfig;
use tagmaster_ipc::BevyToUi;

mod camera;
mod convert;
mod cursor;
mod export;
mod lighting;
mod paint_mode;
mod painting_system;
mod ui_commands;
mod wall;

pub use camera::{CameraPlugin, CurrentLayout, MainCamera};
pub use cursor::CursorPlugin;
pub use export::{ArtworkExported, ExportPlugin, ExportRequest};
pub use lighting::LightingPlugin;
pub use paint_mode::{DepositRequest, PaintMode, PaintModePlugin};
pub use painting_system::{
    PaintMarkEntity, PaintingResource, PaintingSystemPlugin, ResetCanvasEvent, SlidingDrip,
};
pub use ui_commands::{ToolCommandPlugin, UiCommand};
pub use wall::{configured_wall, WallPlugin, WallSurface, WallTexture, WallTextureState};

/// Resource for queuing messages to send to the UI
/// The host layer (native app or WASM bridge) should drain this
#[derive(Resource, Default)]
pub struct OutboundUiMessages {
    pub messages: Vec<BevyToUi>,
}

impl OutboundUiMessages {
    /// Queue a message to be sent to the UI
    pub fn send(&mut self, msg: BevyToUi) {
        self.messages.push(msg);
    }

    /// Take all queued messages, leaving the queue empty
    pub fn drain(&mut self) -> Vec<BevyToUi> {
        std::mem::take(&mut self.messages)
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        // Hosts may insert their own config before adding the plugin
        app.init_resource::<AppConfig>()
            .init_resource::<OutboundUiMessages>();

        let painting = PaintingResource::from_config(&app.world().resource::<AppConfig>().paint);
        app.insert_resource(painting);

        app.add_plugins(CameraPlugin);
        app.add_plugins(LightingPlugin);
        app.add_plugins(WallPlugin);
        app.add_plugins(PaintModePlugin);
        app.add_plugins(PaintingSystemPlugin);
        app.add_plugins(ToolCommandPlugin);
        app.add_plugins(ExportPlugin);
        app.add_plugins(CursorPlugin);

        info!("Scene plugins registered");
    }
}
