//! TagMaster WASM Build
//!
//! Compiles the graffiti wall to WebAssembly. The scene renders into the
//! page's `#tagmaster-canvas` while the HTML controls (color picker,
//! pattern selector, size slider, reset and save buttons) talk to it
//! through the bridge.

use bevy::prelude::*;
use tagmaster_ipc::{error_codes, BevyToUi};
use tagmaster_scene::{ArtworkExported, OutboundUiMessages, PaintingResource, ScenePlugin, UiCommand};
use wasm_bindgen::prelude::*;

mod bridge;

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if let Err(e) = bridge::init_bridge() {
        web_sys::console::error_1(&e);
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "TagMaster".to_string(),
                        canvas: Some("#tagmaster-canvas".to_string()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .add_plugins(ScenePlugin)
        .add_plugins(BrowserBridgePlugin)
        .run();
}

/// Plugin connecting the scene to the page through the bridge
pub struct BrowserBridgePlugin;

impl Plugin for BrowserBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, forward_ui_messages).add_systems(
            Last,
            (deliver_exported_artwork, track_unsaved_paint, flush_outbound_messages).chain(),
        );
    }
}

/// Turn queued page messages into scene commands
fn forward_ui_messages(mut commands: MessageWriter<UiCommand>) {
    while let Some(msg) = bridge::poll_ui_message() {
        debug!("UI message: {:?}", msg);
        commands.write(UiCommand(msg));
    }
}

fn deliver_exported_artwork(
    mut exported: MessageReader<ArtworkExported>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    for artwork in exported.read() {
        match bridge::deliver_artwork(&artwork.filename, &artwork.png) {
            Ok(target) => {
                info!("Delivered {} ({:?})", artwork.filename, target);
                outbound.send(BevyToUi::ArtworkSaved {
                    filename: artwork.filename.clone(),
                });
            }
            Err(e) => {
                error!("Failed to deliver {}: {:?}", artwork.filename, e);
                outbound.send(BevyToUi::error(
                    error_codes::EXPORT_FAILED,
                    format!("Could not save {}", artwork.filename),
                ));
            }
        }
    }
}

fn track_unsaved_paint(painting: Res<PaintingResource>) {
    if painting.is_changed() {
        bridge::set_has_paint(!painting.canvas.is_blank());
    }
}

fn flush_outbound_messages(mut outbound: ResMut<OutboundUiMessages>) {
    for msg in outbound.drain() {
        if let Err(e) = bridge::send_to_ui(&msg) {
            web_sys::console::error_1(&e);
        }
    }
}
