//! Tool commands from the UI
//!
//! Host layers (the WASM bridge, native hotkeys) turn user input into
//! [`UiCommand`] messages. This module applies them to the tool state,
//! forwards reset and save requests, and reports results back through
//! [`OutboundUiMessages`].

use bevy::ecs::message::Message;
use bevy::prelude::*;
use painting::ToolError;
use tagmaster_ipc::{error_codes, BevyToUi, UiToBevy};

use crate::export::ExportRequest;
use crate::painting_system::{PaintingResource, ResetCanvasEvent};
use crate::OutboundUiMessages;

/// A command from the UI controls
#[derive(Message, Debug, Clone)]
pub struct UiCommand(pub UiToBevy);

/// Plugin for applying UI commands
pub struct ToolCommandPlugin;

impl Plugin for ToolCommandPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<UiCommand>()
            .add_systems(Startup, send_initial_tool)
            .add_systems(Update, handle_ui_commands);
    }
}

/// Sync the UI controls with the starting tool
fn send_initial_tool(painting: Res<PaintingResource>, mut outbound: ResMut<OutboundUiMessages>) {
    outbound.send(BevyToUi::Initialize {
        tool: painting.tool_settings(),
    });
}

fn handle_ui_commands(
    mut commands: MessageReader<UiCommand>,
    mut painting: ResMut<PaintingResource>,
    mut resets: MessageWriter<ResetCanvasEvent>,
    mut exports: MessageWriter<ExportRequest>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    for UiCommand(command) in commands.read() {
        let tool = painting.pipeline.tool_mut();
        let result = match command {
            UiToBevy::SetColor { color } => tool.set_color_hex(color).map(|_| true),
            UiToBevy::SetPattern { pattern } => {
                tool.set_pattern_key(pattern);
                Ok(true)
            }
            UiToBevy::SetSize { size } => tool.set_size(*size).map(|_| true),
            UiToBevy::ResetCanvas => {
                resets.write(ResetCanvasEvent);
                Ok(false)
            }
            UiToBevy::SaveArtwork => {
                exports.write(ExportRequest);
                Ok(false)
            }
        };

        match result {
            Ok(true) => outbound.send(BevyToUi::ToolChanged {
                tool: painting.tool_settings(),
            }),
            Ok(false) => {}
            Err(err) => {
                warn!("Rejected UI command {:?}: {}", command, err);
                outbound.send(BevyToUi::error(error_code(&err), err.to_string()));
            }
        }
    }
}

fn error_code(err: &ToolError) -> &'static str {
    match err {
        ToolError::Color(_) => error_codes::INVALID_COLOR,
        ToolError::InvalidSize(_) | ToolError::InvalidDripProbability(_) => {
            error_codes::INVALID_SIZE
        }
    }
}
