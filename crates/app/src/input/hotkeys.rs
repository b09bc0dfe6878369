//! Hotkey handling for TagMaster
//!
//! - 1-4: Pick a palette color
//! - +/=: Grow the brush
//! - -: Shrink the brush
//! - P: Next spray pattern
//! - Delete: Clear the wall
//! - Ctrl+S: Save the artwork

use bevy::prelude::*;
use painting::{ToolState, PALETTE};
use tagmaster_ipc::UiToBevy;
use tagmaster_scene::{PaintingResource, UiCommand};

/// Map one key press to a UI command
fn hotkey_command(key: KeyCode, ctrl: bool, tool: &ToolState) -> Option<UiToBevy> {
    if ctrl {
        return (key == KeyCode::KeyS).then_some(UiToBevy::SaveArtwork);
    }

    let palette_index = match key {
        KeyCode::Digit1 => Some(0),
        KeyCode::Digit2 => Some(1),
        KeyCode::Digit3 => Some(2),
        KeyCode::Digit4 => Some(3),
        _ => None,
    };
    if let Some(index) = palette_index {
        return PALETTE.get(index).map(|color| UiToBevy::SetColor {
            color: color.to_hex(),
        });
    }

    match key {
        KeyCode::Equal | KeyCode::NumpadAdd => {
            let mut next = tool.clone();
            Some(UiToBevy::SetSize {
                size: next.grow_size(),
            })
        }
        KeyCode::Minus | KeyCode::NumpadSubtract => {
            let mut next = tool.clone();
            Some(UiToBevy::SetSize {
                size: next.shrink_size(),
            })
        }
        KeyCode::KeyP => Some(UiToBevy::SetPattern {
            pattern: tool.snapshot().pattern.next().key().to_string(),
        }),
        KeyCode::Delete => Some(UiToBevy::ResetCanvas),
        _ => None,
    }
}

/// Turn tool hotkeys into UI commands
pub fn handle_tool_hotkeys(
    key_input: Res<ButtonInput<KeyCode>>,
    painting: Res<PaintingResource>,
    mut commands: MessageWriter<UiCommand>,
) {
    let ctrl = key_input.pressed(KeyCode::ControlLeft) || key_input.pressed(KeyCode::ControlRight);
    let tool = painting.pipeline.tool();

    for key in key_input.get_just_pressed() {
        if let Some(command) = hotkey_command(*key, ctrl, tool) {
            debug!("Hotkey {:?} -> {:?}", key, command);
            commands.write(UiCommand(command));
        }
    }
}
