//! IPC message protocol for TagMaster
//!
//! Defines the messages exchanged between the scene and the UI controls
//! (color picker, pattern selector, size slider, reset and save buttons).
//! In the browser build these travel as JSON in CustomEvent details; the
//! native build constructs them directly from hotkeys.

use serde::{Deserialize, Serialize};

mod error;

pub use error::IpcError;

/// Messages from the scene to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BevyToUi {
    /// Initial state sync when the scene starts
    Initialize { tool: ToolSettings },

    /// The tool changed (from a hotkey or a normalized UI value)
    ToolChanged { tool: ToolSettings },

    /// Number of marks on the wall changed
    CanvasChanged { mark_count: usize },

    /// An export finished and was handed to the host
    ArtworkSaved { filename: String },

    /// Error notification
    Error { code: String, message: String },
}

/// Messages from the UI to the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToBevy {
    /// Color picker changed, `#rrggbb`
    SetColor { color: String },

    /// Pattern selector changed; unknown keys select `normal`
    SetPattern { pattern: String },

    /// Size slider moved
    SetSize { size: f32 },

    /// Clear every mark from the wall
    ResetCanvas,

    /// Export the current frame as PNG
    SaveArtwork,
}

/// Tool state as shown by the UI controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// `#rrggbb`
    pub color: String,
    pub pattern: String,
    pub size: f32,
}

/// Error codes carried by [`BevyToUi::Error`]
pub mod error_codes {
    pub const INVALID_COLOR: &str = "invalid_color";
    pub const INVALID_SIZE: &str = "invalid_size";
    pub const EXPORT_FAILED: &str = "export_failed";
    pub const TEXTURE_LOAD_FAILED: &str = "texture_load_failed";
}

impl UiToBevy {
    /// Parse a JSON message from the UI
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        if json.trim().is_empty() {
            return Err(IpcError::InvalidFormat("empty message".to_string()));
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl BevyToUi {
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize for delivery to the UI
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
