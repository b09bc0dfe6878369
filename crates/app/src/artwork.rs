//! Writing exported artwork to disk
//!
//! The native build has no UI to report to, so scene messages for the UI
//! are logged here as well.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use tagmaster_ipc::{error_codes, BevyToUi};
use tagmaster_scene::{ArtworkExported, OutboundUiMessages};

use crate::config::NativeConfig;

pub struct ArtworkPlugin;

impl Plugin for ArtworkPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (save_exported_artwork, log_outbound_messages).chain());
    }
}

/// Write a PNG into `dir`, returning the full path
fn write_artwork(dir: &Path, filename: &str, png: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, png)?;
    Ok(path)
}

fn save_exported_artwork(
    mut exported: MessageReader<ArtworkExported>,
    config: Res<NativeConfig>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    for artwork in exported.read() {
        match write_artwork(&config.export_dir, &artwork.filename, &artwork.png) {
            Ok(path) => {
                info!("Saved artwork to {}", path.display());
                outbound.send(BevyToUi::ArtworkSaved {
                    filename: artwork.filename.clone(),
                });
            }
            Err(err) => {
                error!("Failed to save {}: {}", artwork.filename, err);
                outbound.send(BevyToUi::error(error_codes::EXPORT_FAILED, err.to_string()));
            }
        }
    }
}

fn log_outbound_messages(mut outbound: ResMut<OutboundUiMessages>) {
    for msg in outbound.drain() {
        match msg {
            BevyToUi::Error { code, message } => warn!("[{}] {}", code, message),
            BevyToUi::CanvasChanged { mark_count } => debug!("Canvas has {} marks", mark_count),
            other => info!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artwork_creates_directory() {
        let dir = std::env::temp_dir()
            .join(format!("tagmaster-test-{}", std::process::id()))
            .join("nested");
        let path = write_artwork(&dir, "TagMaster-abc123.png", b"png").unwrap();

        assert_eq!(path, dir.join("TagMaster-abc123.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png");

        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }
}
