//! Artwork export
//!
//! Saving captures the next rendered frame of the primary window (wall and
//! paint only, the UI lives outside the render surface) and encodes it as
//! PNG. Delivering the bytes is up to the host: the native app writes a
//! file, the browser build downloads it or opens it in a new tab.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured};
use painting::{artwork_filename, encode_png, ExportError};
use tagmaster_ipc::{error_codes, BevyToUi};

use crate::painting_system::PaintingResource;
use crate::OutboundUiMessages;

/// Request to export the current frame
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ExportRequest;

/// An encoded artwork ready for the host to deliver
#[derive(Message, Debug, Clone)]
pub struct ArtworkExported {
    /// `TagMaster-xxxxxx.png`
    pub filename: String,
    pub png: Vec<u8>,
}

/// Frames to wait for a capture before giving up on it
const CAPTURE_TIMEOUT_FRAMES: u32 = 120;

/// Whether a capture is already on its way, and for how many frames
#[derive(Resource, Default, Debug)]
struct ExportState {
    in_flight: Option<u32>,
}

impl ExportState {
    fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    fn start(&mut self) {
        self.in_flight = Some(0);
    }

    fn finish(&mut self) {
        self.in_flight = None;
    }

    /// Count one frame of waiting; returns true when the capture timed out
    fn tick(&mut self) -> bool {
        let Some(frames) = self.in_flight.as_mut() else {
            return false;
        };
        *frames += 1;
        if *frames >= CAPTURE_TIMEOUT_FRAMES {
            self.in_flight = None;
            return true;
        }
        false
    }
}

/// Plugin for PNG export
pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportState>()
            .add_message::<ExportRequest>()
            .add_message::<ArtworkExported>()
            .add_systems(Update, (expire_stale_capture, start_capture).chain());
    }
}

/// Spawn a screenshot of the primary window for each export request
fn start_capture(
    mut commands: Commands,
    mut requests: MessageReader<ExportRequest>,
    mut state: ResMut<ExportState>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    if state.is_in_flight() {
        debug!("Export already in progress, ignoring request");
        return;
    }

    state.start();
    commands
        .spawn(Screenshot::primary_window())
        .observe(finish_capture);
    info!("Capturing frame for export");
}

/// Give up on a capture that never arrived so later saves still work
fn expire_stale_capture(
    mut state: ResMut<ExportState>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    if !state.is_in_flight() {
        return;
    }
    if state.tick() {
        warn!(
            "Frame capture not delivered after {} frames, abandoning export",
            CAPTURE_TIMEOUT_FRAMES
        );
        outbound.send(BevyToUi::error(
            error_codes::EXPORT_FAILED,
            "Frame capture timed out",
        ));
    }
}

/// Encode the captured frame and hand it to the host
fn finish_capture(
    captured: On<ScreenshotCaptured>,
    mut state: ResMut<ExportState>,
    mut painting: ResMut<PaintingResource>,
    mut exported: MessageWriter<ArtworkExported>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    state.finish();

    match encode_capture(captured.image.clone()) {
        Ok(png) => {
            let filename = artwork_filename(painting.pipeline.rng_mut());
            info!("Exported {} ({} bytes)", filename, png.len());
            exported.write(ArtworkExported { filename, png });
        }
        Err(err) => {
            error!("Export failed: {}", err);
            outbound.send(BevyToUi::error(error_codes::EXPORT_FAILED, err.to_string()));
        }
    }
}

fn encode_capture(image: Image) -> Result<Vec<u8>, ExportError> {
    let dynamic = image
        .try_into_dynamic()
        .map_err(|err| ExportError::UnsupportedFormat(err.to_string()))?;
    let rgba = dynamic.to_rgba8();
    encode_png(rgba.width(), rgba.height(), rgba.as_raw())
}
