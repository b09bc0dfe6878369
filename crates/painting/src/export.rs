//! Artwork export helpers
//!
//! The renderer captures the frame; this module names the file, encodes
//! the pixels, and decides how the host should hand the file to the user.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{EXPORT_PREFIX, EXPORT_SUFFIX_LEN};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("Cannot export an empty {0}x{1} frame")]
    EmptyFrame(u32, u32),
    #[error("Captured frame cannot be converted to RGBA: {0}")]
    UnsupportedFormat(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// `TagMaster-<6 random base36 chars>.png`
pub fn artwork_filename<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..EXPORT_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{EXPORT_PREFIX}-{suffix}.png")
}

/// Encode a tightly packed RGBA8 buffer as PNG
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyFrame(width, height));
    }

    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(ExportError::BufferSize {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(rgba, width, height, ExtendedColorType::Rgba8)?;
    Ok(png)
}

/// How a host should deliver an exported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportTarget {
    /// Trigger a file download
    Download,
    /// Open the image in a new tab (mobile browsers ignore downloads)
    OpenInTab,
}

impl ExportTarget {
    pub fn for_user_agent(user_agent: &str) -> Self {
        if is_mobile_user_agent(user_agent) {
            Self::OpenInTab
        } else {
            Self::Download
        }
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    const MOBILE_MARKERS: [&str; 5] = ["Android", "iPhone", "iPad", "iPod", "Mobile"];
    MOBILE_MARKERS.iter().any(|m| user_agent.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_filename_format() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let name = artwork_filename(&mut rng);
            let suffix = name
                .strip_prefix("TagMaster-")
                .and_then(|s| s.strip_suffix(".png"))
                .unwrap();
            assert_eq!(suffix.len(), 6);
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_filenames_differ() {
        let mut rng = StdRng::seed_from_u64(8);
        assert_ne!(artwork_filename(&mut rng), artwork_filename(&mut rng));
    }

    #[test]
    fn test_encode_png() {
        let pixels = [255u8, 0, 0, 255].repeat(4 * 3);
        let png = encode_png(4, 3, &pixels).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_encode_rejects_bad_buffers() {
        assert!(matches!(
            encode_png(2, 2, &[0; 15]),
            Err(ExportError::BufferSize { expected: 16, actual: 15, .. })
        ));
        assert!(matches!(encode_png(0, 2, &[]), Err(ExportError::EmptyFrame(0, 2))));
    }

    #[test]
    fn test_export_target() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0";
        assert_eq!(ExportTarget::for_user_agent(iphone), ExportTarget::OpenInTab);
        assert_eq!(ExportTarget::for_user_agent(desktop), ExportTarget::Download);
    }
}
