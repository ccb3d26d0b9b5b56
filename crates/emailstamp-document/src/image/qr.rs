// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR rendering — encodes the content digest text as a scannable PNG.

use emailstamp_core::error::{Result, StampError};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use tracing::{debug, instrument};

/// Pixel size of one QR module.
pub const MODULE_SIZE: u32 = 10;

/// Error correction used for the digest payload (a 64-character hex digest
/// fits in a version 4 code at level L).
pub const ERROR_CORRECTION: EcLevel = EcLevel::L;

/// PNG image of a QR code carrying the digest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannableCode {
    png: Vec<u8>,
}

impl ScannableCode {
    /// Raw PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,…` URI for inline embedding.
    pub fn data_uri(&self) -> String {
        super::data_uri("image/png", self.png_bytes())
    }
}

/// Render `payload` as a black-on-white QR code PNG.
///
/// The smallest QR version that fits is chosen automatically. The image
/// carries the standard 4-module quiet zone.
#[instrument(skip_all, fields(payload_len = payload.len()))]
pub fn render_scannable_code(payload: &str) -> Result<ScannableCode> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), ERROR_CORRECTION)
        .map_err(|err| StampError::QrEncode(err.to_string()))?;

    let bitmap = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();
    debug!(
        version = ?code.version(),
        width = bitmap.width(),
        height = bitmap.height(),
        "QR code rendered"
    );

    let png = encode_png(&DynamicImage::ImageLuma8(bitmap))?;
    Ok(ScannableCode { png })
}

/// Encode a `DynamicImage` as PNG, returning the raw bytes.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| StampError::ImageError(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

    const DIGEST: &str = "e332cfe6d3f67d01b1a28547099c6d07c2b388665dec6b522402a67095ce47aa";

    /// Decode a PNG QR code with an independent decoder.
    fn decode_png(png: &[u8]) -> String {
        let gray = image::load_from_memory(png).unwrap().to_luma8();
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
            gray.get_pixel(x as u32, y as u32).0[0]
        });
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR code");
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn output_is_png() {
        let code = render_scannable_code(DIGEST).unwrap();
        assert!(code.png_bytes().starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!(
            image::guess_format(code.png_bytes()).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn digest_round_trips_through_decoder() {
        let code = render_scannable_code(DIGEST).unwrap();
        assert_eq!(decode_png(code.png_bytes()), DIGEST);
    }

    #[test]
    fn data_uri_payload_decodes_to_the_png() {
        let code = render_scannable_code(DIGEST).unwrap();
        let uri = code.data_uri();
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = BASE64_STANDARD.decode(payload).unwrap();
        assert_eq!(bytes, code.png_bytes());
        assert_eq!(decode_png(&bytes), DIGEST);
    }

    #[test]
    fn image_is_square_and_module_aligned() {
        let code = render_scannable_code(DIGEST).unwrap();
        let img = image::load_from_memory(code.png_bytes()).unwrap();
        assert_eq!(img.width(), img.height());
        assert_eq!(img.width() % MODULE_SIZE, 0);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            render_scannable_code(DIGEST).unwrap(),
            render_scannable_code(DIGEST).unwrap()
        );
    }

    #[test]
    fn data_uri_is_inline_png() {
        let code = render_scannable_code("abc").unwrap();
        assert!(code.data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
