// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Watermark loading — reads an allow-listed raster image for inline embedding.

use std::path::Path;

use emailstamp_core::ImageKind;
use emailstamp_core::error::{Result, StampError};
use tracing::{info, instrument, warn};

/// A visual stamp image, passed through to the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    kind: ImageKind,
    data: Vec<u8>,
}

impl Watermark {
    /// Wrap image bytes that are already in memory.
    pub fn from_bytes(kind: ImageKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    /// `data:` URI for inline embedding.
    pub fn data_uri(&self) -> String {
        super::data_uri(self.mime_type(), &self.data)
    }
}

/// Load a watermark image from `path`.
///
/// The extension must be `.png`, `.jpg` or `.jpeg` (any case) and is checked
/// before the file is opened. When the file's magic bytes identify the other
/// allowed format, the content wins over the extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_watermark(path: impl AsRef<Path>) -> Result<Watermark> {
    let path = path.as_ref();

    let declared = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ImageKind::from_extension(ext)
            .ok_or_else(|| StampError::UnsupportedFormat(format!(".{}", ext.to_ascii_lowercase())))?,
        None => {
            return Err(StampError::UnsupportedFormat(
                "file has no extension".to_owned(),
            ));
        }
    };

    let data = std::fs::read(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            StampError::FileNotFound(path.to_path_buf())
        } else {
            StampError::Io(err)
        }
    })?;

    let kind = match ImageKind::sniff(&data) {
        Some(sniffed) if sniffed != declared => {
            warn!(
                declared = declared.mime_type(),
                detected = sniffed.mime_type(),
                "watermark content does not match its extension, using detected type"
            );
            sniffed
        }
        Some(sniffed) => sniffed,
        None => {
            warn!(
                declared = declared.mime_type(),
                "watermark content not recognised as PNG or JPEG, trusting extension"
            );
            declared
        }
    };

    info!(mime = kind.mime_type(), size = data.len(), "Watermark loaded");
    Ok(Watermark { kind, data })
}
