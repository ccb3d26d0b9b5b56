// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// emailstamp-document — Stamp document generation.
//
// Provides watermark loading (allow-listed raster formats, inline base64),
// QR rendering of the content digest, assembly of the self-contained HTML
// stamp, and an atomic writer for the finished document.

pub mod html;
pub mod image;
pub mod writer;

// Re-export the primary entry points so callers can use `emailstamp_document::assemble` etc.
pub use html::template::{RenderedDocument, StampOptions, assemble};
pub use crate::image::qr::{ScannableCode, render_scannable_code};
pub use crate::image::watermark::{Watermark, load_watermark};
pub use writer::write_document;
