// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — watermark loading and QR rendering, both embedded inline.

pub mod qr;
pub mod watermark;

pub use qr::ScannableCode;
pub use watermark::Watermark;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

/// Build a `data:` URI so an image can be embedded without external links.
pub(crate) fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", BASE64_STANDARD.encode(bytes))
}
