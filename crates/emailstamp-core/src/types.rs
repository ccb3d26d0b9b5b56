// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Email Stamp.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StampError};

/// The subject/body pair a stamp is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

impl Message {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// The exact text the content digest is computed over.
    ///
    /// The `Subject: ` prefix and the blank-line separator are part of the
    /// format; recipients rebuild this string to recompute the digest.
    pub fn canonical_form(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }

    /// Reject a blank subject or body.
    ///
    /// Only the command-line front end enforces this; the digest itself is
    /// defined for any text, including empty strings.
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(StampError::EmptyField("subject"));
        }
        if self.body.trim().is_empty() {
            return Err(StampError::EmptyField("body"));
        }
        Ok(())
    }
}

/// Raster formats accepted for watermark images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Png,
    Jpeg,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

impl ImageKind {
    /// MIME type string used in `data:` URIs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Infer the image kind from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Identify the image kind from its leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&PNG_SIGNATURE) {
            Some(Self::Png)
        } else if data.starts_with(&JPEG_SIGNATURE) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

/// Flavour of the signature placeholder heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureStyle {
    #[default]
    Inline,
    Detached,
    #[serde(rename = "clear")]
    ClearText,
}

impl SignatureStyle {
    /// Label shown in the placeholder heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inline => "Inline Signature",
            Self::Detached => "Detached Signature",
            Self::ClearText => "Clear Text Signature",
        }
    }
}

impl std::str::FromStr for SignatureStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "detached" => Ok(Self::Detached),
            "clear" | "clear-text" | "cleartext" => Ok(Self::ClearText),
            other => Err(format!(
                "unknown signature style `{other}` (expected inline, detached or clear)"
            )),
        }
    }
}

impl std::fmt::Display for SignatureStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = match self {
            Self::Inline => "inline",
            Self::Detached => "detached",
            Self::ClearText => "clear",
        };
        f.write_str(keyword)
    }
}

/// Describes where an externally produced signature would be inserted.
///
/// Nothing is signed; this only shapes the boilerplate text of the block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePlaceholder {
    pub style: SignatureStyle,
    pub key_id: Option<String>,
    pub key_file: Option<String>,
}

impl SignaturePlaceholder {
    /// Key description line; a key ID takes precedence over a key file.
    pub fn key_info(&self) -> String {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        match (non_empty(&self.key_id), non_empty(&self.key_file)) {
            (Some(id), _) => format!("Key ID: {id}"),
            (None, Some(file)) => format!("Key file: {file}"),
            (None, None) => "No key configured".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_uses_literal_prefix_and_blank_line() {
        let msg = Message::new("X", "Y");
        assert_eq!(msg.canonical_form(), "Subject: X\n\nY");
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert!(matches!(
            Message::new("  ", "body").validate(),
            Err(StampError::EmptyField("subject"))
        ));
        assert!(matches!(
            Message::new("subject", "\n").validate(),
            Err(StampError::EmptyField("body"))
        ));
        assert!(Message::new("s", "b").validate().is_ok());
    }

    #[test]
    fn image_kind_from_extension() {
        assert_eq!(ImageKind::from_extension("PNG"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("Jpeg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("gif"), None);
        assert_eq!(ImageKind::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn image_kind_sniffs_magic_bytes() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(ImageKind::sniff(&png), Some(ImageKind::Png));
        assert_eq!(ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(b"GIF89a"), None);
        assert_eq!(ImageKind::sniff(&[]), None);
    }

    #[test]
    fn signature_style_parses_and_displays() {
        assert_eq!("Detached".parse::<SignatureStyle>(), Ok(SignatureStyle::Detached));
        assert_eq!("clear".parse::<SignatureStyle>(), Ok(SignatureStyle::ClearText));
        assert!("armoured".parse::<SignatureStyle>().is_err());
        assert_eq!(SignatureStyle::ClearText.to_string(), "clear");
        assert_eq!(SignatureStyle::default().label(), "Inline Signature");
    }

    #[test]
    fn key_info_prefers_key_id() {
        let mut placeholder = SignaturePlaceholder::default();
        assert_eq!(placeholder.key_info(), "No key configured");

        placeholder.key_file = Some("/keys/me.asc".into());
        assert_eq!(placeholder.key_info(), "Key file: /keys/me.asc");

        placeholder.key_id = Some("0xDEADBEEF".into());
        assert_eq!(placeholder.key_info(), "Key ID: 0xDEADBEEF");

        placeholder.key_id = Some("   ".into());
        assert_eq!(placeholder.key_info(), "Key file: /keys/me.asc");
    }
}
