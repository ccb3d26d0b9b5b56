// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stamp configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, StampError};
use crate::types::{SignaturePlaceholder, SignatureStyle};

/// Default destination for the rendered stamp.
pub const DEFAULT_OUTPUT: &str = "email_stamped.html";

/// Persistent defaults for stamp generation.
///
/// Every field is optional in the JSON file; missing fields fall back to
/// [`StampConfig::default`]. Command-line flags override these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    /// Text or basic HTML shown above the subject. Not part of the digest.
    pub header: Option<String>,
    /// Text or basic HTML shown after the signature block. Not part of the digest.
    pub footer: Option<String>,
    /// Whether the signature placeholder block is rendered.
    pub include_signature_placeholder: bool,
    /// Heading flavour of the signature placeholder.
    pub signature_style: SignatureStyle,
    /// Key identifier printed inside the placeholder.
    pub key_id: Option<String>,
    /// Key file path printed inside the placeholder when no key ID is set.
    pub key_file: Option<String>,
    /// Output path used when none is given on the command line.
    pub output: String,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            header: None,
            footer: None,
            include_signature_placeholder: true,
            signature_style: SignatureStyle::Inline,
            key_id: None,
            key_file: None,
            output: DEFAULT_OUTPUT.to_owned(),
        }
    }
}

impl StampConfig {
    /// Read a configuration file.
    ///
    /// A missing file is reported as [`StampError::FileNotFound`]; malformed
    /// JSON as [`StampError::Serialization`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                StampError::FileNotFound(path.to_path_buf())
            } else {
                StampError::Io(err)
            }
        })?;
        let config: Self = serde_json::from_str(&data)?;
        if config.output.trim().is_empty() {
            return Err(StampError::Config("`output` must not be empty".into()));
        }
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Signature placeholder settings derived from this configuration.
    pub fn signature_placeholder(&self) -> SignaturePlaceholder {
        SignaturePlaceholder {
            style: self.signature_style,
            key_id: self.key_id.clone(),
            key_file: self.key_file.clone(),
        }
    }
}
