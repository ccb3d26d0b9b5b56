// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content integrity — SHA-256 digest of the canonical message text.

use emailstamp_core::Message;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Lowercase hex SHA-256 digest of a message's canonical form.
///
/// Unsalted and deterministic: anyone holding the subject and body can
/// rebuild `Subject: {subject}\n\n{body}` and compare against the stamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length of the hex text (32 bytes, two characters each).
    pub const HEX_LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Digest the canonical form of `message` (UTF-8 bytes).
pub fn compute_digest(message: &Message) -> ContentDigest {
    let canonical = message.canonical_form();
    let digest = ContentDigest(hash_bytes(canonical.as_bytes()));
    debug!(canonical_len = canonical.len(), %digest, "content digest computed");
    digest
}
