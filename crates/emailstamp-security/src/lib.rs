// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! emailstamp-security — Content integrity for email stamps.
//!
//! Computes the SHA-256 content digest a stamp embeds, and keeps untrusted
//! text from turning into live markup when it is placed in the HTML template.

pub mod integrity;
pub mod sanitize;

// PUBLIC API: Re-export the digest and escaping primitives
pub use integrity::{ContentDigest, compute_digest, hash_bytes};
pub use sanitize::{escape_html, sanitize_html};
