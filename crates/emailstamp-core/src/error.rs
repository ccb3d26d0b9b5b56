// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Email Stamp.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Email Stamp operations.
///
/// Every variant is terminal for the current invocation: nothing is retried,
/// the caller fixes its input and runs again.
#[derive(Debug, Error)]
pub enum StampError {
    // -- Input errors --
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    // -- Rendering errors --
    #[error("QR code generation failed: {0}")]
    QrEncode(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StampError>;
