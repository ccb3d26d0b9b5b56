// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages and process exit codes.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Each error kind gets its own exit code so scripts can tell them apart.

use crate::error::StampError;

/// Process exit codes, one per error kind.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    /// Reserved: clap exits with 2 on a command-line usage error.
    pub const USAGE: u8 = 2;
    pub const UNSUPPORTED_FORMAT: u8 = 3;
    pub const FILE_NOT_FOUND: u8 = 4;
    pub const IO_FAILURE: u8 = 5;
    pub const CONFIG: u8 = 6;
    pub const RENDERING: u8 = 7;
    pub const EMPTY_FIELD: u8 = 8;
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Plain English summary (printed after `Error:`).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Exit status the process should terminate with.
    pub exit_code: u8,
}

/// Convert a `StampError` into a `HumanError` for the command line.
pub fn humanize_error(err: &StampError) -> HumanError {
    match err {
        // -- Input errors --
        StampError::UnsupportedFormat(ext) => HumanError {
            message: format!("Unsupported image format: {ext}"),
            suggestion: "Use a PNG or JPEG stamp image (.png, .jpg, .jpeg).".into(),
            exit_code: exit_code::UNSUPPORTED_FORMAT,
        },

        StampError::FileNotFound(path) => HumanError {
            message: format!("File not found: {}", path.display()),
            suggestion: "Check the path and try again.".into(),
            exit_code: exit_code::FILE_NOT_FOUND,
        },

        StampError::EmptyField(field) => HumanError {
            message: format!("The {field} cannot be empty."),
            suggestion: format!("Pass some text with --{field}."),
            exit_code: exit_code::EMPTY_FIELD,
        },

        // -- Rendering --
        StampError::QrEncode(detail) | StampError::ImageError(detail) => HumanError {
            message: format!("The verification image could not be rendered ({detail})."),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            exit_code: exit_code::RENDERING,
        },

        // -- Configuration --
        StampError::Config(detail) => HumanError {
            message: format!("The configuration file is invalid: {detail}"),
            suggestion: "Fix the value in the configuration file or pass --config with another file.".into(),
            exit_code: exit_code::CONFIG,
        },

        StampError::Serialization(detail) => HumanError {
            message: format!("The configuration file could not be parsed: {detail}"),
            suggestion: "The file must be a JSON object; check for missing quotes or commas.".into(),
            exit_code: exit_code::CONFIG,
        },

        // -- Storage --
        StampError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: format!("Permission denied: {io_err}"),
                    suggestion: "Check the file permissions, or choose a different output path with -o.".into(),
                    exit_code: exit_code::IO_FAILURE,
                }
            } else {
                HumanError {
                    message: format!("There was a problem reading or writing a file: {io_err}"),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    exit_code: exit_code::IO_FAILURE,
                }
            }
        }
    }
}
