// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output writer — persists the finished document atomically.

use std::io::Write;
use std::path::Path;

use emailstamp_core::error::{Result, StampError};
use tracing::{info, instrument};

/// Write `html` to `path`, replacing any existing file.
///
/// The text goes to a temporary file in the destination directory first and
/// is renamed into place, so a failed write never leaves a truncated stamp.
#[instrument(skip_all, fields(path = %path.as_ref().display(), len = html.len()))]
pub fn write_document(html: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = tempfile::Builder::new()
        .prefix(".emailstamp-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(html.as_bytes())?;
    staged.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    staged
        .persist(path)
        .map_err(|err| StampError::Io(err.error))?;
    info!("Stamp written");
    Ok(())
}
