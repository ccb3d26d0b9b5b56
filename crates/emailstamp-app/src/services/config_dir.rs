// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware configuration file resolution.

use std::path::{Path, PathBuf};

use emailstamp_core::StampConfig;
use emailstamp_core::error::Result;
use tracing::debug;

const CONFIG_FILE: &str = "config.json";

/// Conventional location of the configuration file, if a base dir is known.
pub fn default_config_path() -> Option<PathBuf> {
    config_base().map(|base| base.join("emailstamp").join(CONFIG_FILE))
}

fn config_base() -> Option<PathBuf> {
    // Try XDG config dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg));
        }
    }
    std::env::var("HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Load the configuration that applies to this run.
///
/// An explicitly requested file must exist. The conventional file is only
/// read when present; otherwise defaults apply.
pub fn resolve(explicit: Option<&Path>) -> Result<StampConfig> {
    resolve_with_fallback(explicit, default_config_path().as_deref())
}

fn resolve_with_fallback(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<StampConfig> {
    if let Some(path) = explicit {
        return StampConfig::load(path);
    }
    match fallback {
        Some(path) if path.is_file() => StampConfig::load(path),
        _ => {
            debug!("no configuration file, using defaults");
            Ok(StampConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emailstamp_core::StampError;

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let result = resolve_with_fallback(Some(&missing), None);
        assert!(matches!(result, Err(StampError::FileNotFound(_))));
    }

    #[test]
    fn explicit_file_wins_over_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.json");
        let fallback = dir.path().join("fallback.json");
        std::fs::write(&explicit, r#"{ "header": "explicit" }"#).unwrap();
        std::fs::write(&fallback, r#"{ "header": "fallback" }"#).unwrap();

        let config = resolve_with_fallback(Some(&explicit), Some(&fallback)).unwrap();
        assert_eq!(config.header.as_deref(), Some("explicit"));
    }

    #[test]
    fn fallback_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("config.json");
        std::fs::write(&fallback, r#"{ "include_signature_placeholder": false }"#).unwrap();

        let config = resolve_with_fallback(None, Some(&fallback)).unwrap();
        assert!(!config.include_signature_placeholder);
    }

    #[test]
    fn absent_fallback_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_with_fallback(None, Some(&dir.path().join("config.json"))).unwrap();
        assert_eq!(config, StampConfig::default());
        assert_eq!(resolve_with_fallback(None, None).unwrap(), StampConfig::default());
    }
}
