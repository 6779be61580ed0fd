//! TOML settings file for the manager.
//!
//! The file is optional.  When given, every key in it is optional too; see
//! [`ManagerSettings`] for the defaults:
//!
//! ```toml
//! config_path = "/data/config.yml"
//! assets_dir = "/data/tools"
//! bind_addr = "127.0.0.1:8080"
//!
//! [icons]
//! git_ref = "v1.2.0"
//! cache_ttl_secs = 600
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ManagerSettings;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads settings from `path`, or returns the defaults when no path is given.
///
/// A path that was given but does not exist is an error.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] if the file cannot be read and
/// [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: Option<&Path>) -> Result<ManagerSettings, SettingsError> {
    let Some(path) = path else {
        return Ok(ManagerSettings::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses settings from TOML text.
pub fn parse_settings(content: &str) -> Result<ManagerSettings, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_path_gives_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings, ManagerSettings::default());
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let settings = parse_settings(
            "config_path = \"/data/config.yml\"\n\n[icons]\ncache_ttl_secs = 600\n",
        )
        .unwrap();

        assert_eq!(settings.config_path, PathBuf::from("/data/config.yml"));
        assert_eq!(settings.icons.cache_ttl(), Duration::from_secs(600));
        assert_eq!(settings.icons.repository, "selfhst/icons");
        assert_eq!(settings.bind_addr.port(), 3000);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        assert_eq!(parse_settings("").unwrap(), ManagerSettings::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("nope.toml"))).unwrap_err();

        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "bind_addr = \"not an address\"\n").unwrap();

        let err = load_settings(Some(&path)).unwrap_err();

        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
