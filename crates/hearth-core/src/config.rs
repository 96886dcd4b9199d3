//! Shell configuration from .hearth/config.toml

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::ManifestId;

const CONFIG_FILENAME: &str = "config.toml";
const HEARTH_DIR: &str = ".hearth";

/// Static configuration the coordinator is constructed with.
///
/// The first-run-experience manifest identity is configuration rather than a
/// lookup against an ambient singleton: an app-opened event for this manifest
/// leaves coordinator state untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShellConfig {
    /// Manifest identity of the first-run-experience app, if the device
    /// ships one.
    pub first_run_manifest: Option<ManifestId>,

    /// Default tracing filter when HEARTH_LOG is unset.
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            first_run_manifest: None,
            log_filter: "hearth=info,warn".to_string(),
        }
    }
}

impl ShellConfig {
    /// Parse a config document, mapping toml failures into [`Error::Config`].
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }
}

/// Load configuration from `<base>/.hearth/config.toml`.
///
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_config(base: &Path) -> ShellConfig {
    let config_path = base.join(HEARTH_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return ShellConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match ShellConfig::parse(&content) {
            Ok(config) => {
                debug!("Loaded config from {:?}", config_path);
                config
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                ShellConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            ShellConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert!(config.first_run_manifest.is_none());
        assert_eq!(config.log_filter, "hearth=info,warn");
    }

    #[test]
    fn test_parse_full_config() {
        let config = ShellConfig::parse(
            r#"
            first-run-manifest = "app://ftu.local/manifest.webapp"
            log-filter = "hearth=debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.first_run_manifest,
            Some(ManifestId::new("app://ftu.local/manifest.webapp"))
        );
        assert_eq!(config.log_filter, "hearth=debug");
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = ShellConfig::parse("first-run-manifest = [").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path());
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let hearth_dir = dir.path().join(HEARTH_DIR);
        std::fs::create_dir_all(&hearth_dir).unwrap();
        std::fs::write(
            hearth_dir.join(CONFIG_FILENAME),
            "first-run-manifest = \"app://ftu.local/manifest.webapp\"\n",
        )
        .unwrap();

        let config = load_config(dir.path());
        assert_eq!(
            config.first_run_manifest,
            Some(ManifestId::new("app://ftu.local/manifest.webapp"))
        );
        // untouched fields keep their defaults
        assert_eq!(config.log_filter, "hearth=info,warn");
    }

    #[test]
    fn test_load_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let hearth_dir = dir.path().join(HEARTH_DIR);
        std::fs::create_dir_all(&hearth_dir).unwrap();
        std::fs::write(hearth_dir.join(CONFIG_FILENAME), "not [ valid toml").unwrap();

        let config = load_config(dir.path());
        assert_eq!(config, ShellConfig::default());
    }
}
