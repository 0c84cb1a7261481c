//! Agent configuration.
//!
//! The base directory normally arrives as the single command-line argument
//! configured in `lfs.customtransfer.<name>.args`. A TOML file may supply
//! it instead, together with the log level.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root folder of the object store. Empty means not configured.
    #[serde(default)]
    pub base_dir: String,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Reads a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Builds the effective configuration.
    ///
    /// A non-empty `base_dir` argument overrides the file's value.
    pub fn resolve(base_dir: Option<&str>, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match config_path {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(dir) = base_dir.filter(|d| !d.is_empty()) {
            config.base_dir = dir.to_string();
        }
        Ok(config)
    }

    /// The store root, `None` when not configured.
    pub fn base_dir(&self) -> Option<PathBuf> {
        let dir = self.base_dir.trim();
        if dir.is_empty() {
            None
        } else {
            Some(expand_home(dir))
        }
    }
}

/// Expands a `~` prefix to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    let home = || std::env::var_os("HOME").map(PathBuf::from);
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = home() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.base_dir, "");
        assert_eq!(config.log_level, "info");
        assert!(config.base_dir().is_none());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(r#"base_dir = "/mnt/lfs""#).unwrap();
        assert_eq!(config.base_dir(), Some(PathBuf::from("/mnt/lfs")));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn blank_base_dir_is_unset() {
        let config: Config = toml::from_str("base_dir = \"   \"").unwrap();
        assert!(config.base_dir().is_none());
    }

    #[test]
    fn argument_overrides_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("folderstore.toml");
        std::fs::write(&path, "base_dir = \"/from/file\"\nlog_level = \"warn\"\n").unwrap();

        let from_file = Config::resolve(None, Some(&path)).unwrap();
        assert_eq!(from_file.base_dir, "/from/file");
        assert_eq!(from_file.log_level, "warn");

        let overridden = Config::resolve(Some("/from/arg"), Some(&path)).unwrap();
        assert_eq!(overridden.base_dir, "/from/arg");
        assert_eq!(overridden.log_level, "warn");

        let empty_arg = Config::resolve(Some(""), Some(&path)).unwrap();
        assert_eq!(empty_arg.base_dir, "/from/file");
    }

    #[test]
    fn no_sources_leaves_base_dir_unset() {
        let config = Config::resolve(None, None).unwrap();
        assert!(config.base_dir().is_none());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Config::resolve(None, Some(&tmp.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "base_dir = [").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn expand_home_tilde() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
        let expanded = expand_home("~/lfs-store");
        assert!(expanded.to_string_lossy().ends_with("lfs-store"));
        if std::env::var_os("HOME").is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
        }
    }
}
