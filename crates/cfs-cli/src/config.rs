use std::path::Path;

use anyhow::Context;
use cfs_tree::FsConfig;
use serde::{Deserialize, Serialize};

/// Configuration read from `--config`.
///
/// ```toml
/// [store]
/// verify_remote_reads = true
/// max_coalesced_requests = 1024
///
/// [import]
/// skip_hidden = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub store: FsConfig,
    pub import: ImportConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub skip_hidden: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { skip_hidden: true }
    }
}

impl CliConfig {
    /// Read `path`, or fall back to defaults when none is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert!(config.import.skip_hidden);
        assert_eq!(config.store, FsConfig::default());
    }

    #[test]
    fn partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfs.toml");
        std::fs::write(&path, "[store]\nmax_coalesced_requests = 8\n").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.store.max_coalesced_requests, 8);
        assert!(config.store.verify_remote_reads);
        assert!(config.import.skip_hidden);
    }

    #[test]
    fn unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
