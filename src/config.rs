//! Persisted configuration — categories, window geometry, sash position.
//!
//! Stored as a single JSON object, read once at startup and rewritten in
//! full after every mutating action and at shutdown.  A missing file (or a
//! missing key) silently falls back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::store::CategoryStore;

/// Minimum sash offset — the category pane is never narrower than this.
pub const MIN_SASH: u16 = 20;

/// Last known window dimensions.  These follow the terminal around rather
/// than driving it: the deck can't resize the terminal, but the field is
/// kept in the persisted format for parity with the original layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// The whole persisted state of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub categories: CategoryStore,
    pub window_size: WindowSize,
    /// Horizontal offset of the pane divider, in columns.
    pub sash_position: u16,
    /// External editor invoked with a script path as its only argument.
    pub editor: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            categories: CategoryStore::with_defaults(),
            window_size: WindowSize::default(),
            sash_position: MIN_SASH,
            editor: "code".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, substituting defaults when the file is absent or
    /// unreadable.  A file that exists but fails to parse also falls back —
    /// a corrupt config should not keep the deck from starting.
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<AppConfig>(&contents) {
            Ok(mut config) => {
                config.sash_position = config.sash_position.max(MIN_SASH);
                config
            }
            Err(e) => {
                tracing::warn!("config parse failed ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Rewrite the full configuration to `path`, creating parent directories
    /// on demand.  Synchronous and blocking — the file is small.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Default config file location (`<platform config dir>/script-deck/config.json`).
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "script-deck")
        .map(|dirs| dirs.config_dir().join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Default log file location (`<platform data dir>/script-deck/script-deck.log`).
pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", "script-deck")
        .map(|dirs| dirs.data_dir().join("script-deck.log"))
        .unwrap_or_else(|| PathBuf::from("script-deck.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.json"));

        assert_eq!(
            config.categories.names(),
            vec!["General", "Restart tools", "Admin tools", "AI tools"]
        );
        assert_eq!(config.window_size, WindowSize { width: 800, height: 600 });
        assert_eq!(config.sash_position, MIN_SASH);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.categories.add_category("Tools").unwrap();
        config
            .categories
            .add_scripts("Tools", ["a.bat", "b.ps1"])
            .unwrap();
        config.window_size = WindowSize { width: 1024, height: 768 };
        config.sash_position = 42;
        config.save(&path).unwrap();

        let back = AppConfig::load(&path);
        assert_eq!(back, config);
    }

    #[test]
    fn missing_keys_fall_back_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"categories": {"Only": ["x.bat"]}}"#).unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.categories.names(), vec!["Only"]);
        assert_eq!(config.window_size, WindowSize::default());
        assert_eq!(config.sash_position, MIN_SASH);
        assert_eq!(config.editor, "code");
    }

    #[test]
    fn sash_below_minimum_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sash_position": 3}"#).unwrap();

        assert_eq!(AppConfig::load(&path).sash_position, MIN_SASH);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }
}
