//! Persistent settings for termfolio.
//!
//! The page persists exactly one value: the selected theme, stored
//! under the fixed `site-theme` key in a JSON settings document in
//! the user's config directory. Reads are best-effort; anything
//! missing or malformed degrades to the dark default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::Theme;

/// Settings filename within the config directory.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Storage key for the persisted theme.
pub const THEME_KEY: &str = "site-theme";

/// On-disk settings document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(rename = "site-theme", skip_serializing_if = "Option::is_none")]
    site_theme: Option<Theme>,
}

/// File-backed store for the single persisted key.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// Store rooted at `dir`; the settings file lives directly inside.
    pub fn new(dir: &Path) -> Self {
        ThemeStore {
            path: dir.join(SETTINGS_FILENAME),
        }
    }

    /// Default settings directory: the platform config dir.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termfolio")
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted theme.
    ///
    /// Returns None when the file is absent, unreadable, malformed,
    /// or holds an unknown value. Callers fall back to dark.
    pub fn load(&self) -> Option<Theme> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let settings: Settings = serde_json::from_str(&raw).ok()?;
        settings.site_theme
    }

    /// Write the theme, preserving nothing else; the settings
    /// document has exactly one key.
    pub fn save(&self, theme: Theme) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let settings = Settings {
            site_theme: Some(theme),
        };
        let json = serde_json::to_string_pretty(&settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_none_when_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());

        store.save(Theme::Light).unwrap();
        assert_eq!(store.load(), Some(Theme::Light));

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Some(Theme::Dark));
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = ThemeStore::new(&nested);

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Some(Theme::Dark));
    }

    #[test]
    fn malformed_settings_degrade_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());

        fs::write(store.path(), "not json at all").unwrap();
        assert_eq!(store.load(), None);

        fs::write(store.path(), r#"{"site-theme": "sepia"}"#).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn stored_document_uses_the_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());
        store.save(Theme::Light).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[THEME_KEY], "light");
    }
}
