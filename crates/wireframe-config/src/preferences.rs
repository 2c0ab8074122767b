//! Persistent key-value preferences.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use wireframe_core::Theme;

use crate::error::ConfigError;

/// Key under which the chosen theme is stored.
pub const THEME_PREFERENCE_KEY: &str = "user-theme-preference";

/// String preferences persisted as a flat TOML table.
///
/// Every `set` writes the file through, so a preference survives a crash of
/// the render loop.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self, ConfigError> {
        Self::open(Self::default_path())
    }

    /// `preferences.toml` in the platform data directory.
    pub fn default_path() -> PathBuf {
        crate::dir_or_cwd(
            crate::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()),
            "preferences.toml",
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and write the file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    /// The stored theme; absent or unreadable values fall back to the default.
    pub fn theme(&self) -> Theme {
        self.get(THEME_PREFERENCE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ConfigError> {
        self.set(THEME_PREFERENCE_KEY, theme.as_str())
    }

    fn persist(&self) -> Result<(), ConfigError> {
        let content = toml::to_string(&self.values)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}
