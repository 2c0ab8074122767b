//! Configuration and persisted preferences for the wireframe animation.

mod config;
mod error;
mod preferences;

pub use config::{
    ChromeConfig, Config, LinkConfig, LogConfig, MotionConfig, SeedConfig, StageConfig,
    WireframeConfig, parse_color,
};
pub use error::ConfigError;
pub use preferences::{PreferenceStore, THEME_PREFERENCE_KEY};

use std::path::PathBuf;

use directories::ProjectDirs;

/// Project directories for the application, if a home directory is known.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "wireframe")
}

/// Fallback to the working directory when no home directory is available.
fn dir_or_cwd(dir: Option<PathBuf>, file: &str) -> PathBuf {
    dir.map(|d| d.join(file)).unwrap_or_else(|| PathBuf::from(file))
}
