//! TOML configuration file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use wireframe_core::Visibility;

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Proximity line settings.
    pub wireframe: WireframeConfig,
    /// Point travel settings.
    pub motion: MotionConfig,
    /// Initial population ramp.
    pub seed: SeedConfig,
    /// Render loop and input settings.
    pub stage: StageConfig,
    /// Foreground section content.
    pub chrome: ChromeConfig,
    /// Log output.
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireframeConfig {
    /// Base colour for points and lines (`#rrggbb` or a colour name).
    pub color: String,
    /// Pixel distance below which points are connected.
    pub proximity_radius: f64,
    /// Most lines drawn from one point per frame.
    pub max_connections: usize,
}

impl Default for WireframeConfig {
    fn default() -> Self {
        Self {
            color: "#ff5500".to_string(),
            proximity_radius: 100.0,
            max_connections: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Frames per travel segment.
    pub progress_limit: u32,
    pub travel_distance_min: i64,
    pub travel_distance_max: i64,
    pub control_points_min: i64,
    pub control_points_max: i64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            progress_limit: 60,
            travel_distance_min: 100,
            travel_distance_max: 500,
            control_points_min: 1,
            control_points_max: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of ramp steps; step `i` adds `i` points.
    pub steps: usize,
    /// Seconds between ramp steps.
    pub delay_secs: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            delay_secs: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Show the debug overlay on points added with the mouse.
    pub pointer_debug: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            pointer_debug: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub title: String,
    pub subtitle: String,
    /// Section visibility at startup.
    pub visibility: Visibility,
    /// Navigation and project links shown in the bottom bar.
    pub links: Vec<LinkConfig>,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            title: "wireframe".to_string(),
            subtitle: "click anywhere to add a point".to_string(),
            visibility: Visibility::Visible,
            links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub url: String,
    /// Navigation links replace the current tab, project links open a new one.
    #[serde(default)]
    pub same_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; nothing is logged when unset.
    pub file: Option<PathBuf>,
    /// Default filter directive, `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Parse a colour name or `#rrggbb` string.
pub fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value.trim()).map_err(|_| ConfigError::Invalid(format!("unknown color `{value}`")))
}

impl Config {
    /// Check value ranges. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_color(&self.wireframe.color)?;

        if !(self.wireframe.proximity_radius > 0.0 && self.wireframe.proximity_radius.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "proximity_radius must be positive, got {}",
                self.wireframe.proximity_radius
            )));
        }
        if self.motion.progress_limit == 0 {
            return Err(ConfigError::Invalid("progress_limit must be > 0".to_string()));
        }
        if self.motion.travel_distance_min < 0 || self.motion.travel_distance_min > self.motion.travel_distance_max {
            return Err(ConfigError::Invalid(format!(
                "travel distance range {}..={} is empty or negative",
                self.motion.travel_distance_min, self.motion.travel_distance_max
            )));
        }
        if self.motion.control_points_min < 0 || self.motion.control_points_min > self.motion.control_points_max {
            return Err(ConfigError::Invalid(format!(
                "control point range {}..={} is empty or negative",
                self.motion.control_points_min, self.motion.control_points_max
            )));
        }
        if !(1..=240).contains(&self.stage.frame_rate) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be in [1, 240], got {}",
                self.stage.frame_rate
            )));
        }
        if let Some(link) = self.chrome.links.iter().find(|l| l.url.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("link `{}` has no url", link.label)));
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `config.toml` in the platform config directory.
    pub fn default_path() -> PathBuf {
        crate::dir_or_cwd(
            crate::project_dirs().map(|dirs| dirs.config_dir().to_path_buf()),
            "config.toml",
        )
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured base colour.
    pub fn base_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.wireframe.color)
    }
}
