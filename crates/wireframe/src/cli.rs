use std::path::PathBuf;

use clap::Parser;
use wireframe_config::Config;

/// Wandering points joined by proximity lines, drawn in Braille.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Config file to load instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Distance in canvas pixels below which points are connected.
    #[arg(short, long, value_name = "PX")]
    pub radius: Option<f64>,

    /// Start with an empty canvas instead of the population ramp.
    #[arg(long)]
    pub no_seed: bool,

    /// Show the debug overlay on clicked points.
    #[arg(long, value_name = "BOOL")]
    pub debug_pointer: Option<bool>,
}

impl Cli {
    /// Load the config named on the command line, or the default one.
    pub fn load_config(&self) -> Result<Config, wireframe_config::ConfigError> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Config::load_default(),
        }
    }

    /// Override config values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.log_file {
            config.log.file = Some(path.clone());
        }
        if self.verbose {
            config.log.level = "debug".to_string();
        }
        if let Some(radius) = self.radius {
            config.wireframe.proximity_radius = radius;
        }
        if self.no_seed {
            config.seed.steps = 0;
        }
        if let Some(debug) = self.debug_pointer {
            config.stage.pointer_debug = debug;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::try_parse_from(["wireframe"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "wireframe",
            "--radius",
            "42",
            "--no-seed",
            "--debug-pointer",
            "false",
            "--verbose",
            "--log-file",
            "/tmp/wireframe.log",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.wireframe.proximity_radius, 42.0);
        assert_eq!(config.seed.steps, 0);
        assert!(!config.stage.pointer_debug);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/wireframe.log")));
    }

    #[test]
    fn test_bad_radius_fails_validation() {
        let cli = Cli::try_parse_from(["wireframe", "--radius=-1"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["wireframe", "--config", "/nonexistent/wireframe.toml"]).unwrap();
        assert!(cli.load_config().is_err());
    }
}
