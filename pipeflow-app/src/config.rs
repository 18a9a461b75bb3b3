//! The optional `pipeflow.toml` configuration file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use pipeflow_physics::controls::ControlValues;
use pipeflow_plot::{DashboardOptions, GifSettings};
use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "pipeflow.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub reference_image: Option<PathBuf>,
    pub animation_path: PathBuf,
    pub seed: Option<u64>,
    pub gif: GifConfig,
    pub controls: ControlValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_image: None,
            animation_path: PathBuf::from("particle_animation.gif"),
            seed: None,
            gif: GifConfig::default(),
            controls: ControlValues::default(),
        }
    }
}

impl Default for GifConfig {
    fn default() -> Self {
        let GifSettings { width, height } = GifSettings::default();
        Self { width, height }
    }
}

impl Config {
    /// Reads the configuration at `path`, or the defaults if there is no file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::info!("no {} found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Converts the file's settings into dashboard options.
    #[must_use]
    pub fn into_options(self) -> DashboardOptions {
        DashboardOptions {
            reference_image: self.reference_image,
            animation_path: self.animation_path,
            gif: GifSettings {
                width: self.gif.width,
                height: self.gif.height,
            },
            seed: self.seed,
            initial: self.controls.snapped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());

        let options = config.into_options();
        assert_eq!(options.animation_path, PathBuf::from("particle_animation.gif"));
        assert_eq!(options.gif, GifSettings::default());
        assert_eq!(options.initial, ControlValues::default());
        assert!(options.reference_image.is_none());
        assert!(options.seed.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::parse(
            r#"
            reference_image = "assets/regimes.png"
            animation_path = "out/particles.gif"
            seed = 42

            [gif]
            width = 300

            [controls]
            velocity = 0.02
            particle_count = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.reference_image, Some(PathBuf::from("assets/regimes.png")));
        assert_eq!(config.animation_path, PathBuf::from("out/particles.gif"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(
            config.gif,
            GifConfig {
                width: 300,
                height: 400
            }
        );
        assert_eq!(config.controls.particle_count, 50);
        assert_eq!(config.controls.density, ControlValues::default().density);
    }

    #[test]
    fn controls_are_snapped_into_range() {
        let text = "[controls]\nvelocity = 99.0\nanimation_speed = 0\n";
        let config = Config::parse(text).unwrap();
        let options = config.into_options();

        assert!((options.initial.velocity - 10.0).abs() < 1e-12);
        assert_eq!(options.initial.animation_speed, 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("colour = \"blue\"").is_err());
        assert!(Config::parse("[gif]\ndepth = 8").is_err());
        assert!(Config::parse("[controls]\npressure = 1.0").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("pipeflow-no-such-config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir()
            .join(format!("pipeflow-bad-{}.toml", std::process::id()));
        fs::write(&path, "seed = \"not a number\"").unwrap();

        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn directory_is_a_read_error() {
        let result = Config::load(&std::env::temp_dir());
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
