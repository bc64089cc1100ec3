//! Configuration file handling.
//!
//! The configuration is an optional TOML file. Every key has a default, so an
//! empty or missing file behaves like the built-in settings.

use crate::{
    control::{brightness_controller, ControllerSettings},
    duration,
    error::{BrightnessError, Result},
    external::backlight::discovery::{self, DiscoveryOptions},
};
use serde::Deserialize;
use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backlight_root: PathBuf,
    pub device: Option<String>,
    pub max_level: Option<i64>,
    pub fallback_max_level: i64,
    #[serde(deserialize_with = "duration::deserialize")]
    pub duration: Duration,
    #[serde(deserialize_with = "duration::deserialize")]
    pub step_interval: Duration,
    pub tolerance: i64,
    pub exact_final_write: bool,
    #[serde(deserialize_with = "duration::deserialize")]
    pub adjust_duration: Duration,
    pub adjust_percent: i64,
    pub floor_percent: i64,
    pub pulse_amplitude: i64,
    #[serde(deserialize_with = "duration::deserialize")]
    pub pulse_fade_duration: Duration,
    #[serde(deserialize_with = "duration::deserialize")]
    pub pulse_rest: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let controller = ControllerSettings::default();
        Config {
            backlight_root: PathBuf::from(discovery::DEFAULT_BACKLIGHT_ROOT),
            device: None,
            max_level: None,
            fallback_max_level: discovery::FALLBACK_MAX_LEVEL,
            duration: Duration::from_millis(500),
            step_interval: brightness_controller::STEP_INTERVAL,
            tolerance: brightness_controller::TOLERANCE,
            exact_final_write: controller.exact_final_write,
            adjust_duration: controller.adjust_duration,
            adjust_percent: 5,
            floor_percent: controller.floor_percent,
            pulse_amplitude: 25,
            pulse_fade_duration: controller.pulse_fade_duration,
            pulse_rest: controller.pulse_rest,
        }
    }
}

impl Config {
    /// Location of the configuration file used when none is given explicitly
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bright").join("config.toml"))
    }

    /// Load the configuration from `path`, or from [Config::default_path] if
    /// it's `None`. Only an explicitly given file has to exist.
    pub async fn load(path: Option<&Path>) -> Result<Config> {
        let (path, required) = match path {
            Some(path) => (path.to_owned(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Config::default()),
            },
        };
        match fs::read_to_string(&path).await {
            Ok(contents) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::parse(&path, &contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                log::debug!("No configuration at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(BrightnessError::Config {
                path,
                reason: e.to_string(),
            }),
        }
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents).map_err(|e| BrightnessError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|reason| BrightnessError::Config {
            path: path.to_owned(),
            reason,
        })?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(max_level) = self.max_level {
            if max_level <= 0 {
                return Err(format!("max_level must be positive, not {}", max_level));
            }
        }
        if self.fallback_max_level <= 0 {
            return Err(format!(
                "fallback_max_level must be positive, not {}",
                self.fallback_max_level
            ));
        }
        if self.step_interval.is_zero() {
            return Err("step_interval must be longer than zero".to_owned());
        }
        if self.tolerance < 0 {
            return Err(format!("tolerance can't be negative, is {}", self.tolerance));
        }
        if !(0..=100).contains(&self.floor_percent) {
            return Err(format!(
                "floor_percent must be between 0 and 100, not {}",
                self.floor_percent
            ));
        }
        Ok(())
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            root: self.backlight_root.clone(),
            device: self.device.clone(),
            max_level: self.max_level,
            fallback_max_level: self.fallback_max_level,
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            step_interval: self.step_interval,
            tolerance: self.tolerance,
            exact_final_write: self.exact_final_write,
            adjust_duration: self.adjust_duration,
            floor_percent: self.floor_percent,
            pulse_fade_duration: self.pulse_fade_duration,
            pulse_rest: self.pulse_rest,
        }
    }
}
