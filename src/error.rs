//! Errors produced while talking to the backlight or interpreting user input

use std::{io, num::ParseIntError, path::PathBuf};
use thiserror::Error;

/// Everything that can go wrong between the command line and the device.
#[derive(Debug, Error)]
pub enum BrightnessError {
    #[error("no usable backlight device found under {root}: {reason}")]
    DeviceDiscovery { root: PathBuf, reason: String },

    #[error("couldn't read brightness from {path}: {source}")]
    DeviceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't write brightness {level} to {path}: {source}")]
    DeviceWrite {
        path: PathBuf,
        level: i64,
        #[source]
        source: io::Error,
    },

    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("invalid target {input:?}: {source}")]
    InvalidPercent {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl BrightnessError {
    /// A read error for content which isn't a plain integer.
    pub fn unparsable(path: impl Into<PathBuf>, content: &str) -> BrightnessError {
        BrightnessError::DeviceRead {
            path: path.into(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{:?} is not an integer", content.trim()),
            ),
        }
    }

    pub fn invalid_duration(input: &str, reason: impl Into<String>) -> BrightnessError {
        BrightnessError::InvalidDuration {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrightnessError>;
