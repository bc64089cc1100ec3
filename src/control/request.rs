use crate::{
    duration,
    error::{BrightnessError, Result},
};
use std::time::Duration;

/// A request to fade to a brightness percentage over some duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeRequest {
    pub target_percent: i64,
    pub duration: Duration,
}

impl FadeRequest {
    /// Build a request from user-supplied strings. Validation happens here, so
    /// a malformed request never touches the device.
    pub fn parse(target: &str, fade_duration: &str) -> Result<FadeRequest> {
        Ok(FadeRequest {
            target_percent: parse_percent(target)?,
            duration: duration::parse(fade_duration)?,
        })
    }
}

/// Parse a percentage. Values outside of 0-100 are accepted here and clamped
/// later, when they're converted to a device level.
pub fn parse_percent(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed
        .strip_suffix('%')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|source| BrightnessError::InvalidPercent {
            input: input.to_owned(),
            source,
        })
}
