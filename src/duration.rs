//! Parsing of human-written durations such as `500ms`, `1.5s` or `1m30s`.
//!
//! The accepted format is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`).
//! A bare `0` is accepted too. Negative durations are rejected, since there is
//! no way to fade backwards in time.

use crate::error::{BrightnessError, Result};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub fn parse(input: &str) -> Result<Duration> {
    let mut rest = input.trim();
    if let Some(unsigned) = rest.strip_prefix('-') {
        return if unsigned == "0" {
            Ok(Duration::ZERO)
        } else {
            Err(BrightnessError::invalid_duration(input, "duration can't be negative"))
        };
    }
    rest = rest.strip_prefix('+').unwrap_or(rest);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(BrightnessError::invalid_duration(input, "empty duration"));
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(BrightnessError::invalid_duration(input, "expected a number"));
        }
        let unit_length = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_length);
        let unit_nanos = nanos_per_unit(input, unit)?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| BrightnessError::invalid_duration(input, "number too large"))?
        };
        let mut component = whole
            .checked_mul(unit_nanos)
            .ok_or_else(|| BrightnessError::invalid_duration(input, "duration too large"))?;
        let mut scale = unit_nanos;
        for digit in fraction.bytes() {
            scale /= 10;
            if scale == 0 {
                break;
            }
            component += u128::from(digit - b'0') * scale;
        }

        total_nanos += component;
        if total_nanos > u128::from(u64::MAX) {
            return Err(BrightnessError::invalid_duration(input, "duration too large"));
        }
        rest = after;
    }
    Ok(Duration::from_nanos(total_nanos as u64))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn nanos_per_unit(input: &str, unit: &str) -> Result<u128> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(1_000),
        "ms" => Ok(1_000_000),
        "s" => Ok(1_000_000_000),
        "m" => Ok(60 * 1_000_000_000),
        "h" => Ok(3600 * 1_000_000_000),
        "" => Err(BrightnessError::invalid_duration(input, "missing unit")),
        other => Err(BrightnessError::invalid_duration(
            input,
            format!("unknown unit {:?}", other),
        )),
    }
}

/// Deserializes a duration written as a string, for use with
/// `#[serde(deserialize_with = "...")]`.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
