//! Locating the backlight device to control under the sysfs backlight class.

use super::sysfs::{read_number_from_file, SysfsBacklight, BRIGHTNESS_FILE, MAX_BRIGHTNESS_FILE};
use crate::error::{BrightnessError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_stream::{wrappers::ReadDirStream, StreamExt};

pub const DEFAULT_BACKLIGHT_ROOT: &str = "/sys/class/backlight";

/// Maximum level assumed for devices which don't expose a usable
/// `max_brightness` file.
pub const FALLBACK_MAX_LEVEL: i64 = 120_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Directory containing one subdirectory per backlight device.
    pub root: PathBuf,
    /// Use this device instead of scanning the root.
    pub device: Option<String>,
    /// Use this maximum instead of reading `max_brightness`.
    pub max_level: Option<i64>,
    pub fallback_max_level: i64,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        DiscoveryOptions {
            root: PathBuf::from(DEFAULT_BACKLIGHT_ROOT),
            device: None,
            max_level: None,
            fallback_max_level: FALLBACK_MAX_LEVEL,
        }
    }
}

/// Find the backlight to control.
///
/// Without a configured device name, devices are tried in file name order and
/// the first one whose brightness reads as a positive integer wins. Devices
/// which can't be read or contain garbage are skipped.
pub async fn discover(options: &DiscoveryOptions) -> Result<SysfsBacklight> {
    let device_path = match &options.device {
        Some(name) => {
            let path = options.root.join(name);
            read_number_from_file(&path.join(BRIGHTNESS_FILE))
                .await
                .map_err(|e| BrightnessError::DeviceDiscovery {
                    root: options.root.clone(),
                    reason: format!("configured device {} is unusable: {}", name, e),
                })?;
            path
        }
        None => find_first_lit_device(&options.root).await?,
    };
    let max_level = resolve_max_level(&device_path, options).await;
    let backlight = SysfsBacklight::new(&device_path, max_level);
    log::info!(
        "Using backlight {} ({}) with maximum level {}",
        backlight.device(),
        backlight.brightness_path().display(),
        max_level
    );
    Ok(backlight)
}

async fn find_first_lit_device(root: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(root)
        .await
        .map_err(|e| BrightnessError::DeviceDiscovery {
            root: root.to_owned(),
            reason: e.to_string(),
        })?;
    let mut candidates: Vec<PathBuf> = ReadDirStream::new(entries)
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect()
        .await;
    candidates.sort();

    for candidate in candidates {
        match read_number_from_file(&candidate.join(BRIGHTNESS_FILE)).await {
            Ok(level) if level > 0 => return Ok(candidate),
            Ok(level) => log::debug!(
                "Skipping {}, its brightness is {}",
                candidate.display(),
                level
            ),
            Err(e) => log::debug!("Skipping {}: {}", candidate.display(), e),
        }
    }
    Err(BrightnessError::DeviceDiscovery {
        root: root.to_owned(),
        reason: "no device reports a positive brightness".to_owned(),
    })
}

async fn resolve_max_level(device_path: &Path, options: &DiscoveryOptions) -> i64 {
    if let Some(max_level) = options.max_level {
        return max_level;
    }
    match read_number_from_file(&device_path.join(MAX_BRIGHTNESS_FILE)).await {
        Ok(max_level) if max_level > 0 => max_level,
        Ok(max_level) => {
            log::warn!(
                "Device reports maximum brightness {}, assuming {}",
                max_level,
                options.fallback_max_level
            );
            options.fallback_max_level
        }
        Err(e) => {
            log::warn!("{}, assuming maximum level {}", e, options.fallback_max_level);
            options.fallback_max_level
        }
    }
}
