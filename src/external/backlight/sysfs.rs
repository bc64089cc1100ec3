use super::Backlight;
use crate::error::{BrightnessError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the file holding the current raw brightness of a device.
pub const BRIGHTNESS_FILE: &str = "brightness";
/// Name of the file holding the highest raw brightness a device accepts.
pub const MAX_BRIGHTNESS_FILE: &str = "max_brightness";

/// A [Backlight] which uses the kernel's /sys/class/backlight device class.
///
/// Both reads and writes go directly through the `brightness` file of the
/// device directory, so writing usually requires root or a udev rule granting
/// the user write access to it.
#[derive(Debug, Clone)]
pub struct SysfsBacklight {
    device: String,
    brightness_path: PathBuf,
    max_level: i64,
}

impl SysfsBacklight {
    /// Create a backlight controlling the device in the `device_path`
    /// directory (for example /sys/class/backlight/intel_backlight).
    pub fn new(device_path: impl AsRef<Path>, max_level: i64) -> SysfsBacklight {
        let device_path = device_path.as_ref();
        SysfsBacklight {
            device: device_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            brightness_path: device_path.join(BRIGHTNESS_FILE),
            max_level,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn brightness_path(&self) -> &Path {
        &self.brightness_path
    }
}

#[async_trait]
impl Backlight for SysfsBacklight {
    fn max_level(&self) -> i64 {
        self.max_level
    }

    async fn read_level(&self) -> Result<i64> {
        read_number_from_file(&self.brightness_path).await
    }

    async fn write_level(&self, level: i64) -> Result<()> {
        fs::write(&self.brightness_path, level.to_string())
            .await
            .map_err(|source| BrightnessError::DeviceWrite {
                path: self.brightness_path.clone(),
                level,
                source,
            })
    }
}

pub(super) async fn read_number_from_file(path: &Path) -> Result<i64> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| BrightnessError::DeviceRead {
            path: path.to_owned(),
            source,
        })?;
    contents
        .trim()
        .parse()
        .map_err(|_| BrightnessError::unparsable(path, &contents))
}
