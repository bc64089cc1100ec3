use crate::error::Result;
use async_trait::async_trait;

/// A display backlight whose brightness is an integer between zero and
/// [max_level](Backlight::max_level), in the device's native units.
///
/// Implementations don't clamp. Keeping written levels in range is the
/// caller's job.
#[async_trait]
pub trait Backlight: Send + Sync {
    fn max_level(&self) -> i64;
    async fn read_level(&self) -> Result<i64>;
    async fn write_level(&self, level: i64) -> Result<()>;
}
