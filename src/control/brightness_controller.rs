use super::fade::{self, Fade, FadeState};
use crate::{error::Result, external::backlight::Backlight, handle::HandleChild};
use std::time::Duration;
use tokio::time::sleep;

/// Pause between two writes of a fade, giving roughly 60 writes per second.
pub const STEP_INTERVAL: Duration = Duration::from_millis(17);
/// A fade stops stepping once it's this many raw units away from its target.
pub const TOLERANCE: i64 = 100;

/// Tunables of the [BrightnessController].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub step_interval: Duration,
    pub tolerance: i64,
    /// Write the exact target level after a fade stops within tolerance.
    pub exact_final_write: bool,
    /// Fade duration of relative increments and decrements.
    pub adjust_duration: Duration,
    /// Decrements never go below this percentage.
    pub floor_percent: i64,
    pub pulse_fade_duration: Duration,
    /// Pause between two pulse oscillations.
    pub pulse_rest: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings {
            step_interval: STEP_INTERVAL,
            tolerance: TOLERANCE,
            exact_final_write: true,
            adjust_duration: Duration::from_millis(125),
            floor_percent: 1,
            pulse_fade_duration: Duration::from_millis(75),
            pulse_rest: Duration::from_millis(200),
        }
    }
}

/// Fades a [Backlight] between brightness levels.
///
/// Brightness is exposed to users as a percentage and converted to the
/// device's raw level with integer arithmetic. The conversion is lossy in both
/// directions and relative adjustments work on the truncated percentage.
///
/// All operations which take time sleep between writes, so dropping their
/// futures stops them without any further writes. The device keeps whatever
/// level was written last.
pub struct BrightnessController<B: Backlight> {
    backlight: B,
    settings: ControllerSettings,
}

impl<B: Backlight> BrightnessController<B> {
    /// `backlight` has to report a positive maximum level.
    pub fn new(backlight: B, settings: ControllerSettings) -> BrightnessController<B> {
        BrightnessController {
            backlight,
            settings,
        }
    }

    pub fn max_level(&self) -> i64 {
        self.backlight.max_level()
    }

    pub fn percent_to_level(&self, percent: i64) -> i64 {
        percent.saturating_mul(self.max_level()) / 100
    }

    pub fn level_to_percent(&self, level: i64) -> i64 {
        level.saturating_mul(100) / self.max_level()
    }

    pub async fn get_current_level(&self) -> Result<i64> {
        self.backlight.read_level().await
    }

    /// Write a raw level, as is.
    pub async fn set_level(&self, level: i64) -> Result<()> {
        self.backlight.write_level(level).await
    }

    /// Fade from the current level to `target_percent` over `duration`.
    ///
    /// A duration shorter than one step interval jumps straight to the target
    /// with a single write. A failed read aborts the fade before anything is
    /// written, a failed write aborts it on the spot.
    pub async fn fade(&self, target_percent: i64, duration: Duration) -> Result<()> {
        let max_level = self.max_level();
        let target_level = self.percent_to_level(target_percent).clamp(0, max_level);
        let current_level = self.get_current_level().await?;
        let step_count = fade::step_count(duration, self.settings.step_interval);
        let mut plan = Fade::new(
            current_level,
            target_level,
            step_count,
            self.settings.tolerance,
        );
        log::debug!(
            "Fading from {} to {} in {} steps of {}",
            current_level,
            target_level,
            step_count,
            plan.step_size()
        );

        while let Some(level) = plan.next_level() {
            let level = level.clamp(0, max_level);
            log::trace!("Setting level {}", level);
            self.set_level(level).await?;
            if plan.state() == FadeState::Stepping {
                sleep(self.settings.step_interval).await;
            }
        }

        if self.settings.exact_final_write && plan.difference() != 0 {
            log::trace!("Correcting final level to {}", target_level);
            self.set_level(target_level).await?;
        }
        Ok(())
    }

    pub async fn inc_brightness(&self, percent: i64) -> Result<()> {
        let current_percent = self.level_to_percent(self.get_current_level().await?);
        let target = current_percent.saturating_add(percent).min(100);
        log::debug!("Increasing brightness from {}% to {}%", current_percent, target);
        self.fade(target, self.settings.adjust_duration).await
    }

    pub async fn dec_brightness(&self, percent: i64) -> Result<()> {
        let current_percent = self.level_to_percent(self.get_current_level().await?);
        let target = current_percent
            .saturating_sub(percent)
            .max(self.settings.floor_percent);
        log::debug!("Decreasing brightness from {}% to {}%", current_percent, target);
        self.fade(target, self.settings.adjust_duration).await
    }

    /// Oscillate `amplitude` percent above and below the current brightness
    /// until `termination` fires.
    ///
    /// Returns `Ok(())` once terminated, without writing anything afterwards.
    pub async fn pulse(&self, amplitude: i64, termination: &mut HandleChild) -> Result<()> {
        let baseline = self.level_to_percent(self.get_current_level().await?);
        let high = baseline.saturating_add(amplitude).min(100);
        let low = baseline.saturating_sub(amplitude).max(0);
        log::info!("Pulsing between {}% and {}%", low, high);
        loop {
            tokio::select! {
                biased;
                _ = termination.should_terminate() => {
                    log::debug!("Pulse terminated");
                    return Ok(());
                }
                res = self.pulse_cycle(high, low) => res?,
            }
        }
    }

    async fn pulse_cycle(&self, high: i64, low: i64) -> Result<()> {
        self.fade(high, self.settings.pulse_fade_duration).await?;
        self.fade(low, self.settings.pulse_fade_duration).await?;
        sleep(self.settings.pulse_rest).await;
        Ok(())
    }
}
