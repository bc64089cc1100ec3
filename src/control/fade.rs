//! Step computation for fades, kept free of I/O and timing.

use std::time::Duration;

/// Lifecycle of a single fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Idle,
    Stepping,
    Done,
}

/// Number of whole step intervals which fit into `duration`.
pub fn step_count(duration: Duration, step_interval: Duration) -> u64 {
    if step_interval.is_zero() {
        return 0;
    }
    u64::try_from(duration.as_nanos() / step_interval.as_nanos()).unwrap_or(u64::MAX)
}

/// The sequence of levels a fade passes through on its way from the current
/// level to the target level.
///
/// Every step moves the level by a fixed step size, computed once as the
/// initial difference divided by the step count. Stepping stops once the
/// remaining difference is within `tolerance`, so the last level produced is
/// usually close to, but not exactly at, the target. A step never overshoots
/// the target and always moves by at least one unit. With a step count of zero
/// the target is produced right away as the only level.
#[derive(Debug, Clone)]
pub struct Fade {
    current_level: i64,
    target_level: i64,
    step_size: i64,
    tolerance: i64,
    immediate: bool,
    state: FadeState,
}

impl Fade {
    pub fn new(current_level: i64, target_level: i64, step_count: u64, tolerance: i64) -> Fade {
        let difference = current_level - target_level;
        let step_size = match i64::try_from(step_count) {
            Ok(0) => difference,
            Ok(count) => difference / count,
            Err(_) => 0,
        };
        Fade {
            current_level,
            target_level,
            step_size,
            tolerance: tolerance.max(0),
            immediate: step_count == 0,
            state: FadeState::Idle,
        }
    }

    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn step_size(&self) -> i64 {
        self.step_size
    }

    /// Distance between the last produced level and the target.
    pub fn difference(&self) -> i64 {
        self.current_level - self.target_level
    }

    /// Advance the fade by one step, returning the level which should be
    /// written, or `None` once the fade is done.
    pub fn next_level(&mut self) -> Option<i64> {
        match self.state {
            FadeState::Done => return None,
            FadeState::Idle if self.immediate => {
                self.state = FadeState::Done;
                self.current_level = self.target_level;
                return Some(self.target_level);
            }
            FadeState::Idle => self.state = FadeState::Stepping,
            FadeState::Stepping => {}
        }

        let difference = self.difference();
        if difference.abs() <= self.tolerance {
            self.state = FadeState::Done;
            return None;
        }
        let step = if self.step_size == 0 {
            difference.signum()
        } else {
            self.step_size
        };
        self.current_level = if step.abs() >= difference.abs() {
            self.target_level
        } else {
            self.current_level - step
        };
        Some(self.current_level)
    }
}
