//! Command line interface

use crate::{
    config::Config,
    control::request::{parse_percent, FadeRequest},
    duration,
    error::Result,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LOW_PERCENT: i64 = 5;
const MID_PERCENT: i64 = 50;
const HIGH_PERCENT: i64 = 100;

/// Set the screen brightness
#[derive(Parser, Debug)]
#[clap(name = "bright", version)]
pub struct Args {
    /// Set a fade duration, such as 500ms or 1.5s
    #[clap(short, long, global = true)]
    pub duration: Option<String>,

    /// Set target brightness level in percent
    #[clap(short, long)]
    pub target: Option<String>,

    /// Read configuration from this file
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log what is being done
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set brightness to low
    #[clap(visible_alias = "lo")]
    Low,
    /// Set brightness to mid
    #[clap(visible_alias = "medium")]
    Mid,
    /// Set brightness to max
    #[clap(visible_aliases = &["hi", "max"])]
    High,
    /// Decrease screen brightness
    Dec {
        /// Percentage points to remove
        percent: Option<String>,
    },
    /// Increase screen brightness
    #[clap(visible_alias = "+")]
    Inc {
        /// Percentage points to add
        percent: Option<String>,
    },
    /// Pulse effect, runs until interrupted
    Pulse {
        /// Percentage points to swing above and below the current brightness
        amplitude: Option<String>,
    },
}

/// What the user asked for, with all input validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fade(FadeRequest),
    Increase(i64),
    Decrease(i64),
    Pulse(i64),
    /// Neither a command nor a target was given
    MissingTarget,
}

impl Args {
    /// Turn the parsed arguments into an [Action], filling in defaults from
    /// the configuration. Fails on malformed durations and percentages.
    pub fn action(&self, config: &Config) -> Result<Action> {
        let fade_duration = match &self.duration {
            Some(raw) => duration::parse(raw)?,
            None => config.duration,
        };
        let fade_to = |target_percent| {
            Action::Fade(FadeRequest {
                target_percent,
                duration: fade_duration,
            })
        };
        let percent_or = |raw: &Option<String>, default: i64| -> Result<i64> {
            raw.as_deref().map_or(Ok(default), parse_percent)
        };

        Ok(match &self.command {
            Some(Command::Low) => fade_to(LOW_PERCENT),
            Some(Command::Mid) => fade_to(MID_PERCENT),
            Some(Command::High) => fade_to(HIGH_PERCENT),
            Some(Command::Dec { percent }) => {
                Action::Decrease(percent_or(percent, config.adjust_percent)?)
            }
            Some(Command::Inc { percent }) => {
                Action::Increase(percent_or(percent, config.adjust_percent)?)
            }
            Some(Command::Pulse { amplitude }) => {
                Action::Pulse(percent_or(amplitude, config.pulse_amplitude)?)
            }
            None => match &self.target {
                Some(target) => fade_to(parse_percent(target)?),
                None => Action::MissingTarget,
            },
        })
    }
}
