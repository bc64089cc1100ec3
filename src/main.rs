//! Smoothly fades the brightness of a Linux display backlight

mod cli;
mod config;
mod control;
mod duration;
mod error;
mod external;
mod handle;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Action, Args};
use config::Config;
use control::BrightnessController;
use external::backlight::{discovery, Backlight};
use flexi_logger::{Logger, LoggerHandle};
use handle::{Handle, HandleChild};
use tokio::signal::unix::{signal, SignalKind};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let logger = match init_logging(args.verbose) {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("Couldn't initialize logging: {:#}", e);
            None
        }
    };

    let result = run(args).await;
    drop(logger);
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let default_spec = if verbose { "debug" } else { "warn" };
    let logger = Logger::try_with_env_or_str(default_spec)?.start()?;
    log_panics::init();
    Ok(logger)
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())
        .await
        .context("Couldn't load configuration")?;
    let action = args.action(&config)?;
    if action == Action::MissingTarget {
        println!("Please set a valid target brightness.");
        return Ok(());
    }

    let backlight = discovery::discover(&config.discovery_options()).await?;
    let controller = BrightnessController::new(backlight, config.controller_settings());

    let (handle, mut termination) = Handle::new();
    tokio::spawn(async move {
        wait_for_termination_signal().await;
        log::info!("Termination requested, stopping");
        handle.await_shutdown().await;
        log::debug!("Stopped");
    });

    Ok(execute(&controller, action, &mut termination).await?)
}

/// Run the action until it finishes or `termination` fires, whichever comes
/// first. Termination is not an error, the brightness is just left wherever
/// it got.
async fn execute<B: Backlight>(
    controller: &BrightnessController<B>,
    action: Action,
    termination: &mut HandleChild,
) -> error::Result<()> {
    if let Action::Pulse(amplitude) = action {
        return controller.pulse(amplitude, termination).await;
    }
    tokio::select! {
        biased;
        _ = termination.should_terminate() => Ok(()),
        res = execute_once(controller, action) => res,
    }
}

async fn execute_once<B: Backlight>(
    controller: &BrightnessController<B>,
    action: Action,
) -> error::Result<()> {
    match action {
        Action::Fade(request) => {
            controller
                .fade(request.target_percent, request.duration)
                .await
        }
        Action::Increase(percent) => controller.inc_brightness(percent).await,
        Action::Decrease(percent) => controller.dec_brightness(percent).await,
        Action::Pulse(_) | Action::MissingTarget => Ok(()),
    }
}

async fn wait_for_termination_signal() {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(e) => {
            log::warn!("Couldn't listen for SIGTERM: {}", e);
            std::future::pending().await
        }
    };
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                log::warn!("Couldn't listen for SIGINT: {}", e);
                terminate.recv().await;
            }
        }
        _ = terminate.recv() => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{control::ControllerSettings, external::backlight::mock::MockBacklight};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_termination_interrupts_fade() {
        let backlight = MockBacklight::new(0, 120000);
        let controller = BrightnessController::new(backlight.clone(), ControllerSettings::default());
        let (handle, mut termination) = Handle::new();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            drop(handle);
        });

        let action = Action::Fade(crate::control::request::FadeRequest {
            target_percent: 100,
            duration: Duration::from_secs(10),
        });
        execute(&controller, action, &mut termination)
            .await
            .expect("Interrupted fade should not fail");
        let written = backlight.writes().len();
        assert!(written > 0 && written < 10);
        assert!(backlight.level() < 120000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_actions_reach_the_device() {
        let backlight = MockBacklight::new(60000, 120000);
        let controller = BrightnessController::new(backlight.clone(), ControllerSettings::default());
        let (_handle, mut termination) = Handle::new();

        execute(&controller, Action::Increase(10), &mut termination)
            .await
            .unwrap();
        assert_eq!(backlight.level(), 72000);
        execute(&controller, Action::Decrease(30), &mut termination)
            .await
            .unwrap();
        assert_eq!(backlight.level(), 36000);
    }
}
