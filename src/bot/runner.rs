//! The capture/decide/act driver loop

use super::aggregator;
use super::archive::ScreenshotArchive;
use super::config::BotConfig;
use super::decision::{Action, DecisionPolicy};
use super::error::{BotError, BotResult};
use super::frame::Frame;
use super::template::TemplateLibrary;
use crate::adb::DeviceControl;
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotState {
    AwaitingDevice,
    Capturing,
    Deciding,
    Acting,
}

/// How one cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Capture failed; the loop is polling for the device to come back
    DeviceUnavailable,
    /// The capture was byte-identical to the previous one; analysis skipped
    UnchangedFrame,
    /// A full cycle ran and executed this action
    Acted(Action),
    /// The exit cue was seen; the loop is done
    Exit,
}

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Interrupted,
    MaxGamesReached,
}

/// Shutdown signal pair; the sender side belongs to the Ctrl-C handler.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

pub struct Bot<D: DeviceControl> {
    device: D,
    library: TemplateLibrary,
    policy: DecisionPolicy,
    config: BotConfig,
    archive: ScreenshotArchive,
    shutdown: watch::Receiver<bool>,
    state: BotState,
    last_fingerprint: Option<u64>,
    waiting_for_device: bool,
}

impl<D: DeviceControl> Bot<D> {
    pub fn new(
        device: D,
        library: TemplateLibrary,
        policy: DecisionPolicy,
        config: BotConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let archive = ScreenshotArchive::new(&config.screenshot_dir, config.max_screenshots);
        Self {
            device,
            library,
            policy,
            config,
            archive,
            shutdown,
            state: BotState::Capturing,
            last_fingerprint: None,
            waiting_for_device: false,
        }
    }

    pub fn state(&self) -> BotState {
        self.state
    }

    fn set_state(&mut self, state: BotState) {
        if self.state != state {
            log::debug!("Bot state: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Sleep that wakes up early on shutdown. Returns true when interrupted.
    async fn pause(&self, duration: Duration) -> bool {
        if duration.is_zero() {
            return *self.shutdown.borrow();
        }
        let mut shutdown = self.shutdown.clone();
        if *shutdown.borrow() {
            return true;
        }
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                changed = shutdown.changed() => match changed {
                    Ok(()) => {
                        if *shutdown.borrow() {
                            return true;
                        }
                    }
                    // Sender gone; no interrupt can arrive anymore, so the
                    // wait runs to completion
                    Err(_) => {
                        sleep.await;
                        return false;
                    }
                },
                _ = &mut sleep => return false,
            }
        }
    }

    /// Drive cycles until the exit cue shows up or the operator interrupts.
    pub async fn run(&mut self) -> BotResult<RunOutcome> {
        log::info!("Bot loop started with {} template(s).", self.library.len());
        loop {
            if *self.shutdown.borrow() {
                return Ok(RunOutcome::Interrupted);
            }
            if let CycleOutcome::Exit = self.run_cycle().await? {
                return Ok(RunOutcome::MaxGamesReached);
            }
        }
    }

    /// One pass of the state machine: capture, dedup, match, decide, act.
    pub async fn run_cycle(&mut self) -> BotResult<CycleOutcome> {
        self.set_state(BotState::Capturing);
        let png = match self.device.capture_frame().await {
            Ok(png) => png,
            Err(e) => {
                self.set_state(BotState::AwaitingDevice);
                if self.waiting_for_device {
                    print!(".");
                    let _ = std::io::stdout().flush();
                } else {
                    log::info!(
                        "Error capturing screenshot ({e}). Waiting until phone is connected."
                    );
                    self.waiting_for_device = true;
                }
                self.pause(self.config.device_poll).await;
                return Ok(CycleOutcome::DeviceUnavailable);
            }
        };
        self.waiting_for_device = false;

        // A frame identical to the last accepted one means nothing moved on
        // screen; this also rejects the stale frame replayed right after a
        // reconnect
        let frame = Frame::new(png);
        log::debug!("Frame fingerprint: {:016x}", frame.fingerprint());
        if self.last_fingerprint == Some(frame.fingerprint()) {
            log::debug!("Screen unchanged; skipping analysis.");
            self.pause(self.config.unchanged_frame_delay).await;
            return Ok(CycleOutcome::UnchangedFrame);
        }
        self.last_fingerprint = Some(frame.fingerprint());

        if let Err(e) = self.archive.save(frame.png()).await {
            log::warn!("Failed to archive capture: {e}");
        }

        self.set_state(BotState::Deciding);
        log::info!("Running image matching...");
        let candidates = match aggregator::find_candidates(
            &frame,
            &self.library,
            self.config.confidence_threshold,
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e @ (BotError::SourceUnavailable | BotError::InvalidImage { .. })) => {
                log::warn!("Discarding frame: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        log::info!("{} candidate(s) over threshold", candidates.len());

        let action = self.policy.decide(&candidates);

        self.set_state(BotState::Acting);
        match &action {
            Action::NoAction => {}
            Action::Tap {
                position,
                delay_before_tap,
                is_ingame,
            } => {
                if !delay_before_tap.is_zero() {
                    log::info!(
                        "Waiting {:.1} seconds before tapping...",
                        delay_before_tap.as_secs_f32()
                    );
                    if self.pause(*delay_before_tap).await {
                        // Interrupted mid-delay; never fire a tap on the way out
                        return Ok(CycleOutcome::Acted(Action::NoAction));
                    }
                }
                if *is_ingame {
                    log::debug!("In-game screen detected.");
                }
                log::info!("Tapping at ({}, {})", position.0, position.1);
                if let Err(e) = self.device.tap(position.0, position.1).await {
                    log::warn!("Tap failed: {e}");
                }
            }
            Action::ExitProgram => {
                log::info!("Max number of games played. Exit program.");
                if let Err(e) = self.device.screen_off().await {
                    log::warn!("Failed to turn the screen off: {e}");
                }
                return Ok(CycleOutcome::Exit);
            }
        }

        self.pause(self.config.cycle_delay).await;
        Ok(CycleOutcome::Acted(action))
    }
}
