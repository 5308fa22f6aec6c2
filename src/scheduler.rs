//! Single-active-effect scheduler.
//!
//! Owns the strip driver and the lifecycle of at most one running animation.
//! All starts, stops and structural changes arrive as [`StripCommand`]s on
//! one bounded channel, so motion-triggered and HTTP-triggered starts are
//! serialized through the same entry point and can never race.
//!
//! Effects are plain state inside the single render loop: superseding or
//! stopping one is a state swap applied between frames, never a task kill,
//! so the state lock cannot be orphaned mid-frame. The platform task drives
//! the loop, sleeping for whatever [`FrameResult`] reports; per-effect frames
//! are strictly sequential by construction.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::{Duration, Instant};
use log::{error, info, warn};

use crate::StripDriver;
use crate::channel::{Channel, Receiver, Sender};
use crate::color::Rgb;
use crate::effect::{EffectKind, EffectSlot, StepOutcome};
use crate::state::{LockBusy, SharedStrip};

/// Poll period of the render loop while no effect is active.
pub const IDLE_TICK: Duration = Duration::from_millis(50);

/// Retry delay after a skipped frame (state lock busy).
const LOCK_RETRY: Duration = Duration::from_millis(10);

/// Consecutive skipped frames before the stall is escalated in the log.
const LOCK_STALL_LIMIT: u32 = 100;

/// Commands consumed by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripCommand {
    /// Start an effect, superseding whatever is running.
    Start(EffectKind),
    /// Stop the running effect (if any) and clear the strip.
    Stop,
    /// Flip the traveling-wave direction.
    ToggleWaveDirection,
    /// Resize the strip; stops the running effect first.
    SetLength(u16),
}

pub type CommandChannel<const CAPACITY: usize> = Channel<StripCommand, CAPACITY>;
pub type CommandSender<'a, const CAPACITY: usize> = Sender<'a, StripCommand, CAPACITY>;
pub type CommandReceiver<'a, const CAPACITY: usize> = Receiver<'a, StripCommand, CAPACITY>;

/// Scheduler state observable lock-free from other tasks.
pub struct EngineStatus {
    animating: AtomicBool,
}

impl EngineStatus {
    pub const fn new() -> Self {
        Self {
            animating: AtomicBool::new(false),
        }
    }

    /// Whether an animated effect is currently running.
    pub fn is_animating(&self) -> bool {
        self.animating.load(Ordering::Relaxed)
    }

    fn set_animating(&self, animating: bool) {
        self.animating.store(animating, Ordering::Relaxed);
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the next tick is due.
    pub next_deadline: Instant,
    /// How long the driving task should sleep before the next tick.
    pub sleep_duration: Duration,
}

/// The effect scheduler and render loop core.
pub struct EffectScheduler<'a, D, const MAX_LEDS: usize, const COMMANDS: usize> {
    driver: D,
    strip: &'a SharedStrip<MAX_LEDS>,
    commands: CommandReceiver<'a, COMMANDS>,
    status: &'a EngineStatus,
    active: Option<EffectSlot>,
    /// Frame copied out of the state lock for transmission.
    tx_frame: [Rgb; MAX_LEDS],
    /// Consecutive ticks skipped because the state lock was busy.
    skipped: u32,
}

impl<'a, D, const MAX_LEDS: usize, const COMMANDS: usize>
    EffectScheduler<'a, D, MAX_LEDS, COMMANDS>
where
    D: StripDriver,
{
    pub fn new(
        driver: D,
        strip: &'a SharedStrip<MAX_LEDS>,
        commands: CommandReceiver<'a, COMMANDS>,
        status: &'a EngineStatus,
    ) -> Self {
        Self {
            driver,
            strip,
            commands,
            status,
            active: None,
            tx_frame: [Rgb::default(); MAX_LEDS],
            skipped: 0,
        }
    }

    /// Kind of the currently running effect, if any.
    pub fn current_effect(&self) -> Option<EffectKind> {
        self.active.as_ref().map(EffectSlot::kind)
    }

    /// Process pending commands and render one frame.
    ///
    /// Returns how long the driving task should sleep: the active effect's
    /// step period, a short retry delay after a skipped frame, or the idle
    /// poll period.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        while let Some(command) = self.commands.try_receive() {
            self.apply(command);
        }

        let sleep_duration = self.render_step();
        FrameResult {
            next_deadline: now + sleep_duration,
            sleep_duration,
        }
    }

    fn apply(&mut self, command: StripCommand) {
        match command {
            StripCommand::Start(kind) => {
                match self.current_effect() {
                    Some(current) => {
                        info!(
                            "strip: superseding {} with {}",
                            current.as_str(),
                            kind.as_str()
                        );
                    }
                    None => info!("strip: starting {}", kind.as_str()),
                }
                self.active = Some(kind.to_slot());
                self.status.set_animating(kind.is_animation());
            }
            StripCommand::Stop => {
                info!("strip: stop");
                self.clear_strip();
            }
            StripCommand::ToggleWaveDirection => {
                self.strip.with(|state| state.toggle_wave_direction());
            }
            StripCommand::SetLength(length) => {
                // Stop-effect always precedes a length change.
                self.clear_strip();
                let applied = self.strip.with(|state| {
                    state.set_length(length);
                    state.params().length()
                });
                info!("strip: length set to {}", applied);
                if let Err(err) = self.driver.set_length(applied) {
                    warn!("strip: driver rebuild after resize failed: {:?}", err);
                }
            }
        }
    }

    /// Stop the active effect, clear all pixels and transmit the dark frame.
    fn clear_strip(&mut self) {
        self.active = None;
        self.status.set_animating(false);
        let length = self.strip.with(|state| {
            state.clear_frame();
            usize::from(state.params().length())
        });
        self.tx_frame[..length].fill(Rgb::default());
        self.transmit(length);
    }

    fn render_step(&mut self) -> Duration {
        let Some(active) = &mut self.active else {
            return IDLE_TICK;
        };
        let kind = active.kind();

        let tx_frame = &mut self.tx_frame;
        let rendered = self.strip.try_with(|state| {
            let (params, frame) = state.render_parts();
            let outcome = active.step(params, frame);
            let length = frame.len();
            tx_frame[..length].copy_from_slice(frame);
            (outcome, length)
        });

        match rendered {
            Err(LockBusy) => {
                // Bounded wait: skip this frame and try again next tick.
                self.skipped += 1;
                warn!("strip: state lock busy, frame skipped");
                if self.skipped == LOCK_STALL_LIMIT {
                    error!(
                        "strip: {} consecutive frames skipped, render loop is stalled",
                        LOCK_STALL_LIMIT
                    );
                }
                LOCK_RETRY
            }
            Ok((outcome, length)) => {
                self.skipped = 0;
                self.transmit(length);
                match outcome {
                    StepOutcome::Continue(period) => period,
                    StepOutcome::Finished => {
                        info!("strip: {} finished", kind.as_str());
                        self.clear_strip();
                        IDLE_TICK
                    }
                }
            }
        }
    }

    fn transmit(&mut self, length: usize) {
        if let Err(err) = self.driver.transmit_and_wait(&self.tx_frame[..length]) {
            // Non-fatal: the animation continues from the next tick.
            warn!("strip: transmit failed, frame dropped: {:?}", err);
        }
    }
}
