//! Motion-triggered effect coordination.
//!
//! Two motion sensors guard the staircase, one at each end of the strip.
//! Debounced edges arrive as timestamped [`MotionEvent`]s on a bounded
//! channel (the GPIO-interrupt-to-queue handoff is platform code). The
//! coordinator pairs events across a 500 ms activation window to decide
//! which stairs variant to start: both sensors within the window means
//! someone is on the stairs from both ends, a lone sensor whose window
//! lapsed means a single walker from that end.
//!
//! Triggers are gated on night time unless the override flag is set, and
//! are dropped entirely while an animation is already running.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::{Duration, Instant};
use log::{info, warn};

use crate::channel::{Channel, Receiver, Sender};
use crate::effect::{EffectKind, StairsDirection};
use crate::scheduler::{CommandSender, EngineStatus, StripCommand};

/// Window within which two sensor events count as one combined event.
pub const ACTIVATION_WINDOW: Duration = Duration::from_millis(500);

/// Poll period for the motion consumer task.
pub const MOTION_TICK: Duration = Duration::from_millis(50);

/// Which sensor produced an event. `Front` sits at the strip's first pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSensor {
    Front,
    Back,
}

/// A debounced sensor edge; transient, consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEvent {
    pub sensor: MotionSensor,
    pub at: Instant,
}

pub type MotionChannel<const CAPACITY: usize> = Channel<MotionEvent, CAPACITY>;
pub type MotionSender<'a, const CAPACITY: usize> = Sender<'a, MotionEvent, CAPACITY>;
pub type MotionReceiver<'a, const CAPACITY: usize> = Receiver<'a, MotionEvent, CAPACITY>;

/// Day/night gate, written by the external sun-time collaborator.
///
/// The values may be stale by up to the collaborator's polling interval;
/// that is acceptable, night does not arrive suddenly.
pub struct NightGate {
    night_time: AtomicBool,
    ignore_sun: AtomicBool,
}

impl NightGate {
    pub const fn new() -> Self {
        Self {
            night_time: AtomicBool::new(false),
            ignore_sun: AtomicBool::new(false),
        }
    }

    pub fn is_night_time(&self) -> bool {
        self.night_time.load(Ordering::Relaxed)
    }

    pub fn set_night_time(&self, night: bool) {
        self.night_time.store(night, Ordering::Relaxed);
    }

    pub fn ignore_sun(&self) -> bool {
        self.ignore_sun.load(Ordering::Relaxed)
    }

    pub fn set_ignore_sun(&self, ignore: bool) {
        self.ignore_sun.store(ignore, Ordering::Relaxed);
    }

    /// Whether motion may trigger effects right now.
    pub fn allows_triggering(&self) -> bool {
        self.is_night_time() || self.ignore_sun()
    }
}

impl Default for NightGate {
    fn default() -> Self {
        Self::new()
    }
}

/// The two-sensor decision core.
///
/// Pure state machine over held timestamps; gating and scheduler state are
/// passed in so the rules stay independently testable.
pub struct MotionCoordinator {
    window: Duration,
    front_seen: Option<Instant>,
    back_seen: Option<Instant>,
}

impl MotionCoordinator {
    pub const fn new() -> Self {
        Self::with_window(ACTIVATION_WINDOW)
    }

    pub const fn with_window(window: Duration) -> Self {
        Self {
            window,
            front_seen: None,
            back_seen: None,
        }
    }

    /// Feed one sensor event.
    ///
    /// Events are dropped entirely while an animation runs, and are not
    /// recorded while the gate is closed so a daytime event cannot trigger
    /// a stale chase after nightfall.
    pub fn on_event(
        &mut self,
        event: MotionEvent,
        animating: bool,
        gate_open: bool,
    ) -> Option<StairsDirection> {
        if animating || !gate_open {
            return None;
        }
        match event.sensor {
            MotionSensor::Front => self.front_seen = Some(event.at),
            MotionSensor::Back => self.back_seen = Some(event.at),
        }
        self.evaluate(event.at)
    }

    /// Re-evaluate the window-expiry rules without a new event.
    ///
    /// Needed so a lone sensor triggers once its pairing window lapses even
    /// if no further event ever arrives.
    pub fn poll(&mut self, now: Instant, animating: bool, gate_open: bool) -> Option<StairsDirection> {
        if animating || !gate_open {
            return None;
        }
        self.evaluate(now)
    }

    fn evaluate(&mut self, now: Instant) -> Option<StairsDirection> {
        if let (Some(front), Some(back)) = (self.front_seen, self.back_seen) {
            if abs_delta(front, back) <= self.window {
                self.front_seen = None;
                self.back_seen = None;
                return Some(StairsDirection::Both);
            }
        }
        if let Some(front) = self.front_seen {
            if since(now, front) > self.window {
                self.front_seen = None;
                return Some(StairsDirection::FromStart);
            }
        }
        if let Some(back) = self.back_seen {
            if since(now, back) > self.window {
                self.back_seen = None;
                return Some(StairsDirection::FromEnd);
            }
        }
        None
    }
}

impl Default for MotionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn abs_delta(a: Instant, b: Instant) -> Duration {
    Duration::from_millis(a.as_millis().abs_diff(b.as_millis()))
}

fn since(now: Instant, then: Instant) -> Duration {
    Duration::from_millis(now.as_millis().saturating_sub(then.as_millis()))
}

/// Channel glue around [`MotionCoordinator`].
///
/// Drains sensor events, consults the gate and the scheduler status, and
/// turns decisions into scheduler commands. The platform task calls
/// [`process`](Self::process) every [`MOTION_TICK`].
pub struct MotionController<'a, const EVENTS: usize, const COMMANDS: usize> {
    events: MotionReceiver<'a, EVENTS>,
    commands: CommandSender<'a, COMMANDS>,
    status: &'a EngineStatus,
    gate: &'a NightGate,
    coordinator: MotionCoordinator,
}

impl<'a, const EVENTS: usize, const COMMANDS: usize> MotionController<'a, EVENTS, COMMANDS> {
    pub fn new(
        events: MotionReceiver<'a, EVENTS>,
        commands: CommandSender<'a, COMMANDS>,
        status: &'a EngineStatus,
        gate: &'a NightGate,
    ) -> Self {
        Self {
            events,
            commands,
            status,
            gate,
            coordinator: MotionCoordinator::new(),
        }
    }

    /// Consume pending events and re-check window expiry.
    pub fn process(&mut self, now: Instant) {
        while let Some(event) = self.events.try_receive() {
            info!("motion: {:?} sensor event", event.sensor);
            let trigger = self.coordinator.on_event(
                event,
                self.status.is_animating(),
                self.gate.allows_triggering(),
            );
            self.dispatch(trigger);
        }

        let trigger = self.coordinator.poll(
            now,
            self.status.is_animating(),
            self.gate.allows_triggering(),
        );
        self.dispatch(trigger);
    }

    fn dispatch(&mut self, trigger: Option<StairsDirection>) {
        let Some(direction) = trigger else {
            return;
        };
        let kind = EffectKind::Stairs(direction);
        info!("motion: triggering {}", kind.as_str());
        if self.commands.try_send(StripCommand::Start(kind)).is_err() {
            warn!("motion: command queue full, trigger dropped");
        }
    }
}
