//! Configuration, effect-trigger and persistence surface.
//!
//! [`StripControls`] is the handle given to the external HTTP layer. It is a
//! pair of plain references, so it is `Copy` and can be handed to any number
//! of request handlers. Configuration setters go straight to the shared
//! state (clamped, never rejected); anything that touches the effect
//! lifecycle goes through the scheduler's command channel instead, so all
//! starts stay serialized.

use log::info;

use crate::effect::{ChaseDirection, EffectKind, StairsDirection};
use crate::scheduler::{CommandSender, StripCommand};
use crate::state::{ColorMode, SharedStrip, StripSnapshot};

/// Error returned when an effect start cannot be queued.
///
/// The scheduler is left unchanged; the caller may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartError;

/// Error from the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreError;

/// Non-volatile parameter storage, implemented by the platform.
pub trait ParamStore {
    /// Load the persisted snapshot, or `None` when nothing usable is stored.
    fn load(&mut self) -> Option<StripSnapshot>;

    /// Persist a snapshot.
    fn save(&mut self, snapshot: &StripSnapshot) -> Result<(), StoreError>;
}

/// Control surface over the shared strip state and the effect scheduler.
#[derive(Clone, Copy)]
pub struct StripControls<'a, const MAX_LEDS: usize, const COMMANDS: usize> {
    strip: &'a SharedStrip<MAX_LEDS>,
    commands: CommandSender<'a, COMMANDS>,
}

impl<'a, const MAX_LEDS: usize, const COMMANDS: usize> StripControls<'a, MAX_LEDS, COMMANDS> {
    pub const fn new(
        strip: &'a SharedStrip<MAX_LEDS>,
        commands: CommandSender<'a, COMMANDS>,
    ) -> Self {
        Self { strip, commands }
    }

    // Configuration API. Out-of-range input is clamped, never rejected.

    pub fn set_brightness(&self, brightness: u8) {
        self.strip.with(|state| state.set_brightness(brightness));
    }

    pub fn set_color(&self, r: u8, g: u8, b: u8) {
        self.strip.with(|state| state.set_color(r, g, b));
    }

    pub fn set_stairs_speed(&self, speed_ms: u16) {
        self.strip.with(|state| state.set_stairs_speed(speed_ms));
    }

    pub fn set_stairs_group_size(&self, size: u16) {
        self.strip.with(|state| state.set_stairs_group_size(size));
    }

    /// Switch to position-derived rainbow colors.
    pub fn reset_to_rainbow_mode(&self) {
        self.strip
            .with(|state| state.set_mode(ColorMode::RainbowCycle));
    }

    /// Resize the strip.
    ///
    /// Routed through the scheduler so the running effect is stopped before
    /// the buffer and transmit channel are rebuilt.
    pub fn set_length(&self, length: u16) -> Result<(), StartError> {
        self.send(StripCommand::SetLength(length))
    }

    /// Consistent copy of the current parameters.
    pub fn snapshot(&self) -> StripSnapshot {
        self.strip.with(|state| state.snapshot())
    }

    /// Restore parameters from a snapshot (each field re-clamped).
    pub fn restore(&self, snapshot: &StripSnapshot) {
        self.strip.with(|state| state.load(snapshot));
    }

    // Effect trigger API.

    pub fn start_solid(&self) -> Result<(), StartError> {
        self.send(StripCommand::Start(EffectKind::Solid))
    }

    pub fn start_wave(&self) -> Result<(), StartError> {
        self.send(StripCommand::Start(EffectKind::Wave))
    }

    pub fn start_stairs(&self, direction: StairsDirection) -> Result<(), StartError> {
        self.send(StripCommand::Start(EffectKind::Stairs(direction)))
    }

    /// Run the one-shot feedback chase, as if a sensor had tripped.
    pub fn start_motion_chase(&self, direction: ChaseDirection) -> Result<(), StartError> {
        self.send(StripCommand::Start(EffectKind::Chase(direction)))
    }

    pub fn stop_all(&self) -> Result<(), StartError> {
        self.send(StripCommand::Stop)
    }

    pub fn toggle_wave_direction(&self) -> Result<(), StartError> {
        self.send(StripCommand::ToggleWaveDirection)
    }

    fn send(&self, command: StripCommand) -> Result<(), StartError> {
        self.commands.try_send(command).map_err(|_| StartError)
    }

    // Persistence.

    /// Apply the stored parameters, falling back to the documented defaults.
    pub fn load_params(&self, store: &mut impl ParamStore) {
        let snapshot = match store.load() {
            Some(snapshot) => {
                info!("params: loaded");
                snapshot
            }
            None => {
                info!("params: nothing stored, using defaults");
                StripSnapshot::DEFAULTS
            }
        };
        self.restore(&snapshot);
    }

    /// Persist the current parameters.
    pub fn save_params(&self, store: &mut impl ParamStore) -> Result<(), StoreError> {
        let snapshot = self.snapshot();
        store.save(&snapshot)?;
        info!("params: saved");
        Ok(())
    }
}
