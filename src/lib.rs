#![no_std]

pub mod channel;
pub mod color;
pub mod controls;
pub mod effect;
pub mod motion;
pub mod scheduler;
pub mod state;

pub use channel::{Channel, ChannelFull};
pub use color::{Rgb, hsv_to_rgb, position_hue, scale_channel, scale_rgb};
pub use controls::{ParamStore, StartError, StoreError, StripControls};
pub use effect::{ChaseDirection, Effect, EffectKind, EffectSlot, StairsDirection, StepOutcome};
pub use motion::{
    ACTIVATION_WINDOW, MOTION_TICK, MotionChannel, MotionController, MotionCoordinator,
    MotionEvent, MotionReceiver, MotionSender, MotionSensor, NightGate,
};
pub use scheduler::{
    CommandChannel, CommandReceiver, CommandSender, EffectScheduler, EngineStatus, FrameResult,
    IDLE_TICK, StripCommand,
};
pub use state::{
    ColorMode, LockBusy, SharedStrip, StripParams, StripSnapshot, StripState, WaveDirection,
};

pub use embassy_time::{Duration, Instant};

/// Error from the hardware transmit primitive.
///
/// The strip protocol gives no diagnostics beyond "the frame did not latch",
/// so this is a unit error; the scheduler logs it and drops the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareError;

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// The effect scheduler is generic over this trait.
pub trait StripDriver {
    /// Push one fully computed frame to the strip, blocking until the
    /// hardware has latched it.
    fn transmit_and_wait(&mut self, frame: &[Rgb]) -> Result<(), HardwareError>;

    /// Tear down and rebuild the transmit channel for a new strip length.
    ///
    /// Called by the scheduler after a length change, always with no effect
    /// running. Platforms with a fixed-capacity channel may ignore this.
    fn set_length(&mut self, length: u16) -> Result<(), HardwareError> {
        let _ = length;
        Ok(())
    }
}
