//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations. Each effect
//! holds its own phase/step counter and renders one frame per step into the
//! live frame slice, reporting when the next step is due and whether the
//! animation has run to completion.

mod chase;
mod solid;
mod stairs;
mod wave;

pub use chase::ChaseEffect;
pub use solid::SolidEffect;
pub use stairs::StairsEffect;
pub use wave::WaveEffect;

use embassy_time::Duration;

use crate::color::Rgb;
use crate::state::StripParams;

/// Tick period of the traveling wave.
pub const WAVE_TICK: Duration = Duration::from_millis(50);
/// Fixed tick period of the motion feedback chases.
pub const CHASE_TICK: Duration = Duration::from_millis(100);
/// Refresh period of the solid fill, so setters show up on the next frame.
pub const SOLID_TICK: Duration = Duration::from_millis(100);
/// Pause between the stairs turn-on and turn-off traversals.
pub const STAIRS_HOLD: Duration = Duration::from_millis(1000);

/// Which end(s) of the strip a stairs chase grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairsDirection {
    FromStart,
    FromEnd,
    /// Two fronts grow symmetrically from opposite ends until they meet.
    Both,
}

/// Sweep direction of the one-shot motion feedback chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseDirection {
    /// Light up end-to-start, then retract.
    TowardStart,
    /// Light up start-to-end, then retract.
    TowardEnd,
}

/// Known effect kinds that can be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Solid,
    Wave,
    Stairs(StairsDirection),
    Chase(ChaseDirection),
}

impl EffectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Wave => "wave",
            Self::Stairs(StairsDirection::FromStart) => "stairs_from_start",
            Self::Stairs(StairsDirection::FromEnd) => "stairs_from_end",
            Self::Stairs(StairsDirection::Both) => "stairs_both",
            Self::Chase(ChaseDirection::TowardStart) => "chase_toward_start",
            Self::Chase(ChaseDirection::TowardEnd) => "chase_toward_end",
        }
    }

    /// Whether this effect animates over time.
    ///
    /// The motion coordinator only defers to running animations; a solid
    /// fill may be overridden by a sensor-triggered chase.
    pub const fn is_animation(self) -> bool {
        !matches!(self, Self::Solid)
    }

    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::Solid => EffectSlot::Solid(SolidEffect::new()),
            Self::Wave => EffectSlot::Wave(WaveEffect::new()),
            Self::Stairs(direction) => EffectSlot::Stairs(StairsEffect::new(direction)),
            Self::Chase(direction) => EffectSlot::Chase(ChaseEffect::new(direction)),
        }
    }
}

/// Outcome of rendering one effect step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Frame rendered; the next step is due after the given delay.
    Continue(Duration),
    /// The animation completed naturally; the scheduler clears the strip.
    Finished,
}

pub trait Effect {
    /// Render a single step into the live frame.
    ///
    /// Parameters are re-read on every step, so configuration changes take
    /// effect on the next frame.
    fn step(&mut self, params: &StripParams, frame: &mut [Rgb]) -> StepOutcome;
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    Solid(SolidEffect),
    Wave(WaveEffect),
    Stairs(StairsEffect),
    Chase(ChaseEffect),
}

impl EffectSlot {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Solid(_) => EffectKind::Solid,
            Self::Wave(_) => EffectKind::Wave,
            Self::Stairs(effect) => EffectKind::Stairs(effect.direction()),
            Self::Chase(effect) => EffectKind::Chase(effect.direction()),
        }
    }

    /// Render the next step of the contained effect.
    pub fn step(&mut self, params: &StripParams, frame: &mut [Rgb]) -> StepOutcome {
        match self {
            Self::Solid(effect) => effect.step(params, frame),
            Self::Wave(effect) => effect.step(params, frame),
            Self::Stairs(effect) => effect.step(params, frame),
            Self::Chase(effect) => effect.step(params, frame),
        }
    }
}

pub(crate) const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
