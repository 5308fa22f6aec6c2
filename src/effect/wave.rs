//! Traveling wave effect
//!
//! A single lit pixel travels along the strip, advancing one position per
//! tick and wrapping at the end. The wave direction flips the traversal;
//! the pixel color follows the configured color mode.

use super::{BLACK, Effect, StepOutcome, WAVE_TICK};
use crate::color::Rgb;
use crate::state::{StripParams, WaveDirection};

#[derive(Debug, Clone, Default)]
pub struct WaveEffect {
    phase: u16,
}

impl WaveEffect {
    pub const fn new() -> Self {
        Self { phase: 0 }
    }
}

impl Effect for WaveEffect {
    fn step(&mut self, params: &StripParams, frame: &mut [Rgb]) -> StepOutcome {
        let length = frame.len();
        if length == 0 {
            return StepOutcome::Finished;
        }

        frame.fill(BLACK);

        let phase = usize::from(self.phase) % length;
        let index = match params.wave_direction() {
            WaveDirection::Forward => phase,
            WaveDirection::Backward => length - 1 - phase,
        };
        frame[index] = params.color_at(index);

        #[allow(clippy::cast_possible_truncation)]
        let next = ((phase + 1) % length) as u16;
        self.phase = next;

        StepOutcome::Continue(WAVE_TICK)
    }
}
