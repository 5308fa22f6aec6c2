//! Solid fill effect
//!
//! Fills the whole strip with the configured color (or the position-derived
//! rainbow), scaled by brightness. Re-rendered periodically so brightness
//! and color changes take effect without restarting the effect.

use super::{Effect, SOLID_TICK, StepOutcome};
use crate::color::Rgb;
use crate::state::StripParams;

#[derive(Debug, Clone, Default)]
pub struct SolidEffect;

impl SolidEffect {
    pub const fn new() -> Self {
        Self
    }
}

impl Effect for SolidEffect {
    fn step(&mut self, params: &StripParams, frame: &mut [Rgb]) -> StepOutcome {
        for (index, led) in frame.iter_mut().enumerate() {
            *led = params.color_at(index);
        }
        StepOutcome::Continue(SOLID_TICK)
    }
}
