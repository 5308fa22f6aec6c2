//! Motion feedback chase effect
//!
//! One-shot sweep used as feedback for a single tripped sensor: the strip
//! lights up pixel by pixel from one end to the other, then retracts the
//! same way in reverse. Step size and cadence are fixed and independent of
//! the configured stairs speed and group size.

use super::{BLACK, CHASE_TICK, ChaseDirection, Effect, StepOutcome};
use crate::color::Rgb;
use crate::state::StripParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Grow,
    Retract,
}

#[derive(Debug, Clone)]
pub struct ChaseEffect {
    direction: ChaseDirection,
    phase: Phase,
    lit: u16,
}

impl ChaseEffect {
    pub const fn new(direction: ChaseDirection) -> Self {
        Self {
            direction,
            phase: Phase::Grow,
            lit: 0,
        }
    }

    pub const fn direction(&self) -> ChaseDirection {
        self.direction
    }

    fn paint(&self, params: &StripParams, frame: &mut [Rgb]) {
        frame.fill(BLACK);
        let length = frame.len();
        let lit = usize::from(self.lit).min(length);

        match self.direction {
            // End-to-start: the lit region is a growing suffix.
            ChaseDirection::TowardStart => {
                for (index, led) in frame.iter_mut().enumerate().skip(length - lit) {
                    *led = params.color_at(index);
                }
            }
            ChaseDirection::TowardEnd => {
                for (index, led) in frame.iter_mut().enumerate().take(lit) {
                    *led = params.color_at(index);
                }
            }
        }
    }
}

impl Effect for ChaseEffect {
    fn step(&mut self, params: &StripParams, frame: &mut [Rgb]) -> StepOutcome {
        let length = params.length();
        if frame.is_empty() {
            return StepOutcome::Finished;
        }

        match self.phase {
            Phase::Grow => {
                self.lit = self.lit.saturating_add(1).min(length);
                self.paint(params, frame);
                if self.lit >= length {
                    self.phase = Phase::Retract;
                }
                StepOutcome::Continue(CHASE_TICK)
            }
            Phase::Retract => {
                self.lit = self.lit.saturating_sub(1);
                self.paint(params, frame);
                if self.lit == 0 {
                    StepOutcome::Finished
                } else {
                    StepOutcome::Continue(CHASE_TICK)
                }
            }
        }
    }
}
