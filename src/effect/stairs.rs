//! Stairs chase effect
//!
//! One-shot turn-on / hold / turn-off animation. The lit region grows by
//! `stairs_group_size` pixels per step from the chosen end (or from both
//! ends at once), holds the fully lit strip, then retracts. The turn-off
//! traversal is the exact mirror of the turn-on traversal in reverse: the
//! last-lit group goes dark first and the strip empties back toward the
//! end(s) it grew from.

use embassy_time::Duration;

use super::{BLACK, Effect, STAIRS_HOLD, StairsDirection, StepOutcome};
use crate::color::Rgb;
use crate::state::StripParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    TurnOn,
    TurnOff,
}

#[derive(Debug, Clone)]
pub struct StairsEffect {
    direction: StairsDirection,
    phase: Phase,
    /// Pixels currently lit from each active end.
    lit: u16,
}

impl StairsEffect {
    pub const fn new(direction: StairsDirection) -> Self {
        Self {
            direction,
            phase: Phase::TurnOn,
            lit: 0,
        }
    }

    pub const fn direction(&self) -> StairsDirection {
        self.direction
    }

    /// Lit count at which the turn-on traversal is complete.
    ///
    /// For `Both` the two fronts meet in the middle, so each front only has
    /// to cover half the strip; the count is rounded up to a whole group so
    /// the retract phase walks the same step sequence backwards.
    fn full_lit(&self, length: u16, group: u16) -> u16 {
        let target = match self.direction {
            StairsDirection::Both => length.div_ceil(2),
            StairsDirection::FromStart | StairsDirection::FromEnd => length,
        };
        target.div_ceil(group) * group
    }

    fn paint(&self, params: &StripParams, frame: &mut [Rgb]) {
        frame.fill(BLACK);
        let length = frame.len();
        let lit = usize::from(self.lit).min(length);

        match self.direction {
            StairsDirection::FromStart => {
                for (index, led) in frame.iter_mut().enumerate().take(lit) {
                    *led = params.color_at(index);
                }
            }
            StairsDirection::FromEnd => {
                for (index, led) in frame.iter_mut().enumerate().skip(length - lit) {
                    *led = params.color_at(index);
                }
            }
            StairsDirection::Both => {
                for (index, led) in frame.iter_mut().enumerate() {
                    if index < lit || index >= length - lit {
                        *led = params.color_at(index);
                    }
                }
            }
        }
    }
}

impl Effect for StairsEffect {
    fn step(&mut self, params: &StripParams, frame: &mut [Rgb]) -> StepOutcome {
        let length = params.length();
        if frame.is_empty() {
            return StepOutcome::Finished;
        }

        let group = params.stairs_group_size().max(1);
        let speed = Duration::from_millis(u64::from(params.stairs_speed_ms()));
        let full = self.full_lit(length, group);

        match self.phase {
            Phase::TurnOn => {
                self.lit = self.lit.saturating_add(group).min(full);
                self.paint(params, frame);
                if self.lit >= full {
                    self.phase = Phase::TurnOff;
                    StepOutcome::Continue(STAIRS_HOLD)
                } else {
                    StepOutcome::Continue(speed)
                }
            }
            Phase::TurnOff => {
                self.lit = self.lit.saturating_sub(group);
                self.paint(params, frame);
                if self.lit == 0 {
                    StepOutcome::Finished
                } else {
                    StepOutcome::Continue(speed)
                }
            }
        }
    }
}
