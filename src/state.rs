//! Shared strip configuration and pixel frame buffer.
//!
//! [`StripState`] is the single process-wide piece of mutable state: the
//! strip parameters set over HTTP plus the last computed frame. Every setter
//! clamps its input to the documented range instead of rejecting it; this is
//! a compatibility requirement, not an oversight. [`SharedStrip`] wraps the
//! state in a `critical-section` mutex so the render task, the configuration
//! surface and persistence can share it.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::color::{Rgb, hsv_to_rgb, position_hue, scale_rgb};

/// Fallback parameters applied when nothing was persisted.
pub const DEFAULT_LENGTH: u16 = 470;
pub const DEFAULT_BRIGHTNESS: u8 = 10;
pub const DEFAULT_STAIRS_SPEED_MS: u16 = 20;
pub const DEFAULT_STAIRS_GROUP_SIZE: u16 = 3;

/// Per-step delay bounds for the stairs chase.
pub const MIN_STAIRS_SPEED_MS: u16 = 10;
pub const MAX_STAIRS_SPEED_MS: u16 = 1000;

const MAX_BRIGHTNESS: u8 = 100;

/// How pixel colors are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Every pixel uses the configured base color.
    Custom,
    /// Every pixel derives its hue from its position on the strip.
    RainbowCycle,
}

/// Sign of the traveling-wave phase offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveDirection {
    Forward,
    Backward,
}

impl WaveDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Strip parameters, readable by every renderer on each frame tick.
///
/// Fields are private so the clamping setters on [`StripState`] are the only
/// way to mutate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripParams {
    length: u16,
    brightness: u8,
    base_color: Rgb,
    color_mode: ColorMode,
    wave_direction: WaveDirection,
    stairs_speed_ms: u16,
    stairs_group_size: u16,
}

impl StripParams {
    /// Number of addressable pixels; always at least 1.
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Brightness percentage in `[0, 100]`.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn base_color(&self) -> Rgb {
        self.base_color
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn wave_direction(&self) -> WaveDirection {
        self.wave_direction
    }

    /// Per-step delay for chase effects, in `[10, 1000]` ms.
    pub fn stairs_speed_ms(&self) -> u16 {
        self.stairs_speed_ms
    }

    /// Pixels advanced per chase step, in `[1, length]`.
    pub fn stairs_group_size(&self) -> u16 {
        self.stairs_group_size
    }

    /// Brightness-scaled color of the pixel at `index`.
    ///
    /// In rainbow-cycle mode the hue is `360 * index / length`; otherwise the
    /// base color is used.
    pub fn color_at(&self, index: usize) -> Rgb {
        let color = match self.color_mode {
            ColorMode::Custom => self.base_color,
            ColorMode::RainbowCycle => {
                hsv_to_rgb(position_hue(index, self.length as usize), 100, 100)
            }
        };
        scale_rgb(color, self.brightness)
    }
}

/// Plain-data copy of the strip parameters for persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripSnapshot {
    pub length: u16,
    pub brightness: u8,
    pub base_color: (u8, u8, u8),
    pub color_mode: ColorMode,
    pub wave_direction: WaveDirection,
    pub stairs_speed_ms: u16,
    pub stairs_group_size: u16,
}

impl StripSnapshot {
    pub const DEFAULTS: Self = Self {
        length: DEFAULT_LENGTH,
        brightness: DEFAULT_BRIGHTNESS,
        base_color: (255, 255, 255),
        color_mode: ColorMode::Custom,
        wave_direction: WaveDirection::Forward,
        stairs_speed_ms: DEFAULT_STAIRS_SPEED_MS,
        stairs_group_size: DEFAULT_STAIRS_GROUP_SIZE,
    };
}

impl Default for StripSnapshot {
    fn default() -> Self {
        Self::DEFAULTS
    }
}

/// Strip parameters plus the last computed frame.
///
/// The live frame is the `length`-prefix of the fixed-capacity buffer;
/// changing the length clears the buffer rather than reallocating.
pub struct StripState<const MAX_LEDS: usize> {
    params: StripParams,
    frame: [Rgb; MAX_LEDS],
}

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

impl<const MAX_LEDS: usize> StripState<MAX_LEDS> {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new() -> Self {
        let mut length = DEFAULT_LENGTH;
        if length as usize > MAX_LEDS {
            length = MAX_LEDS as u16;
        }
        if length == 0 {
            length = 1;
        }
        let mut group = DEFAULT_STAIRS_GROUP_SIZE;
        if group > length {
            group = length;
        }
        Self {
            params: StripParams {
                length,
                brightness: DEFAULT_BRIGHTNESS,
                base_color: Rgb {
                    r: 255,
                    g: 255,
                    b: 255,
                },
                color_mode: ColorMode::Custom,
                wave_direction: WaveDirection::Forward,
                stairs_speed_ms: DEFAULT_STAIRS_SPEED_MS,
                stairs_group_size: group,
            },
            frame: [BLACK; MAX_LEDS],
        }
    }

    pub fn params(&self) -> &StripParams {
        &self.params
    }

    /// The live frame (the `length`-prefix of the pixel buffer).
    pub fn frame(&self) -> &[Rgb] {
        &self.frame[..self.params.length as usize]
    }

    /// Split borrow for rendering: parameters plus the mutable live frame.
    pub fn render_parts(&mut self) -> (&StripParams, &mut [Rgb]) {
        let len = self.params.length as usize;
        let Self { params, frame } = self;
        (&*params, &mut frame[..len])
    }

    pub fn clear_frame(&mut self) {
        self.frame.fill(BLACK);
    }

    /// Set brightness, clamped to `[0, 100]`.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.params.brightness = brightness.min(MAX_BRIGHTNESS);
    }

    /// Set the base color and switch to custom color mode.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.params.base_color = Rgb { r, g, b };
        self.params.color_mode = ColorMode::Custom;
    }

    pub fn set_mode(&mut self, mode: ColorMode) {
        self.params.color_mode = mode;
    }

    pub fn set_wave_direction(&mut self, direction: WaveDirection) {
        self.params.wave_direction = direction;
    }

    pub fn toggle_wave_direction(&mut self) {
        self.params.wave_direction = self.params.wave_direction.toggled();
    }

    /// Set the stairs step delay, clamped to `[10, 1000]` ms.
    pub fn set_stairs_speed(&mut self, speed_ms: u16) {
        self.params.stairs_speed_ms = speed_ms.clamp(MIN_STAIRS_SPEED_MS, MAX_STAIRS_SPEED_MS);
    }

    /// Set the chase group size, clamped to `[1, length]`.
    pub fn set_stairs_group_size(&mut self, size: u16) {
        self.params.stairs_group_size = size.clamp(1, self.params.length);
    }

    /// Set the strip length, clamped to `[1, MAX_LEDS]`.
    ///
    /// Clears the pixel buffer and re-clamps the group size; the scheduler
    /// guarantees no effect is running when this is called.
    pub fn set_length(&mut self, length: u16) {
        #[allow(clippy::cast_possible_truncation)]
        let capacity = if MAX_LEDS > usize::from(u16::MAX) {
            u16::MAX
        } else {
            MAX_LEDS as u16
        };
        self.params.length = length.clamp(1, capacity);
        self.params.stairs_group_size = self.params.stairs_group_size.clamp(1, self.params.length);
        self.clear_frame();
    }

    /// Consistent copy of the parameters for persistence.
    pub fn snapshot(&self) -> StripSnapshot {
        let color = self.params.base_color;
        StripSnapshot {
            length: self.params.length,
            brightness: self.params.brightness,
            base_color: (color.r, color.g, color.b),
            color_mode: self.params.color_mode,
            wave_direction: self.params.wave_direction,
            stairs_speed_ms: self.params.stairs_speed_ms,
            stairs_group_size: self.params.stairs_group_size,
        }
    }

    /// Restore parameters from a snapshot, re-clamping every field.
    pub fn load(&mut self, snapshot: &StripSnapshot) {
        self.set_length(snapshot.length);
        self.set_brightness(snapshot.brightness);
        let (r, g, b) = snapshot.base_color;
        self.set_color(r, g, b);
        self.set_mode(snapshot.color_mode);
        self.set_wave_direction(snapshot.wave_direction);
        self.set_stairs_speed(snapshot.stairs_speed_ms);
        self.set_stairs_group_size(snapshot.stairs_group_size);
    }
}

impl<const MAX_LEDS: usize> Default for StripState<MAX_LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Error returned when the shared state is already borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockBusy;

/// [`StripState`] behind a `critical-section` mutex.
///
/// `with` is for short, always-succeeding accesses (setters, snapshots);
/// the render loop uses `try_with` so a busy lock degrades to a skipped
/// frame instead of blocking the frame cadence.
pub struct SharedStrip<const MAX_LEDS: usize> {
    inner: Mutex<RefCell<StripState<MAX_LEDS>>>,
}

impl<const MAX_LEDS: usize> SharedStrip<MAX_LEDS> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(StripState::new())),
        }
    }

    /// Run `f` with exclusive access to the state.
    pub fn with<R>(&self, f: impl FnOnce(&mut StripState<MAX_LEDS>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()))
    }

    /// Run `f` with exclusive access, failing instead of waiting if the
    /// state is already borrowed.
    pub fn try_with<R>(
        &self,
        f: impl FnOnce(&mut StripState<MAX_LEDS>) -> R,
    ) -> Result<R, LockBusy> {
        critical_section::with(|cs| {
            let mut state = self
                .inner
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| LockBusy)?;
            Ok(f(&mut state))
        })
    }
}

impl<const MAX_LEDS: usize> Default for SharedStrip<MAX_LEDS> {
    fn default() -> Self {
        Self::new()
    }
}
