//! Integer color math for WS2812-class strips.
//!
//! All operations are integer-only and deterministic: brightness scaling is
//! truncating division by 100, and the HSV conversion is the standard
//! 60°-sector algorithm over percent-scaled saturation and value.

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Scale one channel by a brightness percentage (0-100), truncating.
pub fn scale_channel(channel: u8, brightness: u8) -> u8 {
    let brightness = u16::from(brightness.min(100));
    #[allow(clippy::cast_possible_truncation)]
    let scaled = (u16::from(channel) * brightness / 100) as u8;
    scaled
}

/// Scale a whole color by a brightness percentage (0-100).
pub fn scale_rgb(color: Rgb, brightness: u8) -> Rgb {
    Rgb {
        r: scale_channel(color.r, brightness),
        g: scale_channel(color.g, brightness),
        b: scale_channel(color.b, brightness),
    }
}

/// Convert HSV to RGB.
///
/// `hue` is in degrees and normalized mod 360; `saturation` and `value` are
/// percentages in `[0, 100]`. Channels come out in `[0, 255]`.
pub fn hsv_to_rgb(hue: u16, saturation: u8, value: u8) -> Rgb {
    let hue = u32::from(hue % 360);
    let sat = u32::from(saturation.min(100));
    let val = u32::from(value.min(100));

    let sector = hue / 60;
    let frac = hue % 60;

    // Intermediate channels in percent, per the 60°-sector algorithm.
    let p = val * (100 - sat) / 100;
    let q = val * (6000 - sat * frac) / 6000;
    let t = val * (6000 - sat * (60 - frac)) / 6000;

    let (r, g, b) = match sector {
        0 => (val, t, p),
        1 => (q, val, p),
        2 => (p, val, t),
        3 => (p, q, val),
        4 => (t, p, val),
        _ => (val, p, q),
    };

    #[allow(clippy::cast_possible_truncation)]
    let to_channel = |percent: u32| (percent * 255 / 100) as u8;
    Rgb {
        r: to_channel(r),
        g: to_channel(g),
        b: to_channel(b),
    }
}

/// Hue in degrees for a pixel position in rainbow-cycle mode.
///
/// The hue sweeps the full circle once over the strip: `360 * index / length`.
pub fn position_hue(index: usize, length: usize) -> u16 {
    if length == 0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let hue = (360 * index / length) as u16;
    hue % 360
}
