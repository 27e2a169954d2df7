//! Brightness curves for the blocking LED animations.
//!
//! Pure frame generators; [`RgbLed`](super::rgb_led::RgbLed) writes the
//! frames out and sleeps between them.
//!
//! | Animation | Curve                                  | Period  |
//! |-----------|----------------------------------------|---------|
//! | Sinus     | Triangular swell and fade, repeating   | 1000 ms |
//! | LoadBar   | Single linear ramp over the duration   | —       |

use core::time::Duration;

use crate::app::ports::LedAnimation;
use crate::game::player::Rgb;

/// One Sinus swell-and-fade.
pub const SINUS_PERIOD_MS: u32 = 1000;

/// Time between two written frames.
pub const FRAME_MS: u32 = 20;

/// Triangle wave approximating a sine without libm: 0 → 255 → 0 per period.
pub fn triangle_brightness(phase_ms: u32, period_ms: u32) -> u8 {
    let pos = u64::from(phase_ms % period_ms);
    let half = u64::from(period_ms) / 2;
    if pos < half {
        ((pos * 255) / half) as u8
    } else {
        (((u64::from(period_ms) - pos) * 255) / half) as u8
    }
}

/// Linear 0 → 255 ramp across `total_ms`, saturating at the end.
pub fn ramp_brightness(elapsed_ms: u32, total_ms: u32) -> u8 {
    if total_ms == 0 || elapsed_ms >= total_ms {
        return 255;
    }
    ((u64::from(elapsed_ms) * 255) / u64::from(total_ms)) as u8
}

pub fn scale((r, g, b): Rgb, brightness: u8) -> Rgb {
    let br = u16::from(brightness);
    (
        ((u16::from(r) * br) / 255) as u8,
        ((u16::from(g) * br) / 255) as u8,
        ((u16::from(b) * br) / 255) as u8,
    )
}

/// Frames of `animation` in `colour`, one per [`FRAME_MS`], covering `duration`.
pub fn frames(animation: LedAnimation, colour: Rgb, duration: Duration) -> impl Iterator<Item = Rgb> {
    let total_ms = duration.as_millis().min(u128::from(u32::MAX)) as u32;
    let count = total_ms.div_ceil(FRAME_MS);
    (0..count).map(move |i| {
        let t = i * FRAME_MS;
        let brightness = match animation {
            LedAnimation::Sinus => triangle_brightness(t, SINUS_PERIOD_MS),
            LedAnimation::LoadBar => ramp_brightness(t + FRAME_MS, total_ms),
        };
        scale(colour, brightness)
    })
}
