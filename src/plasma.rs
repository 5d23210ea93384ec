//! Procedural plasma color field
//!
//! Each pixel's value is the sum of four sine waves of its distance to fixed
//! reference points. Two of the points drift with `time`, and the result is
//! pushed through a three-segment hue ramp rotated by `palette_shift`.

use libm::{sinf, sqrtf};

use crate::color::Color;

/// `time` increment per frame
pub const TIME_STEP: f32 = 0.08;
/// `palette_shift` increment per frame
pub const PALETTE_STEP: f32 = 0.5;

/// Animation state carried from one frame to the next
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Plasma {
    /// Drift of the moving reference points
    pub time: f32,
    /// Rotation of the hue ramp
    pub palette_shift: f32,
}

fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    sqrtf(dx * dx + dy * dy)
}

impl Plasma {
    /// Start a new animation at `time = 0`
    pub const fn new() -> Self {
        Self {
            time: 0.0,
            palette_shift: 0.0,
        }
    }

    /// Field value at `(x, y)`, rescaled to `0.0..=256.0`
    pub fn value(&self, x: f32, y: f32) -> f32 {
        let t = self.time;
        let sum = sinf(distance(x + t, y, 128.0, 128.0) / 8.0)
            + sinf(distance(x, y, 64.0, 64.0) / 8.0)
            + sinf(distance(x, y + t / 7.0, 192.0, 64.0) / 7.0)
            + sinf(distance(x, y, 192.0, 100.0) / 8.0);
        (sum + 4.0) * 32.0
    }

    /// Packed pixel for `(x, y)` in the current frame
    pub fn pixel(&self, x: u16, y: u16) -> u16 {
        let value = self.value(f32::from(x), f32::from(y));
        hue_ramp(value + self.palette_shift).to_rgb565()
    }

    /// Step to the next frame
    pub fn advance(&mut self) {
        self.time += TIME_STEP;
        self.palette_shift += PALETTE_STEP;
    }
}

/// Map a field value onto the red → blue → green → red ramp
///
/// Only the integer part modulo 256 is used. Segment boundaries sit at 85
/// and 170.
pub fn hue_ramp(value: f32) -> Color {
    let v = ((value as u32) % 256) as u8;
    let ramp = |step: u8| step * 3;
    match v {
        0..85 => Color::new(ramp(v), 255 - ramp(v), 0),
        85..170 => {
            let v = v - 85;
            Color::new(255 - ramp(v), 0, ramp(v))
        }
        _ => {
            let v = v - 170;
            Color::new(0, ramp(v), 255 - ramp(v))
        }
    }
}
