//! Controller bring-up sequences
//!
//! Bring-up is a fixed replay of register writes and settling delays. It is
//! kept as data so it can be audited and tested step by step; the driver
//! simply walks the table (see [`Display::init`](crate::Display::init)).
//!
//! ```
//! use tft_display::sequence::{self, InitStep};
//! use tft_display::{Builder, Command, Dimensions};
//!
//! let config = Builder::new()
//!     .dimensions(Dimensions::new(128, 160).unwrap())
//!     .build()
//!     .unwrap();
//! let steps = sequence::st7735(&config);
//! assert_eq!(steps[0], InitStep::HardReset);
//! assert_eq!(steps[steps.len() - 2], InitStep::Command(Command::DisplayOn));
//! ```

use crate::command::{COLOR_MODE_16BIT, Command};
use crate::config::Config;

/// One step of a bring-up sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep<'a> {
    /// Pulse the reset line
    HardReset,
    /// Block for the given number of milliseconds
    DelayMs(u32),
    /// Send a bare command
    Command(Command),
    /// Send a command with a single parameter byte
    CommandByte(Command, u8),
    /// Send a command with a parameter block
    CommandData(Command, &'a [u8]),
}

/// Settle time after the reset pulse
pub const POWER_UP_SETTLE_MS: u32 = 120;
/// Wait after software reset
pub const SOFT_RESET_DELAY_MS: u32 = 150;
/// Wait after sleep out
pub const SLEEP_OUT_DELAY_MS: u32 = 500;
/// Wait after normal display mode on
pub const NORMAL_DISPLAY_DELAY_MS: u32 = 10;
/// Wait after display on
pub const DISPLAY_ON_DELAY_MS: u32 = 100;

const FRAME_RATE: [u8; 3] = [0x01, 0x2C, 0x2D];
const FRAME_RATE_PARTIAL: [u8; 6] = [0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D];
const INVERSION_CONTROL: u8 = 0x07;
const POWER_CONTROL_1: [u8; 3] = [0xA2, 0x02, 0x84];
const POWER_CONTROL_2: u8 = 0xC5;
const POWER_CONTROL_3: [u8; 2] = [0x0A, 0x00];
const POWER_CONTROL_4: [u8; 2] = [0x8A, 0x2A];
const POWER_CONTROL_5: [u8; 2] = [0x8A, 0xEE];

/// Number of steps in the ST7735 sequence
pub const ST7735_STEPS: usize = 25;

/// ST7735 bring-up for the given panel configuration
pub fn st7735(config: &Config) -> [InitStep<'_>; ST7735_STEPS] {
    let inversion = if config.inverted {
        Command::InversionOn
    } else {
        Command::InversionOff
    };
    [
        InitStep::HardReset,
        InitStep::DelayMs(POWER_UP_SETTLE_MS),
        InitStep::Command(Command::SoftReset),
        InitStep::DelayMs(SOFT_RESET_DELAY_MS),
        InitStep::Command(Command::SleepOut),
        InitStep::DelayMs(SLEEP_OUT_DELAY_MS),
        // Panel timing and power, no settling needed
        InitStep::CommandData(Command::FrameRateControl1, &FRAME_RATE),
        InitStep::CommandData(Command::FrameRateControl2, &FRAME_RATE),
        InitStep::CommandData(Command::FrameRateControl3, &FRAME_RATE_PARTIAL),
        InitStep::CommandByte(Command::InversionControl, INVERSION_CONTROL),
        InitStep::CommandData(Command::PowerControl1, &POWER_CONTROL_1),
        InitStep::CommandByte(Command::PowerControl2, POWER_CONTROL_2),
        InitStep::CommandData(Command::PowerControl3, &POWER_CONTROL_3),
        InitStep::CommandData(Command::PowerControl4, &POWER_CONTROL_4),
        InitStep::CommandData(Command::PowerControl5, &POWER_CONTROL_5),
        InitStep::CommandByte(Command::VcomControl1, config.vcom),
        InitStep::Command(inversion),
        InitStep::CommandByte(Command::MemoryAccessControl, config.memory_access_control()),
        InitStep::CommandByte(Command::ColorMode, COLOR_MODE_16BIT),
        InitStep::CommandData(Command::GammaPositive, &config.gamma_positive),
        InitStep::CommandData(Command::GammaNegative, &config.gamma_negative),
        InitStep::Command(Command::NormalDisplayOn),
        InitStep::DelayMs(NORMAL_DISPLAY_DELAY_MS),
        InitStep::Command(Command::DisplayOn),
        InitStep::DelayMs(DISPLAY_ON_DELAY_MS),
    ]
}
