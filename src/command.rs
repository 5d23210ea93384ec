//! ST7735 command set
//!
//! Every transfer to the controller is either a single opcode byte sent with
//! the DC line low, or a parameter/pixel stream sent with DC high. This module
//! names the opcodes the driver issues; the payload each one expects is listed
//! on the variant.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tft_display::{Command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = Interface::new(MockSpi, MockPin);
//!
//! // 16 bits per pixel
//! let _ = interface.send_command(Command::ColorMode.opcode());
//! let _ = interface.send_data(&[0x05]);
//! ```

/// Controller opcodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Software reset (0x01). No payload; wait at least 120 ms afterwards.
    SoftReset = 0x01,
    /// Sleep out (0x11). No payload; the booster needs up to 500 ms to settle.
    SleepOut = 0x11,
    /// Normal display mode on (0x13). No payload.
    NormalDisplayOn = 0x13,
    /// Display inversion off (0x20). No payload.
    InversionOff = 0x20,
    /// Display inversion on (0x21). No payload.
    InversionOn = 0x21,
    /// Display on (0x29). No payload.
    DisplayOn = 0x29,
    /// Column address set (0x2A)
    ///
    /// 4 bytes: `[start_hi, start_lo, end_hi, end_lo]`, end inclusive.
    ColumnAddressSet = 0x2A,
    /// Row address set (0x2B)
    ///
    /// 4 bytes: `[start_hi, start_lo, end_hi, end_lo]`, end inclusive.
    RowAddressSet = 0x2B,
    /// Memory write (0x2C)
    ///
    /// No parameters. Arms the RAM cursor at the window origin; the following
    /// data stream is pixel data in row-major order.
    MemoryWrite = 0x2C,
    /// Memory access control (0x36)
    ///
    /// 1 byte: MY | MX | MV | ML | RGB/BGR | MH. See [`crate::rotation`].
    MemoryAccessControl = 0x36,
    /// Interface pixel format (0x3A)
    ///
    /// 1 byte: 0x03 = 12 bpp, 0x05 = 16 bpp, 0x06 = 18 bpp.
    ColorMode = 0x3A,
    /// Frame rate control, normal mode (0xB1). 3 bytes: RTNA, FPA, BPA.
    FrameRateControl1 = 0xB1,
    /// Frame rate control, idle mode (0xB2). 3 bytes: RTNB, FPB, BPB.
    FrameRateControl2 = 0xB2,
    /// Frame rate control, partial mode (0xB3)
    ///
    /// 6 bytes: dot-inversion RTNC, FPC, BPC then line-inversion RTND, FPD, BPD.
    FrameRateControl3 = 0xB3,
    /// Display inversion control (0xB4). 1 byte.
    InversionControl = 0xB4,
    /// Power control 1 (0xC0). 3 bytes: AVDD/GVDD, GVCL, mode.
    PowerControl1 = 0xC0,
    /// Power control 2 (0xC1). 1 byte: VGH/VGL supply.
    PowerControl2 = 0xC1,
    /// Power control 3, normal mode (0xC2). 2 bytes: op-amp current, booster.
    PowerControl3 = 0xC2,
    /// Power control 4, idle mode (0xC3). 2 bytes.
    PowerControl4 = 0xC3,
    /// Power control 5, partial mode (0xC4). 2 bytes.
    PowerControl5 = 0xC4,
    /// VCOM control 1 (0xC5). 1 byte.
    VcomControl1 = 0xC5,
    /// Positive polarity gamma correction (0xE0). 16 bytes.
    GammaPositive = 0xE0,
    /// Negative polarity gamma correction (0xE1). 16 bytes.
    GammaNegative = 0xE1,
}

impl Command {
    /// Raw opcode byte sent with DC low
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.opcode()
    }
}

/// Interface pixel format parameter selecting 16 bits per pixel
pub const COLOR_MODE_16BIT: u8 = 0x05;
