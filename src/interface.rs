//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the controller over SPI.
//!
//! ## Hardware Requirements
//!
//! - SPI device (MOSI + SCK, chip select owned by the [`SpiDevice`] implementation)
//! - GPIO pins:
//!   - **DC**: Data/Command select (output, required)
//!   - **RST**: Reset (output, active low, optional)
//!   - **BL**: Backlight enable (output, active high, optional)
//!
//! The [`SpiDevice`] gives each transfer exclusive use of the bus, so the panel
//! can share SCK/MOSI with other peripherals such as an SD card as long as
//! every device goes through its own `SpiDevice`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use tft_display::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // DC is required, reset and backlight are optional
//! let mut interface = Interface::new(MockSpi, MockPin)
//!     .with_reset(MockPin)
//!     .with_backlight(MockPin);
//!
//! let _ = interface.reset(&mut delay);
//! let _ = interface.send_command(0x01); // Software reset
//! let _ = interface.send_data(&[0x05]);
//! let _ = interface.set_backlight(true);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, ErrorKind as PinErrorKind, ErrorType, OutputPin};
use embedded_hal::spi::{MODE_0, Mode, SpiDevice};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// SPI mode expected by the controller
pub const SPI_MODE: Mode = MODE_0;

/// Highest SPI clock the driver is tested with
pub const MAX_SPI_FREQUENCY_HZ: u32 = 26_000_000;

/// Reset pulse timing: each level is held this long
pub const RESET_PULSE_MS: u32 = 10;

/// Trait for hardware interface to the display controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    ///
    /// An empty slice is a no-op.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line
    ///
    /// High, wait [`RESET_PULSE_MS`], low, wait, high, wait. The waits are
    /// observed even when no reset pin is wired.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Drive the backlight enable line
    ///
    /// Succeeds without doing anything when no backlight pin is wired.
    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Pin errors are reduced to their embedded-hal [`ErrorKind`](PinErrorKind)
/// so the DC, reset and backlight pins may be different types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceError<SpiErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErrorKind),
}

impl<SpiErr: Debug> core::fmt::Display for InterfaceError<SpiErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug> core::error::Error for InterfaceError<SpiErr> {}

/// Placeholder for a control line that is not connected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Hardware interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`] ([`NoPin`] when absent)
/// * `BL` - Backlight pin implementing [`OutputPin`] ([`NoPin`] when absent)
pub struct Interface<SPI, DC, RST = NoPin, BL = NoPin> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Backlight enable pin (active high)
    backlight: Option<BL>,
}

impl<SPI, DC> Interface<SPI, DC, NoPin, NoPin>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new Interface without reset or backlight control
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            rst: None,
            backlight: None,
        }
    }
}

impl<SPI, DC, RST, BL> Interface<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Attach a reset pin
    pub fn with_reset<R: OutputPin>(self, rst: R) -> Interface<SPI, DC, R, BL> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            rst: Some(rst),
            backlight: self.backlight,
        }
    }

    /// Attach a backlight pin
    pub fn with_backlight<B: OutputPin>(self, backlight: B) -> Interface<SPI, DC, RST, B> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            rst: self.rst,
            backlight: Some(backlight),
        }
    }

    /// Whether a reset pin is attached
    pub fn has_reset(&self) -> bool {
        self.rst.is_some()
    }

    /// Whether a backlight pin is attached
    pub fn has_backlight(&self) -> bool {
        self.backlight.is_some()
    }

    /// Give back the SPI device and pins
    pub fn release(self) -> (SPI, DC, Option<RST>, Option<BL>) {
        (self.spi, self.dc, self.rst, self.backlight)
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), PinErrorKind> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|e| e.kind())
}

impl<SPI, DC, RST, BL> DisplayInterface for Interface<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    type Error = InterfaceError<SPI::Error>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        set_level(&mut self.dc, false).map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }
        set_level(&mut self.dc, true).map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        for high in [true, false, true] {
            if let Some(rst) = self.rst.as_mut() {
                set_level(rst, high).map_err(InterfaceError::Pin)?;
            }
            delay.delay_ms(RESET_PULSE_MS);
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error> {
        match self.backlight.as_mut() {
            Some(pin) => set_level(pin, on).map_err(InterfaceError::Pin),
            None => Ok(()),
        }
    }
}
