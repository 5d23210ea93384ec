//! ST7735 TFT Display Driver
//!
//! A driver for ST7735-family SPI TFT controllers running in 16-bit RGB565
//! mode, such as the common 128x160 panels.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Configurable panel size, rotation, offsets, inversion and gamma
//! - Optional reset and backlight pins
//! - Solid fills, single pixels, a color-band test pattern and an animated plasma effect
//!
//! The controller is write-only. The driver keeps no frame buffer: every
//! drawing call addresses a window on the panel and streams its pixels, one
//! row per transfer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use tft_display::{Builder, Clock, Color, Dimensions, Display, Interface, Rotation};
//!
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
//! # struct MockClock(u32);
//! # impl Clock for MockClock {
//! #     fn now_ms(&mut self) -> u32 { self.0 += 20; self.0 }
//! # }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let backlight = MockPin;
//! # let mut delay = MockDelay;
//! # let mut clock = MockClock(0);
//! let interface = Interface::new(spi, dc)
//!     .with_reset(rst)
//!     .with_backlight(backlight);
//! let dims = match Dimensions::new(128, 160) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface);
//! if display.init(config, &mut delay).is_err() {
//!     return;
//! }
//! let _ = display.fill(Color::BLACK);
//! let _ = display.test_pattern();
//! let _ = display.plasma(30_000, &mut delay, &mut clock);
//! let _ = display.deinit();
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Millisecond time source for timed animations
pub mod clock;
/// RGB color type and RGB565 packing
pub mod color;
/// ST7735 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Plasma animation field and palette
pub mod plasma;
/// Memory access control for each rotation
pub mod rotation;
/// Controller bring-up sequences
pub mod sequence;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use clock::Clock;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use color::Color;
pub use command::Command;
pub use config::{Builder, ColorOrder, Config, ControllerVariant, Dimensions, Rotation};
pub use display::{AddressWindow, Display, DriverState};
pub use error::{BuilderError, Error, ErrorKind};
pub use interface::{DisplayInterface, Interface, InterfaceError, NoPin};
pub use interface::{MAX_SPI_FREQUENCY_HZ, SPI_MODE};
pub use plasma::Plasma;

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
