//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps [`Display`]
//! and implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! There is no frame buffer: every primitive is streamed to the controller
//! as it is drawn. Solid fills become a single address window, other
//! primitives go out pixel by pixel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use tft_display::{Color, GraphicDisplay};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use tft_display::{Builder, Dimensions, Display, Interface};
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
//! # let dims = match Dimensions::new(128, 160) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(Interface::new(MockSpi, MockPin));
//! if display.init(config, &mut delay).is_err() {
//!     return;
//! }
//! let mut display = GraphicDisplay::new(display);
//!
//! let _ = display.clear(Color::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::RED))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(40, 80), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::WHITE, 2))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions as _, OriginDimensions, Point, Size},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Display driven through embedded-graphics
///
/// Wraps a [`Display`]. Drawing calls made before the display is
/// initialized see a zero-sized target: pixels are clipped away, while
/// [`clear`](DrawTarget::clear) reports [`Error::NotInitialized`].
pub struct GraphicDisplay<I>
where
    I: DisplayInterface,
{
    /// The underlying display driver
    display: Display<I>,
}

impl<I> GraphicDisplay<I>
where
    I: DisplayInterface,
{
    /// Wrap a display driver
    pub fn new(display: Display<I>) -> Self {
        Self { display }
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    ///
    /// Used for operations embedded-graphics has no notion of, such as the
    /// backlight, the test pattern or the plasma animation.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Unwrap the display driver
    pub fn into_inner(self) -> Display<I> {
        self.display
    }
}

impl<I> DrawTarget for GraphicDisplay<I>
where
    I: DisplayInterface,
{
    type Color = Color;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.display.draw_pixel(x as u16, y as u16, color)?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }

        // clipped to the surface, so everything fits in u16
        self.display.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.display.fill(color)
    }
}

impl<I> OriginDimensions for GraphicDisplay<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        self.display
            .dimensions()
            .map_or(Size::zero(), |dims| {
                Size::new(u32::from(dims.width), u32::from(dims.height))
            })
    }
}
