//! RGB color type and 5-6-5 packing
//!
//! The controller is driven in 16-bit-per-pixel mode. Every pixel travels on
//! the wire as a packed RGB565 word, high byte first:
//!
//! | Bits   | 15..11 | 10..5 | 4..0 |
//! |--------|--------|-------|------|
//! | Source | red    | green | blue |
//!
//! ## Example
//!
//! ```
//! use tft_display::Color;
//!
//! assert_eq!(Color::RED.to_rgb565(), 0xF800);
//! assert_eq!(Color::GREEN.to_rgb565(), 0x07E0);
//! assert_eq!(Color::BLUE.to_rgb565(), 0x001F);
//!
//! // Bytes as streamed to the controller
//! assert_eq!(Color::new(255, 255, 0).to_be_bytes(), [0xFF, 0xE0]);
//! ```

/// A 24-bit RGB color
///
/// Channels are kept at 8 bits and truncated to 5/6/5 bits only when packed
/// for the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red (255, 0, 0)
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green (0, 255, 0)
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue (0, 0, 255)
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Yellow (255, 255, 0)
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// Cyan (0, 255, 255)
    pub const CYAN: Self = Self::new(0, 255, 255);
    /// Magenta (255, 0, 255)
    pub const MAGENTA: Self = Self::new(255, 0, 255);

    /// Create a color from its three 8-bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into the 16-bit RGB565 wire format
    ///
    /// ```
    /// use tft_display::Color;
    ///
    /// assert_eq!(Color::WHITE.to_rgb565(), 0xFFFF);
    /// assert_eq!(Color::new(0x07, 0x03, 0x07).to_rgb565(), 0x0000);
    /// ```
    pub const fn to_rgb565(self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }

    /// Unpack an RGB565 word, widening each channel back to 8 bits
    ///
    /// Full-scale channels stay full-scale, so packing the result again gives
    /// back the same word.
    ///
    /// ```
    /// use tft_display::Color;
    ///
    /// assert_eq!(Color::from_rgb565(0xF800), Color::RED);
    /// assert_eq!(Color::from_rgb565(0x0821).to_rgb565(), 0x0821);
    /// ```
    pub const fn from_rgb565(raw: u16) -> Self {
        let r = (raw >> 11) as u8 & 0x1F;
        let g = (raw >> 5) as u8 & 0x3F;
        let b = raw as u8 & 0x1F;
        Self::new((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    /// Packed pixel in transfer order (high byte first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_rgb565().to_be_bytes()
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::raw::RawU16> for Color {
    fn from(raw: embedded_graphics_core::pixelcolor::raw::RawU16) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawData;
        Self::from_rgb565(raw.into_inner())
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb888> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb888) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::new(color.r(), color.g(), color.b())
    }
}
