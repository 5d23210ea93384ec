//! Orientation to memory-access-control mapping
//!
//! The controller rotates the picture itself: the MADCTL register swaps and
//! mirrors the row/column address counters, so the driver only has to pick
//! the right bits and address windows in logical coordinates afterwards.
//!
//! | Bit | Name | Effect                      |
//! |-----|------|-----------------------------|
//! | 7   | MY   | Row address order           |
//! | 6   | MX   | Column address order        |
//! | 5   | MV   | Row/column exchange         |
//! | 4   | ML   | Vertical refresh order      |
//! | 3   | RGB  | 0 = RGB, 1 = BGR            |
//! | 2   | MH   | Horizontal refresh order    |
//!
//! ## Example
//!
//! ```
//! use tft_display::{rotation::memory_access_control, ColorOrder, Rotation};
//!
//! assert_eq!(memory_access_control(Rotation::Rotate0, ColorOrder::Bgr), 0xC8);
//! assert_eq!(memory_access_control(Rotation::Rotate180, ColorOrder::Rgb), 0x00);
//! ```

use crate::config::{ColorOrder, Rotation};

/// Row address order
pub const MADCTL_MY: u8 = 0x80;
/// Column address order
pub const MADCTL_MX: u8 = 0x40;
/// Row/column exchange
pub const MADCTL_MV: u8 = 0x20;
/// BGR subpixel order
pub const MADCTL_BGR: u8 = 0x08;

/// Compute the memory access control byte
pub fn memory_access_control(rotation: Rotation, order: ColorOrder) -> u8 {
    let orientation = match rotation {
        Rotation::Rotate0 => MADCTL_MY | MADCTL_MX,
        Rotation::Rotate90 => MADCTL_MY | MADCTL_MV,
        Rotation::Rotate180 => 0,
        Rotation::Rotate270 => MADCTL_MX | MADCTL_MV,
    };
    match order {
        ColorOrder::Rgb => orientation,
        ColorOrder::Bgr => orientation | MADCTL_BGR,
    }
}
