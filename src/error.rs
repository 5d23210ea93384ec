//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations, classified by [`ErrorKind`]
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use tft_display::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Larger than ST7735 frame memory
//! let dims = Dimensions::new(240, 320).unwrap();
//! let result = Builder::new().dimensions(dims).build();
//! assert!(result.is_err());
//! ```

use crate::config::ControllerVariant;
use crate::interface::DisplayInterface;

/// Broad classification of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration, coordinates or rectangle
    InvalidArgument,
    /// Operation not valid in the current driver state
    InvalidState,
    /// Controller variant not implemented
    Unsupported,
    /// Bus or pin fault
    Transport,
    /// Row buffer allocation failed
    NoMemory,
}

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Transport(I::Error),
    /// Panel size is zero or exceeds the controller's frame memory
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
    /// RAM offsets push the panel past the controller's frame memory
    InvalidOffset {
        /// Column offset
        column: u16,
        /// Row offset
        row: u16,
    },
    /// Pixel coordinate outside the drawing surface
    OutOfBounds {
        /// X coordinate
        x: u16,
        /// Y coordinate
        y: u16,
    },
    /// Rectangle does not fit the drawing surface
    InvalidArea {
        /// X coordinate
        x: u16,
        /// Y coordinate
        y: u16,
        /// Width
        w: u16,
        /// Height
        h: u16,
    },
    /// Operation issued before `init` or after `deinit`
    NotInitialized,
    /// `init` issued while the driver is already initialized
    AlreadyInitialized,
    /// Controller variant has no bring-up implementation
    Unsupported(ControllerVariant),
    /// Row buffer could not be allocated
    NoMemory {
        /// Bytes requested
        requested: usize,
    },
}

impl<I: DisplayInterface> Error<I> {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::InvalidDimensions { .. }
            | Self::InvalidOffset { .. }
            | Self::OutOfBounds { .. }
            | Self::InvalidArea { .. } => ErrorKind::InvalidArgument,
            Self::NotInitialized | Self::AlreadyInitialized => ErrorKind::InvalidState,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::NoMemory { .. } => ErrorKind::NoMemory,
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e:?}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height}")
            }
            Self::InvalidOffset { column, row } => {
                write!(f, "RAM offset ({column}, {row}) exceeds controller memory")
            }
            Self::OutOfBounds { x, y } => write!(f, "Pixel out of bounds: x={x}, y={y}"),
            Self::InvalidArea { x, y, w, h } => {
                write!(f, "Invalid area: x={x}, y={y}, w={w}, h={h}")
            }
            Self::NotInitialized => write!(f, "Display not initialized"),
            Self::AlreadyInitialized => write!(f, "Display already initialized"),
            Self::Unsupported(variant) => write!(f, "Unsupported controller: {variant:?}"),
            Self::NoMemory { requested } => {
                write!(f, "Failed to allocate line buffer ({requested} bytes)")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// Both sides must be non-zero and fit the controller's frame memory.
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
    /// RAM offsets push the panel past the controller's frame memory
    InvalidOffset {
        /// Column offset
        column: u16,
        /// Row offset
        row: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (must be non-zero and fit controller RAM)"
            ),
            Self::InvalidOffset { column, row } => {
                write!(f, "RAM offset ({column}, {row}) exceeds controller memory")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
