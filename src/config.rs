//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Default VCOM control value
pub const DEFAULT_VCOM: u8 = 0x0E;

/// Default positive polarity gamma table
pub const DEFAULT_GAMMA_POSITIVE: [u8; 16] = [
    0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
];

/// Default negative polarity gamma table
pub const DEFAULT_GAMMA_NEGATIVE: [u8; 16] = [
    0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
];

/// Default pause between animation frames in milliseconds
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 20;

/// Display controller family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerVariant {
    /// Sitronix ST7735 (supported)
    #[default]
    St7735,
    /// Sitronix ST7789 (declared, not supported)
    St7789,
    /// Ilitek ILI9341 (declared, not supported)
    Ili9341,
}

impl ControllerVariant {
    /// Whether the driver implements this controller's protocol
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::St7735)
    }

    /// Size of the controller's frame memory as (columns, rows)
    pub const fn max_dimensions(self) -> (u16, u16) {
        match self {
            Self::St7735 => (132, 162),
            Self::St7789 | Self::Ili9341 => (240, 320),
        }
    }
}

/// Physical panel size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns
    pub width: u16,
    /// Number of rows
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero.
    /// The upper bound depends on the controller and is checked by
    /// [`Builder::build`].
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Whether the panel fits the frame memory of `variant`
    pub fn fits(&self, variant: ControllerVariant) -> bool {
        let (max_w, max_h) = variant.max_dimensions();
        self.width != 0 && self.height != 0 && self.width <= max_w && self.height <= max_h
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Subpixel order of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red-green-blue
    Rgb,
    /// Blue-green-red (most ST7735 modules)
    #[default]
    Bgr,
}

/// Display configuration
///
/// Use [`Builder`] to create a Config. The defaults reproduce the
/// register values of common 128x160 ST7735 modules.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Controller family
    pub variant: ControllerVariant,
    /// Physical panel size
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Panel subpixel order
    pub color_order: ColorOrder,
    /// Enable display inversion (needed by some 1.44" modules)
    pub inverted: bool,
    /// VCOM control register value
    pub vcom: u8,
    /// Positive polarity gamma table
    pub gamma_positive: [u8; 16],
    /// Negative polarity gamma table
    pub gamma_negative: [u8; 16],
    /// Column offset of the glass inside controller RAM
    pub column_offset: u16,
    /// Row offset of the glass inside controller RAM
    pub row_offset: u16,
    /// Pause between animation frames in milliseconds
    pub frame_interval_ms: u32,
    /// Reject zero-width or zero-height rectangles instead of ignoring them
    pub reject_empty_areas: bool,
}

impl Config {
    /// Get the drawing surface size after rotation
    pub fn rotated_dimensions(&self) -> Dimensions {
        match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => self.dimensions,
            Rotation::Rotate90 | Rotation::Rotate270 => Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            },
        }
    }

    /// Whether the drawing surface, shifted by the RAM offsets, stays inside
    /// the controller's frame memory
    ///
    /// With 90/270 degree rotation the controller swaps its address axes, so
    /// the surface is compared against the swapped RAM size.
    pub fn offsets_fit(&self) -> bool {
        let (ram_w, ram_h) = self.variant.max_dimensions();
        let (ram_cols, ram_rows) = match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => (ram_w, ram_h),
            Rotation::Rotate90 | Rotation::Rotate270 => (ram_h, ram_w),
        };
        let surface = self.rotated_dimensions();
        u32::from(surface.width) + u32::from(self.column_offset) <= u32::from(ram_cols)
            && u32::from(surface.height) + u32::from(self.row_offset) <= u32::from(ram_rows)
    }

    /// Memory access control byte for this rotation and color order
    pub fn memory_access_control(&self) -> u8 {
        crate::rotation::memory_access_control(self.rotation, self.color_order)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use tft_display::{Builder, ControllerVariant, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(128, 160) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .variant(ControllerVariant::St7735)
///     .dimensions(dims)
///     .rotation(Rotation::Rotate90)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.rotated_dimensions().width, 160);
/// ```
#[must_use]
pub struct Builder {
    variant: ControllerVariant,
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    rotation: Rotation,
    color_order: ColorOrder,
    inverted: bool,
    vcom: u8,
    gamma_positive: [u8; 16],
    gamma_negative: [u8; 16],
    column_offset: u16,
    row_offset: u16,
    frame_interval_ms: u32,
    reject_empty_areas: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            variant: ControllerVariant::St7735,
            dimensions: None,
            rotation: Rotation::Rotate0,
            color_order: ColorOrder::Bgr,
            inverted: false,
            vcom: DEFAULT_VCOM,
            gamma_positive: DEFAULT_GAMMA_POSITIVE,
            gamma_negative: DEFAULT_GAMMA_NEGATIVE,
            column_offset: 0,
            row_offset: 0,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            reject_empty_areas: false,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the controller family
    pub fn variant(mut self, variant: ControllerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the panel subpixel order
    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = order;
        self
    }

    /// Enable or disable display inversion
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Set VCOM value
    pub fn vcom(mut self, value: u8) -> Self {
        self.vcom = value;
        self
    }

    /// Set both gamma correction tables
    pub fn gamma(mut self, positive: [u8; 16], negative: [u8; 16]) -> Self {
        self.gamma_positive = positive;
        self.gamma_negative = negative;
        self
    }

    /// Set the RAM offset of the visible area
    ///
    /// 1.44" 128x128 modules typically need (2, 3) at `Rotate0`.
    pub fn offset(mut self, column: u16, row: u16) -> Self {
        self.column_offset = column;
        self.row_offset = row;
        self
    }

    /// Set the pause between animation frames
    pub fn frame_interval_ms(mut self, ms: u32) -> Self {
        self.frame_interval_ms = ms;
        self
    }

    /// Reject zero-width or zero-height rectangles
    ///
    /// By default such rectangles are accepted and draw nothing.
    pub fn reject_empty_areas(mut self, reject: bool) -> Self {
        self.reject_empty_areas = reject;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set, or
    /// `BuilderError::InvalidDimensions` if they exceed the controller's RAM.
    /// Returns `BuilderError::InvalidOffset` if the offset panel would reach
    /// past the end of the controller's RAM.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        if !dimensions.fits(self.variant) {
            return Err(BuilderError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        let config = Config {
            variant: self.variant,
            dimensions,
            rotation: self.rotation,
            color_order: self.color_order,
            inverted: self.inverted,
            vcom: self.vcom,
            gamma_positive: self.gamma_positive,
            gamma_negative: self.gamma_negative,
            column_offset: self.column_offset,
            row_offset: self.row_offset,
            frame_interval_ms: self.frame_interval_ms,
            reject_empty_areas: self.reject_empty_areas,
        };
        if !config.offsets_fit() {
            return Err(BuilderError::InvalidOffset {
                column: config.column_offset,
                row: config.row_offset,
            });
        }
        Ok(config)
    }
}
