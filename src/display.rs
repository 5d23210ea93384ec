//! Core display operations

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::clock::{Clock, elapsed_ms};
use crate::color::Color;
use crate::command::Command;
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::plasma::Plasma;
use crate::sequence::{self, InitStep};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Band colors drawn by [`Display::test_pattern`], top to bottom
pub const TEST_PATTERN: [Color; 8] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::CYAN,
    Color::MAGENTA,
    Color::WHITE,
    Color::BLACK,
];

/// Rectangle targeted by the next pixel stream
///
/// After the window is set the controller expects exactly `w * h` pixels in
/// row-major order; anything else leaves its RAM cursor out of step until the
/// next window is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    /// X coordinate in pixels
    pub x: u16,
    /// Y coordinate in pixels
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl AddressWindow {
    /// Create a new window
    #[allow(clippy::many_single_char_names)]
    pub fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Number of pixels the window expects
    pub fn pixel_count(&self) -> usize {
        self.w as usize * self.h as usize
    }
}

/// Driver lifecycle state
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DriverState {
    /// No bring-up has completed; only `init` is accepted
    #[default]
    Uninitialized,
    /// Controller is running with this configuration
    Ready(Config),
}

/// What the drawing operations need from the active configuration
#[derive(Clone, Copy, Debug)]
struct Surface {
    width: u16,
    height: u16,
    column_offset: u16,
    row_offset: u16,
    frame_interval_ms: u32,
    reject_empty_areas: bool,
}

impl Surface {
    fn from_config(config: &Config) -> Self {
        let dims = config.rotated_dimensions();
        Self {
            width: dims.width,
            height: dims.height,
            column_offset: config.column_offset,
            row_offset: config.row_offset,
            frame_interval_ms: config.frame_interval_ms,
            reject_empty_areas: config.reject_empty_areas,
        }
    }

    fn full_screen(&self) -> AddressWindow {
        AddressWindow::new(0, 0, self.width, self.height)
    }
}

/// Core display driver
///
/// Owns the hardware interface for its whole lifetime. The controller is
/// write-only: nothing is read back and no frame buffer is kept, every
/// drawing call addresses a window and streams its pixels straight out.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Lifecycle state, holds the configuration while ready
    state: DriverState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new, uninitialized Display
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            state: DriverState::Uninitialized,
        }
    }

    /// Bring the controller up and start accepting drawing calls
    ///
    /// Switches the backlight on, then replays the controller's bring-up
    /// sequence. On failure the driver stays uninitialized; commands already
    /// sent are not undone.
    ///
    /// # Errors
    ///
    /// - `AlreadyInitialized` if called twice without `deinit`
    /// - `InvalidDimensions` if the panel size is zero or exceeds the controller RAM
    /// - `InvalidOffset` if the RAM offsets push the panel past the controller RAM
    /// - `Unsupported` for controller variants without a bring-up sequence
    /// - `Transport` on the first failing bus or pin operation
    pub fn init<D: DelayNs>(&mut self, config: Config, delay: &mut D) -> DisplayResult<I> {
        if self.is_initialized() {
            warn!("Display already initialized");
            return Err(Error::AlreadyInitialized);
        }

        let dims = config.dimensions;
        if !dims.fits(config.variant) {
            error!(
                "Invalid panel size {}x{} for {:?}",
                dims.width, dims.height, config.variant
            );
            return Err(Error::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            });
        }

        if !config.offsets_fit() {
            error!(
                "RAM offset ({}, {}) puts the panel outside controller memory",
                config.column_offset, config.row_offset
            );
            return Err(Error::InvalidOffset {
                column: config.column_offset,
                row: config.row_offset,
            });
        }

        if !config.variant.is_supported() {
            error!("{:?} not yet implemented", config.variant);
            return Err(Error::Unsupported(config.variant));
        }

        info!(
            "Initializing TFT display ({:?}, {}x{})",
            config.variant, dims.width, dims.height
        );

        self.interface.set_backlight(true).map_err(Error::Transport)?;

        let steps = sequence::st7735(&config);
        if let Err(e) = self.run_sequence(&steps, delay) {
            error!("Controller bring-up failed: {e}");
            return Err(e);
        }

        self.state = DriverState::Ready(config);
        info!("TFT display initialized successfully");
        Ok(())
    }

    /// Switch the backlight off and return to the uninitialized state
    ///
    /// The state changes even if switching the backlight fails; that error is
    /// still reported.
    pub fn deinit(&mut self) -> DisplayResult<I> {
        if !self.is_initialized() {
            warn!("Display not initialized");
            return Err(Error::NotInitialized);
        }
        self.state = DriverState::Uninitialized;
        let result = self.interface.set_backlight(false).map_err(Error::Transport);
        info!("TFT display deinitialized");
        result
    }

    /// Give the hardware interface back
    pub fn release(self) -> I {
        self.interface
    }

    /// Whether bring-up has completed
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, DriverState::Ready(_))
    }

    /// Current lifecycle state
    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Active configuration, if initialized
    pub fn config(&self) -> Option<&Config> {
        match &self.state {
            DriverState::Ready(config) => Some(config),
            DriverState::Uninitialized => None,
        }
    }

    /// Drawing surface size after rotation, if initialized
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.config().map(Config::rotated_dimensions)
    }

    /// Fill the whole screen with one color
    pub fn fill(&mut self, color: Color) -> DisplayResult<I> {
        let surface = self.surface()?;
        self.stream_solid(surface.full_screen(), color, &surface)
    }

    /// Set a single pixel
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the pixel is outside the drawing surface.
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> DisplayResult<I> {
        let surface = self.surface()?;
        if x >= surface.width || y >= surface.height {
            return Err(Error::OutOfBounds { x, y });
        }
        self.set_window(AddressWindow::new(x, y, 1, 1), &surface)?;
        self.send_data(&color.to_be_bytes())
    }

    /// Fill a rectangle with one color
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArea` if the rectangle does not fit the drawing
    /// surface, or if it is empty and the configuration rejects empty areas.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) -> DisplayResult<I> {
        let surface = self.surface()?;
        match Self::checked_area(&surface, x, y, w, h)? {
            Some(window) => self.stream_solid(window, color, &surface),
            None => Ok(()),
        }
    }

    /// Switch the backlight; a no-op when no backlight pin is wired
    pub fn backlight(&mut self, on: bool) -> DisplayResult<I> {
        self.surface()?;
        self.interface.set_backlight(on).map_err(Error::Transport)
    }

    /// Draw eight horizontal color bands
    ///
    /// Bands are `height / 8` rows tall; the last band also takes the
    /// remaining rows. See [`TEST_PATTERN`] for the colors.
    pub fn test_pattern(&mut self) -> DisplayResult<I> {
        let surface = self.surface()?;
        info!("Drawing test pattern");

        let band = surface.height / TEST_PATTERN.len() as u16;
        let last = TEST_PATTERN.len() - 1;
        for (i, color) in TEST_PATTERN.iter().enumerate() {
            let y = band * i as u16;
            let h = if i == last { surface.height - y } else { band };
            // panels shorter than eight rows
            if h == 0 {
                continue;
            }
            self.fill_rect(0, y, surface.width, h, *color)?;
        }

        info!("Test pattern complete");
        Ok(())
    }

    /// Run the plasma animation
    ///
    /// Streams full-screen frames until `duration_ms` has elapsed on `clock`,
    /// pausing for the configured frame interval between frames. The elapsed
    /// time is checked after each complete frame. A duration of zero draws
    /// exactly one frame.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoMemory` if the row buffer cannot be allocated.
    pub fn plasma<D: DelayNs, C: Clock>(
        &mut self,
        duration_ms: u32,
        delay: &mut D,
        clock: &mut C,
    ) -> DisplayResult<I> {
        let surface = self.surface()?;
        info!("Starting plasma effect (duration={duration_ms} ms)");

        let mut row = Self::row_buffer(surface.width).inspect_err(|e| error!("{e}"))?;
        row.resize(usize::from(surface.width) * 2, 0);
        debug!("Line buffer allocated ({} bytes)", row.len());

        let window = surface.full_screen();
        let mut field = Plasma::new();
        let start = clock.now_ms();
        let mut frames: u32 = 0;

        loop {
            self.set_window(window, &surface)?;
            for y in 0..surface.height {
                for (x, pixel) in (0..surface.width).zip(row.chunks_exact_mut(2)) {
                    pixel.copy_from_slice(&field.pixel(x, y).to_be_bytes());
                }
                self.send_data(&row)?;
            }

            field.advance();
            frames = frames.wrapping_add(1);
            if frames % 50 == 0 {
                debug!("Plasma frame {frames}");
            }

            if duration_ms == 0 || elapsed_ms(start, clock.now_ms()) >= duration_ms {
                break;
            }
            delay.delay_ms(surface.frame_interval_ms);
        }

        let total_ms = elapsed_ms(start, clock.now_ms()).max(1);
        let fps_x10 = u64::from(frames) * 10_000 / u64::from(total_ms);
        info!(
            "Plasma effect complete ({frames} frames, {}.{} FPS)",
            fps_x10 / 10,
            fps_x10 % 10
        );
        Ok(())
    }

    /// Replay a bring-up sequence
    fn run_sequence<D: DelayNs>(&mut self, steps: &[InitStep<'_>], delay: &mut D) -> DisplayResult<I> {
        for step in steps {
            debug!("init step: {:?}", step);
            match *step {
                InitStep::HardReset => self.interface.reset(delay).map_err(Error::Transport)?,
                InitStep::DelayMs(ms) => delay.delay_ms(ms),
                InitStep::Command(command) => self.send_command(command)?,
                InitStep::CommandByte(command, byte) => {
                    self.send_command(command)?;
                    self.send_data(&[byte])?;
                }
                InitStep::CommandData(command, data) => {
                    self.send_command(command)?;
                    self.send_data(data)?;
                }
            }
        }
        Ok(())
    }

    /// Point the controller's RAM cursor at `window`
    ///
    /// The window must be non-empty and inside the surface; `init` has
    /// checked that the surface plus offsets lies inside controller RAM.
    fn set_window(&mut self, window: AddressWindow, surface: &Surface) -> DisplayResult<I> {
        let x = window.x + surface.column_offset;
        let y = window.y + surface.row_offset;
        let x_end = x + (window.w - 1);
        let y_end = y + (window.h - 1);

        self.send_command(Command::ColumnAddressSet)?;
        self.send_data(&address_range(x, x_end))?;

        self.send_command(Command::RowAddressSet)?;
        self.send_data(&address_range(y, y_end))?;

        self.send_command(Command::MemoryWrite)
    }

    /// Address `window` and stream it in a single color, one row per transfer
    fn stream_solid(
        &mut self,
        window: AddressWindow,
        color: Color,
        surface: &Surface,
    ) -> DisplayResult<I> {
        let mut row = Self::row_buffer(window.w)?;
        let pixel = color.to_be_bytes();
        for _ in 0..window.w {
            row.extend_from_slice(&pixel);
        }

        debug!("Streaming {} pixels at ({}, {})", window.pixel_count(), window.x, window.y);
        self.set_window(window, surface)?;
        for _ in 0..window.h {
            self.send_data(&row)?;
        }
        Ok(())
    }

    /// Validate a rectangle; `None` means it is empty and may be skipped
    #[allow(clippy::many_single_char_names)]
    fn checked_area(
        surface: &Surface,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<Option<AddressWindow>, Error<I>> {
        let fits = u32::from(x) + u32::from(w) <= u32::from(surface.width)
            && u32::from(y) + u32::from(h) <= u32::from(surface.height);
        if !fits {
            return Err(Error::InvalidArea { x, y, w, h });
        }
        if w == 0 || h == 0 {
            if surface.reject_empty_areas {
                return Err(Error::InvalidArea { x, y, w, h });
            }
            return Ok(None);
        }
        Ok(Some(AddressWindow::new(x, y, w, h)))
    }

    /// Empty buffer with room for one row of `pixels` packed pixels
    fn row_buffer(pixels: u16) -> Result<Vec<u8>, Error<I>> {
        let requested = usize::from(pixels) * 2;
        let mut row = Vec::new();
        row.try_reserve_exact(requested)
            .map_err(|_| Error::NoMemory { requested })?;
        Ok(row)
    }

    fn surface(&self) -> Result<Surface, Error<I>> {
        match self.config() {
            Some(config) => Ok(Surface::from_config(config)),
            None => {
                warn!("Display not initialized");
                Err(Error::NotInitialized)
            }
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, command: Command) -> DisplayResult<I> {
        self.interface
            .send_command(command.opcode())
            .map_err(Error::Transport)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Transport)
    }
}

/// Column/row address payload: start and inclusive end, big-endian
fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, ControllerVariant, Rotation};
    use crate::error::ErrorKind;
    use alloc::vec;

    const CASET: u8 = 0x2A;
    const RASET: u8 = 0x2B;
    const RAMWR: u8 = 0x2C;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Command(u8),
        Data(Vec<u8>),
        Reset,
        Backlight(bool),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    #[derive(Debug, Default)]
    struct MockInterface {
        events: Vec<Event>,
        fail_on_command: Option<u8>,
    }

    impl DisplayInterface for MockInterface {
        type Error = MockError;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            if self.fail_on_command == Some(command) {
                return Err(MockError);
            }
            self.events.push(Event::Command(command));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if !data.is_empty() {
                self.events.push(Event::Data(data.to_vec()));
            }
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            self.events.push(Event::Reset);
            Ok(())
        }

        fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
            self.events.push(Event::Backlight(on));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls += 1;
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.calls += 1;
            self.total_ms += ms;
        }
    }

    /// Advances by a fixed step every time it is read
    struct MockClock {
        now: u32,
        step: u32,
    }

    impl Clock for MockClock {
        fn now_ms(&mut self) -> u32 {
            let now = self.now;
            self.now = self.now.wrapping_add(self.step);
            now
        }
    }

    fn config(width: u16, height: u16) -> Config {
        Builder::new()
            .dimensions(Dimensions::new(width, height).unwrap())
            .build()
            .unwrap()
    }

    fn ready_display(config: Config) -> Display<MockInterface> {
        let mut display = Display::new(MockInterface::default());
        display.init(config, &mut MockDelay::default()).unwrap();
        display.interface.events.clear();
        display
    }

    fn events(display: &Display<MockInterface>) -> &[Event] {
        &display.interface.events
    }

    /// Column and row payloads of every window, in order
    fn windows(events: &[Event]) -> Vec<([u8; 4], [u8; 4])> {
        let mut found = Vec::new();
        for i in 0..events.len() {
            if events[i] != Event::Command(CASET) {
                continue;
            }
            match (&events[i + 1], &events[i + 2], &events[i + 3], &events[i + 4]) {
                (Event::Data(cols), Event::Command(RASET), Event::Data(rows), Event::Command(RAMWR)) => {
                    found.push((
                        cols.as_slice().try_into().unwrap(),
                        rows.as_slice().try_into().unwrap(),
                    ));
                }
                other => panic!("malformed window: {other:?}"),
            }
        }
        found
    }

    /// Data transfers following each memory write command
    fn streams(events: &[Event]) -> Vec<Vec<Vec<u8>>> {
        let mut found: Vec<Vec<Vec<u8>>> = Vec::new();
        for event in events {
            match event {
                Event::Command(RAMWR) => found.push(Vec::new()),
                Event::Command(_) => {}
                Event::Data(data) => {
                    if let Some(stream) = found.last_mut() {
                        stream.push(data.clone());
                    }
                }
                Event::Reset | Event::Backlight(_) => {}
            }
        }
        found
    }

    fn row_of(color: Color, width: usize) -> Vec<u8> {
        color.to_be_bytes().repeat(width)
    }

    #[test]
    fn test_init_replays_bring_up() {
        let mut display = Display::new(MockInterface::default());
        let mut delay = MockDelay::default();
        display.init(config(128, 160), &mut delay).unwrap();

        assert!(display.is_initialized());
        let events = events(&display);
        assert_eq!(events[0], Event::Backlight(true));
        assert_eq!(events[1], Event::Reset);
        assert_eq!(events[2], Event::Command(0x01));
        assert_eq!(events[3], Event::Command(0x11));
        assert_eq!(events[4], Event::Command(0xB1));
        assert_eq!(events[5], Event::Data(vec![0x01, 0x2C, 0x2D]));
        assert!(events.contains(&Event::Command(0x36)));
        assert!(events.contains(&Event::Data(vec![0xC8])));
        assert_eq!(events.last(), Some(&Event::Command(0x29)));
        assert_eq!(delay.total_ms, 120 + 150 + 500 + 10 + 100);
    }

    #[test]
    fn test_init_twice_is_rejected_without_bus_writes() {
        let mut display = ready_display(config(128, 160));
        let result = display.init(config(128, 160), &mut MockDelay::default());
        assert!(matches!(result, Err(Error::AlreadyInitialized)));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
        assert!(events(&display).is_empty());
        assert!(display.is_initialized());
    }

    #[test]
    fn test_init_unsupported_variant_writes_nothing() {
        for variant in [ControllerVariant::St7789, ControllerVariant::Ili9341] {
            let config = Builder::new()
                .variant(variant)
                .dimensions(Dimensions::new(240, 320).unwrap())
                .build()
                .unwrap();
            let mut display = Display::new(MockInterface::default());
            let result = display.init(config, &mut MockDelay::default());
            assert!(matches!(result, Err(Error::Unsupported(v)) if v == variant));
            assert!(events(&display).is_empty());
            assert!(!display.is_initialized());
        }
    }

    #[test]
    fn test_init_invalid_dimensions() {
        let mut bad = config(128, 160);
        bad.dimensions.width = 0;
        let mut display = Display::new(MockInterface::default());
        let result = display.init(bad, &mut MockDelay::default());
        assert!(matches!(result, Err(Error::InvalidDimensions { width: 0, height: 160 })));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert!(events(&display).is_empty());

        let mut oversize = config(128, 160);
        oversize.dimensions.height = 200;
        let result = display.init(oversize, &mut MockDelay::default());
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_init_twice_with_bad_config_reports_state_first() {
        let mut display = ready_display(config(128, 160));
        let mut bad = config(128, 160);
        bad.dimensions.width = 0;
        bad.column_offset = u16::MAX;
        let result = display.init(bad, &mut MockDelay::default());
        assert!(matches!(result, Err(Error::AlreadyInitialized)));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
        assert!(events(&display).is_empty());
    }

    #[test]
    fn test_init_rejects_offsets_past_ram() {
        for (column, row) in [(10, 0), (u16::MAX, 0), (0, 3)] {
            let mut bad = config(128, 160);
            bad.column_offset = column;
            bad.row_offset = row;
            let mut display = Display::new(MockInterface::default());
            let result = display.init(bad, &mut MockDelay::default());
            assert!(
                matches!(result, Err(Error::InvalidOffset { column: c, row: r }) if c == column && r == row),
                "offset ({column}, {row})"
            );
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
            assert!(events(&display).is_empty());
            assert!(!display.is_initialized());
        }
    }

    #[test]
    fn test_largest_offset_reaches_last_ram_column() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 160).unwrap())
            .offset(4, 2)
            .build()
            .unwrap();
        let mut display = ready_display(config);
        display.draw_pixel(127, 159, Color::RED).unwrap();
        assert_eq!(
            windows(events(&display)),
            [([0, 131, 0, 131], [0, 161, 0, 161])]
        );
    }

    #[test]
    fn test_bring_up_failure_leaves_driver_uninitialized() {
        let mut display = Display::new(MockInterface {
            fail_on_command: Some(0xC0),
            ..MockInterface::default()
        });
        let result = display.init(config(128, 160), &mut MockDelay::default());
        assert!(matches!(result, Err(Error::Transport(MockError))));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Transport);
        assert!(!display.is_initialized());

        // steps before the fault were sent and stay sent
        assert!(events(&display).contains(&Event::Command(0x11)));
        assert!(!events(&display).contains(&Event::Command(0x29)));

        display.interface.fail_on_command = None;
        display
            .init(config(128, 160), &mut MockDelay::default())
            .unwrap();
        assert!(display.is_initialized());
    }

    #[test]
    fn test_operations_before_init_write_nothing() {
        let mut display = Display::new(MockInterface::default());
        let mut delay = MockDelay::default();
        let mut clock = MockClock { now: 0, step: 1 };

        assert!(matches!(display.fill(Color::RED), Err(Error::NotInitialized)));
        assert!(matches!(
            display.draw_pixel(0, 0, Color::RED),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(
            display.fill_rect(0, 0, 1, 1, Color::RED),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(display.backlight(true), Err(Error::NotInitialized)));
        assert!(matches!(display.test_pattern(), Err(Error::NotInitialized)));
        assert!(matches!(
            display.plasma(0, &mut delay, &mut clock),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(display.deinit(), Err(Error::NotInitialized)));
        assert!(events(&display).is_empty());
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_deinit_then_reinit() {
        let mut display = ready_display(config(128, 160));
        display.deinit().unwrap();
        assert_eq!(events(&display), &[Event::Backlight(false)]);
        assert_eq!(display.state(), &DriverState::Uninitialized);
        assert!(display.config().is_none());
        assert!(matches!(display.fill(Color::RED), Err(Error::NotInitialized)));

        display
            .init(config(128, 160), &mut MockDelay::default())
            .unwrap();
        assert!(display.is_initialized());
    }

    #[test]
    fn test_fill_streams_one_row_per_line() {
        let mut display = ready_display(config(128, 160));
        display.fill(Color::RED).unwrap();

        let events = events(&display);
        assert_eq!(
            windows(events),
            [([0x00, 0x00, 0x00, 0x7F], [0x00, 0x00, 0x00, 0x9F])]
        );
        let streams = streams(events);
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].len(), 160);
        assert!(streams[0].iter().all(|row| *row == row_of(Color::RED, 128)));
    }

    #[test]
    fn test_full_fill_rect_matches_fill() {
        let mut a = ready_display(config(128, 160));
        let mut b = ready_display(config(128, 160));
        a.fill(Color::CYAN).unwrap();
        b.fill_rect(0, 0, 128, 160, Color::CYAN).unwrap();
        assert_eq!(events(&a), events(&b));
    }

    #[test]
    fn test_fill_rect_window_and_rows() {
        let mut display = ready_display(config(128, 160));
        display.fill_rect(10, 150, 20, 10, Color::BLUE).unwrap();

        let events = events(&display);
        assert_eq!(
            windows(events),
            [([0x00, 10, 0x00, 29], [0x00, 150, 0x00, 159])]
        );
        let streams = streams(events);
        assert_eq!(streams[0].len(), 10);
        assert!(streams[0].iter().all(|row| *row == row_of(Color::BLUE, 20)));
    }

    #[test]
    fn test_fill_rect_out_of_bounds_writes_nothing() {
        let mut display = ready_display(config(128, 160));
        let cases = [
            (0, 0, 129, 1),
            (1, 0, 128, 1),
            (0, 0, 1, 161),
            (0, 160, 1, 1),
            (127, 159, 2, 2),
            (u16::MAX, 0, 1, 1),
            (0, 1, 1, u16::MAX),
        ];
        for (x, y, w, h) in cases {
            let result = display.fill_rect(x, y, w, h, Color::WHITE);
            assert!(
                matches!(result, Err(Error::InvalidArea { .. })),
                "({x}, {y}, {w}, {h})"
            );
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
        }
        assert!(events(&display).is_empty());
    }

    #[test]
    fn test_fill_rect_touching_edges_is_valid() {
        let mut display = ready_display(config(128, 160));
        display.fill_rect(127, 159, 1, 1, Color::WHITE).unwrap();
        assert_eq!(
            windows(events(&display)),
            [([0x00, 0x7F, 0x00, 0x7F], [0x00, 0x9F, 0x00, 0x9F])]
        );
    }

    #[test]
    fn test_empty_rect_is_a_no_op_by_default() {
        let mut display = ready_display(config(128, 160));
        display.fill_rect(5, 5, 0, 10, Color::RED).unwrap();
        display.fill_rect(5, 5, 10, 0, Color::RED).unwrap();
        display.fill_rect(128, 160, 0, 0, Color::RED).unwrap();
        assert!(events(&display).is_empty());

        // bounds still apply
        let result = display.fill_rect(200, 0, 0, 1, Color::RED);
        assert!(matches!(result, Err(Error::InvalidArea { .. })));
    }

    #[test]
    fn test_empty_rect_rejected_when_configured() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 160).unwrap())
            .reject_empty_areas(true)
            .build()
            .unwrap();
        let mut display = ready_display(config);
        let result = display.fill_rect(5, 5, 0, 10, Color::RED);
        assert!(matches!(
            result,
            Err(Error::InvalidArea { x: 5, y: 5, w: 0, h: 10 })
        ));
        assert!(events(&display).is_empty());
    }

    #[test]
    fn test_draw_pixel_streams_two_bytes() {
        let mut display = ready_display(config(128, 160));
        display.draw_pixel(3, 4, Color::YELLOW).unwrap();

        let events = events(&display);
        assert_eq!(windows(events), [([0, 3, 0, 3], [0, 4, 0, 4])]);
        assert_eq!(streams(events), [vec![vec![0xFF_u8, 0xE0]]]);
    }

    #[test]
    fn test_draw_pixel_out_of_bounds() {
        let mut display = ready_display(config(128, 160));
        assert!(matches!(
            display.draw_pixel(128, 0, Color::RED),
            Err(Error::OutOfBounds { x: 128, y: 0 })
        ));
        assert!(matches!(
            display.draw_pixel(0, 160, Color::RED),
            Err(Error::OutOfBounds { x: 0, y: 160 })
        ));
        assert!(events(&display).is_empty());
    }

    #[test]
    fn test_offsets_shift_address_window() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 128).unwrap())
            .offset(2, 3)
            .build()
            .unwrap();
        let mut display = ready_display(config);
        display.draw_pixel(0, 0, Color::RED).unwrap();
        assert_eq!(windows(events(&display)), [([0, 2, 0, 2], [0, 3, 0, 3])]);
    }

    #[test]
    fn test_rotation_swaps_drawing_surface() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 160).unwrap())
            .rotation(Rotation::Rotate90)
            .build()
            .unwrap();
        let mut display = ready_display(config);
        assert_eq!(
            display.dimensions(),
            Some(Dimensions {
                width: 160,
                height: 128
            })
        );
        display.draw_pixel(150, 100, Color::RED).unwrap();
        assert!(display.draw_pixel(100, 150, Color::RED).is_err());
        display.fill(Color::BLACK).unwrap();
        let windows = windows(events(&display));
        assert_eq!(windows[1], ([0, 0, 0, 159], [0, 0, 0, 127]));
    }

    #[test]
    fn test_backlight_after_init() {
        let mut display = ready_display(config(128, 160));
        display.backlight(false).unwrap();
        display.backlight(true).unwrap();
        assert_eq!(
            events(&display),
            &[Event::Backlight(false), Event::Backlight(true)]
        );
    }

    #[test]
    fn test_pattern_bands_on_160_rows() {
        let mut display = ready_display(config(128, 160));
        display.test_pattern().unwrap();

        let events = events(&display);
        let windows = windows(events);
        assert_eq!(windows.len(), 8);
        for (i, (cols, rows)) in windows.iter().enumerate() {
            let top = 20 * i as u8;
            assert_eq!(*cols, [0, 0, 0, 127]);
            assert_eq!(*rows, [0, top, 0, top + 19]);
        }

        let streams = streams(events);
        for (stream, color) in streams.iter().zip(TEST_PATTERN) {
            assert_eq!(stream.len(), 20);
            assert!(stream.iter().all(|row| *row == row_of(color, 128)));
        }
    }

    #[test]
    fn test_pattern_last_band_takes_remainder() {
        let mut display = ready_display(config(128, 130));
        display.test_pattern().unwrap();

        let windows = windows(events(&display));
        assert_eq!(windows.len(), 8);
        assert_eq!(windows[6].1, [0, 96, 0, 111]);
        assert_eq!(windows[7].1, [0, 112, 0, 129]);
    }

    #[test]
    fn test_pattern_on_tiny_panel_skips_empty_bands() {
        let config = Builder::new()
            .dimensions(Dimensions::new(16, 4).unwrap())
            .reject_empty_areas(true)
            .build()
            .unwrap();
        let mut display = ready_display(config);
        display.test_pattern().unwrap();

        let windows = windows(events(&display));
        assert_eq!(windows, [([0, 0, 0, 15], [0, 0, 0, 3])]);
        let streams = streams(events(&display));
        assert!(streams[0].iter().all(|row| *row == row_of(Color::BLACK, 16)));
    }

    #[test]
    fn test_plasma_zero_duration_draws_one_frame() {
        let mut display = ready_display(config(128, 160));
        let mut delay = MockDelay::default();
        let mut clock = MockClock { now: 0, step: 5 };
        display.plasma(0, &mut delay, &mut clock).unwrap();

        let events = events(&display);
        assert_eq!(
            windows(events),
            [([0x00, 0x00, 0x00, 0x7F], [0x00, 0x00, 0x00, 0x9F])]
        );
        let streams = streams(events);
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].len(), 160);
        assert!(streams[0].iter().all(|row| row.len() == 256));
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_plasma_first_frame_matches_field() {
        let mut display = ready_display(config(16, 8));
        display
            .plasma(0, &mut MockDelay::default(), &mut MockClock { now: 0, step: 1 })
            .unwrap();

        let field = Plasma::new();
        let streams = streams(events(&display));
        for (y, row) in streams[0].iter().enumerate() {
            for x in 0..16 {
                let expected = field.pixel(x as u16, y as u16).to_be_bytes();
                assert_eq!(&row[x * 2..x * 2 + 2], &expected);
            }
        }
    }

    #[test]
    fn test_plasma_runs_until_duration_elapses() {
        let mut display = ready_display(config(8, 8));
        let mut delay = MockDelay::default();
        // start reads 0, frame checks read 30, 60, 90, 120
        let mut clock = MockClock { now: 0, step: 30 };
        display.plasma(100, &mut delay, &mut clock).unwrap();

        let streams = streams(events(&display));
        assert_eq!(streams.len(), 4);
        assert!(streams.iter().all(|frame| frame.len() == 8));
        assert_eq!(delay.calls, 3);
        assert_eq!(delay.total_ms, 3 * 20);
    }

    #[test]
    fn test_plasma_frames_change() {
        let mut display = ready_display(config(32, 8));
        let mut clock = MockClock { now: 0, step: 10 };
        display
            .plasma(40, &mut MockDelay::default(), &mut clock)
            .unwrap();

        let streams = streams(events(&display));
        assert!(streams.len() >= 2);
        assert_ne!(streams[0], streams[streams.len() - 1]);
    }

    #[test]
    fn test_plasma_survives_clock_rollover() {
        let mut display = ready_display(config(4, 4));
        let mut clock = MockClock {
            now: u32::MAX - 15,
            step: 10,
        };
        display
            .plasma(25, &mut MockDelay::default(), &mut clock)
            .unwrap();
        // elapsed readings: 10, 20, 30
        assert_eq!(streams(events(&display)).len(), 3);
    }

    #[test]
    fn test_transport_error_stops_drawing() {
        let mut display = ready_display(config(128, 160));
        display.interface.fail_on_command = Some(RASET);
        let result = display.fill(Color::RED);
        assert!(matches!(result, Err(Error::Transport(MockError))));
        assert_eq!(
            events(&display),
            &[Event::Command(CASET), Event::Data(vec![0, 0, 0, 127])]
        );
    }

    #[test]
    fn test_address_range_big_endian() {
        assert_eq!(address_range(0x0102, 0x0304), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_release_returns_interface() {
        let mut display = ready_display(config(128, 160));
        display.draw_pixel(0, 0, Color::WHITE).unwrap();
        let interface = display.release();
        assert!(!interface.events.is_empty());
    }

    #[test]
    fn test_address_window_pixel_count() {
        assert_eq!(AddressWindow::new(0, 0, 128, 160).pixel_count(), 20_480);
    }
}
