//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via blocking I2C.
//! Text is rendered into a page-organized frame buffer with
//! embedded-graphics and pushed to the panel one page at a time.

use core::convert::Infallible;

use cadence_core::config::{OLED_ADDR, OLED_HEIGHT, OLED_WIDTH};
use cadence_core::screen::Screen;
use cadence_core::traits::{DisplayDriver, DisplayError};
use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

const WIDTH: usize = OLED_WIDTH as usize;
const HEIGHT: usize = OLED_HEIGHT as usize;
const PAGES: usize = HEIGHT / 8;

/// Horizontal pitch of one text cell
const CHAR_WIDTH: i32 = 6;
/// Vertical pitch of one text row (one page)
const ROW_HEIGHT: i32 = 8;

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const NOP: u8 = 0xE3;
}

/// Power-up sequence for a 128x64 panel with internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    (HEIGHT - 1) as u8,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_MEMORY_MODE,
    0x02, // Page addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// 1bpp frame buffer in SSD1306 page layout
///
/// Byte `pages[p][x]` holds rows `8p..8p+8` of column `x`, LSB on top.
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Set or clear a single pixel; out-of-bounds writes are dropped
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(byte);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|page| page.iter().all(|&b| b == 0))
    }

    /// Render every non-empty row of `screen`
    pub fn render(&mut self, screen: &Screen) {
        self.fill(false);
        let style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
        for (row, text) in screen.rows() {
            let origin = Point::new(0, row as i32 * ROW_HEIGHT);
            Text::with_baseline(text, origin, style, Baseline::Top)
                .draw(self)
                .ok();
        }
    }

    /// Width in pixels covered by `chars` text cells
    pub const fn text_width(chars: usize) -> i32 {
        chars as i32 * CHAR_WIDTH
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set_pixel(point.x as usize, point.y as usize, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    buffer: FrameBuffer,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver at the default panel address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, OLED_ADDR)
    }

    /// Create a driver at a specific 7-bit address (0x3C or 0x3D)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Frame buffer as last rendered
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Bus)
    }

    /// Push the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            data[1..].copy_from_slice(self.buffer.page(page));
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayDriver for Ssd1306<I2C> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.initialized = false;
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        self.initialized = true;

        self.buffer.fill(false);
        self.flush()
    }

    fn probe(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::NOP)
    }

    fn draw(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.buffer.render(screen);
        self.flush()
    }
}
