//! Screen layout
//!
//! The OLED is driven as a text grid of 8 rows by 21 columns (6x8 cells on
//! a 128x64 panel). The controller builds a [`Screen`] from the current
//! [`DisplayStatus`] and hands it to the display driver.
//!
//! ```text
//! row 0  Time: 12:34
//! row 3  Rotations:        | Cadence:
//! row 5  1234              | 87 rpm
//! row 7  SLEEP PENDING     (only while sleep is pending)
//! ```

use core::fmt::Write;

use heapless::String;

use crate::input::DisplayMode;
use crate::session::SessionSnapshot;

/// Text rows on the panel
pub const SCREEN_ROWS: usize = 8;

/// Text columns on the panel
pub const SCREEN_COLS: usize = 21;

const ROW_TIME: u8 = 0;
const ROW_LABEL: u8 = 3;
const ROW_VALUE: u8 = 5;
const ROW_SLEEP: u8 = 7;

/// Everything the display shows, captured at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayStatus {
    pub session: SessionSnapshot,
    pub mode: DisplayMode,
    pub sleep_pending: bool,
}

/// A screen buffer ready to be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Lay out the session status
    pub fn status(status: &DisplayStatus) -> Self {
        let mut screen = Self::new();
        let session = &status.session;

        let mut line: String<SCREEN_COLS> = String::new();
        let _ = write!(line, "Time: {}", session.session_time());
        screen.set_line(ROW_TIME, &line);

        line.clear();
        match status.mode {
            DisplayMode::RawCount => {
                screen.set_line(ROW_LABEL, "Rotations:");
                let _ = write!(line, "{}", session.total_triggers);
            }
            DisplayMode::Rpm => {
                screen.set_line(ROW_LABEL, "Cadence:");
                let _ = write!(line, "{} rpm", session.cadence_rpm);
            }
        }
        screen.set_line(ROW_VALUE, &line);

        if status.sleep_pending {
            screen.set_line(ROW_SLEEP, "SLEEP PENDING");
        }

        screen
    }

    /// Frame drawn by the boot self-test
    pub fn test_pattern() -> Self {
        let mut screen = Self::new();
        screen.set_line(0, "Test");
        screen
    }

    /// Clear the screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set text at a specific row, truncated to the row width
    pub fn set_line(&mut self, row: u8, text: &str) {
        if let Some(line) = self.lines.get_mut(row as usize) {
            line.clear();
            for ch in text.chars() {
                if line.push(ch).is_err() {
                    break;
                }
            }
        }
    }

    /// Get a line of text
    pub fn line(&self, row: u8) -> &str {
        self.lines
            .get(row as usize)
            .map(|l| l.as_str())
            .unwrap_or("")
    }

    /// Iterate over non-empty rows as `(row, text)`
    pub fn rows(&self) -> impl Iterator<Item = (u8, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_empty())
            .map(|(i, l)| (i as u8, l.as_str()))
    }

    /// Check if nothing would be drawn
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
