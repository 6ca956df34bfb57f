//! Display driver trait

use crate::screen::Screen;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed (NACK, arbitration loss, timeout)
    Bus,
    /// Display not initialized
    NotInitialized,
}

/// Trait for the status display
///
/// The display is a dumb text surface: the controller decides what goes on
/// it and the driver only draws. Every call either completes or reports an
/// error; the caller decides whether a failure matters.
pub trait DisplayDriver {
    /// Run the panel's power-up sequence
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Check that the panel answers on its bus
    fn probe(&mut self) -> Result<(), DisplayError>;

    /// Replace the whole panel content with `screen`
    fn draw(&mut self, screen: &Screen) -> Result<(), DisplayError>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.draw(&Screen::new())
    }
}
