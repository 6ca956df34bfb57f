//! Status LED trait

/// Errors from a digital output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// The pin driver refused the write
    Write,
}

/// Trait for the rotation indicator LED
pub trait StatusLed {
    /// Light the LED
    fn on(&mut self) -> Result<(), PinError>;

    /// Turn the LED off
    fn off(&mut self) -> Result<(), PinError>;

    /// Check if the LED is currently lit
    fn is_on(&self) -> bool;
}
