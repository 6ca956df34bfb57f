//! GPIO status LED
//!
//! Drives the rotation indicator LED directly from a GPIO pin.

use cadence_core::traits::{PinError, StatusLed};
use embedded_hal::digital::OutputPin;

/// GPIO LED output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Current logical state (true = lit)
    on: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// Create a new GPIO LED and drive it off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, PinError> {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.set(false)?;
        Ok(led)
    }

    /// Create a new GPIO LED with active-high output
    pub fn new_active_high(pin: P) -> Result<Self, PinError> {
        Self::new(pin, false)
    }

    /// Create a new GPIO LED with active-low output
    pub fn new_active_low(pin: P) -> Result<Self, PinError> {
        Self::new(pin, true)
    }

    fn set(&mut self, on: bool) -> Result<(), PinError> {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| PinError::Write)?;
        self.on = on;
        Ok(())
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> StatusLed for GpioLed<P> {
    fn on(&mut self) -> Result<(), PinError> {
        self.set(true)
    }

    fn off(&mut self) -> Result<(), PinError> {
        self.set(false)
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
