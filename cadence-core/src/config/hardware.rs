//! Hardware configuration
//!
//! Pin assignments and display geometry for the reference board
//! (Raspberry Pi Pico, SSD1306 OLED on I2C0).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new active-high pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an active-low input with the internal pull-up enabled
    ///
    /// Reed switch and button both short the pin to ground when closed.
    pub const fn active_low_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Board pin map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    /// Reed switch input (falling edge = magnet pass)
    pub reed_switch: PinConfig,
    /// Mode button input, also the wake source after suspend
    pub button: PinConfig,
    /// Rotation indicator LED
    pub led: PinConfig,
    /// I2C0 data
    pub i2c_sda: u8,
    /// I2C0 clock
    pub i2c_scl: u8,
}

/// Pin map of the reference board
pub const PINS: PinMap = PinMap {
    reed_switch: PinConfig::active_low_pullup(15),
    button: PinConfig::active_low_pullup(16),
    led: PinConfig::new(13),
    i2c_sda: 0,
    i2c_scl: 1,
};

/// OLED width in pixels
pub const OLED_WIDTH: u16 = 128;

/// OLED height in pixels
pub const OLED_HEIGHT: u16 = 64;

/// OLED 7-bit I2C address
pub const OLED_ADDR: u8 = 0x3C;

/// I2C bus frequency for the OLED
pub const I2C_FREQUENCY_HZ: u32 = 400_000;
