//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cadence-core for the sensor's peripherals:
//!
//! - SSD1306 OLED over I2C
//! - GPIO status LED
//! - Boot self-test over all peripherals

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod led;

pub use display::Ssd1306;
pub use led::GpioLed;
pub use self_test::SelfTest;
