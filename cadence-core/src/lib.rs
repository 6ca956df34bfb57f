//! Board-agnostic core logic for the cadence sensor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wraparound-safe millisecond timestamps
//! - Rotation trigger filter and button gesture recognizer
//! - Session counter (rotations, elapsed time, cadence)
//! - Power state machine (active / sleep pending)
//! - Sensor controller wiring the above to its collaborators
//! - Screen layout and boot diagnostics report
//! - Hardware abstraction traits for the collaborators
//! - Compile-time configuration

#![no_std]
#![deny(unsafe_code)]

mod log;

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod input;
pub mod screen;
pub mod session;
pub mod state;
pub mod time;
pub mod traits;

pub use controller::{Directive, SensorController};
pub use diagnostics::Fault;
pub use time::Timestamp;
