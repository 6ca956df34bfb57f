//! Fault taxonomy and boot diagnostics
//!
//! The core state machine has no error states of its own; faults come from
//! collaborators. Boot faults keep the firmware out of its run loop, run-time
//! faults are logged and retried after a cooldown.

pub mod report;

pub use report::{DiagnosticReport, Subsystem};

use crate::traits::{DisplayError, PinError};

/// Numeric diagnostic codes, as shown on the debug probe log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorCode {
    HardwareInit = 1,
    SensorRead = 2,
    Display = 3,
}

impl ErrorCode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Fatal boot failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// A peripheral could not be brought up
    HardwareInit,
    /// The self-test found a failing subsystem
    Diagnostics(DiagnosticReport),
}

impl BootError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            BootError::HardwareInit => ErrorCode::HardwareInit,
            BootError::Diagnostics(report) => report.error_code().unwrap_or(ErrorCode::HardwareInit),
        }
    }
}

/// Recoverable run-time faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Display write failed; the next refresh retries
    Display(DisplayError),
    /// LED write failed
    Indicator(PinError),
}

impl Fault {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Fault::Display(_) => ErrorCode::Display,
            Fault::Indicator(_) => ErrorCode::HardwareInit,
        }
    }
}

impl From<DisplayError> for Fault {
    fn from(e: DisplayError) -> Self {
        Fault::Display(e)
    }
}

impl From<PinError> for Fault {
    fn from(e: PinError) -> Self {
        Fault::Indicator(e)
    }
}
