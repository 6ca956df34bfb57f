//! Boot self-test report
//!
//! Each subsystem is checked once at boot. The run loop only starts when
//! every subsystem has been checked and passed.

use super::ErrorCode;

/// Subsystems covered by the self-test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    /// OLED acknowledges its address on the bus
    I2c,
    /// OLED accepts a frame
    Oled,
    /// Reed switch input is readable
    ReedSwitch,
    /// Button input is readable
    Button,
    /// LED output accepts writes
    Led,
}

impl Subsystem {
    /// Every subsystem, in check order
    pub const ALL: [Subsystem; 5] = [
        Subsystem::I2c,
        Subsystem::Oled,
        Subsystem::Led,
        Subsystem::ReedSwitch,
        Subsystem::Button,
    ];

    const fn bit(self) -> u8 {
        match self {
            Subsystem::I2c => 1 << 0,
            Subsystem::Oled => 1 << 1,
            Subsystem::ReedSwitch => 1 << 2,
            Subsystem::Button => 1 << 3,
            Subsystem::Led => 1 << 4,
        }
    }

    /// Diagnostic code reported when this subsystem fails
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Subsystem::I2c | Subsystem::Oled => ErrorCode::Display,
            Subsystem::ReedSwitch | Subsystem::Button => ErrorCode::SensorRead,
            Subsystem::Led => ErrorCode::HardwareInit,
        }
    }
}

/// Pass/fail per subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticReport {
    checked: u8,
    passed: u8,
}

impl DiagnosticReport {
    /// Create an empty report (nothing checked yet)
    pub const fn new() -> Self {
        Self {
            checked: 0,
            passed: 0,
        }
    }

    /// Record the outcome of one check
    pub fn record(&mut self, subsystem: Subsystem, ok: bool) {
        let bit = subsystem.bit();
        self.checked |= bit;
        if ok {
            self.passed |= bit;
        } else {
            self.passed &= !bit;
        }
    }

    /// Check if a subsystem was checked and passed
    pub fn passed(&self, subsystem: Subsystem) -> bool {
        self.passed & subsystem.bit() != 0
    }

    /// Check if a subsystem has been checked at all
    pub fn checked(&self, subsystem: Subsystem) -> bool {
        self.checked & subsystem.bit() != 0
    }

    /// Check if every subsystem was checked and passed
    pub fn all_passed(&self) -> bool {
        Subsystem::ALL.iter().all(|&s| self.passed(s))
    }

    /// First subsystem (in check order) that failed or was never checked
    pub fn first_failure(&self) -> Option<Subsystem> {
        Subsystem::ALL.iter().copied().find(|&s| !self.passed(s))
    }

    /// Diagnostic code for the first failure
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.first_failure().map(Subsystem::error_code)
    }
}
