//! Session counter
//!
//! Accumulates accepted rotations and tracks how long the session has been
//! running. The session starts at boot and restarts on every reset.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{CADENCE_TIMEOUT_MS, MS_PER_MINUTE};
use crate::time::Timestamp;

/// Read-only view of the session for the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSnapshot {
    /// Rotations since the session started
    pub total_triggers: u64,
    /// Whole minutes since the session started
    pub elapsed_minutes: u32,
    /// Seconds past the last whole minute (0-59)
    pub elapsed_seconds: u8,
    /// Current cadence, 0 when stopped
    pub cadence_rpm: u16,
}

impl SessionSnapshot {
    /// Session time formatted as `MM:SS`
    pub fn session_time(&self) -> SessionTime {
        SessionTime {
            minutes: self.elapsed_minutes,
            seconds: self.elapsed_seconds,
        }
    }
}

/// `MM:SS` formatter for a session duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTime {
    minutes: u32,
    seconds: u8,
}

impl fmt::Display for SessionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Rotation and session-time accumulator
#[derive(Debug, Clone)]
pub struct SessionCounter {
    /// Rotations since the last reset
    total_triggers: u64,
    /// Reset point of the session clock
    session_start_time: Timestamp,
    /// Most recent rotation, for cadence
    last_trigger_time: Option<Timestamp>,
    /// Spacing of the two most recent rotations
    last_interval_ms: Option<u32>,
}

impl SessionCounter {
    /// Start a session at `now`
    pub const fn new(now: Timestamp) -> Self {
        Self {
            total_triggers: 0,
            session_start_time: now,
            last_trigger_time: None,
            last_interval_ms: None,
        }
    }

    /// Record one accepted rotation
    pub fn add_trigger(&mut self, now: Timestamp) {
        self.total_triggers += 1;

        if let Some(last) = self.last_trigger_time {
            self.last_interval_ms = Some(now.millis_since(last));
        }
        self.last_trigger_time = Some(now);
    }

    /// Session duration as `(minutes, seconds)`
    pub fn elapsed(&self, now: Timestamp) -> (u32, u8) {
        let total_seconds = now.millis_since(self.session_start_time) / 1000;
        (total_seconds / 60, (total_seconds % 60) as u8)
    }

    /// Zero the count and restart the session clock at `now`
    pub fn reset(&mut self, now: Timestamp) {
        self.total_triggers = 0;
        self.session_start_time = now;
        self.last_trigger_time = None;
        self.last_interval_ms = None;
    }

    /// Cadence from the last rotation interval
    ///
    /// Reads 0 before the second rotation and once the crank has been still
    /// for longer than [`CADENCE_TIMEOUT_MS`].
    pub fn cadence_rpm(&self, now: Timestamp) -> u16 {
        let (Some(last), Some(interval)) = (self.last_trigger_time, self.last_interval_ms) else {
            return 0;
        };
        if interval == 0 || now.millis_since(last) > CADENCE_TIMEOUT_MS {
            return 0;
        }
        (MS_PER_MINUTE / interval).min(u16::MAX as u32) as u16
    }

    /// Snapshot of the session at `now`
    pub fn snapshot(&self, now: Timestamp) -> SessionSnapshot {
        let (elapsed_minutes, elapsed_seconds) = self.elapsed(now);
        SessionSnapshot {
            total_triggers: self.total_triggers,
            elapsed_minutes,
            elapsed_seconds,
            cadence_rpm: self.cadence_rpm(now),
        }
    }

    pub fn total_triggers(&self) -> u64 {
        self.total_triggers
    }

    pub fn session_start_time(&self) -> Timestamp {
        self.session_start_time
    }
}
