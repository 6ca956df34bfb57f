//! Millisecond timestamps
//!
//! The firmware clock is a free-running 32-bit millisecond counter that wraps
//! roughly every 49.7 days. All arithmetic goes through [`Timestamp::ticks_diff`],
//! which returns the signed wrapping difference, so comparisons stay correct
//! across a rollover as long as the two instants are less than ~24.8 days
//! apart.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Monotonic millisecond timestamp (wraps at `u32::MAX`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp(u32);

impl Timestamp {
    /// Create a timestamp from raw milliseconds
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Raw millisecond value
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Signed difference `self - earlier` in milliseconds
    ///
    /// Negative when `earlier` is actually later than `self`.
    pub const fn ticks_diff(self, earlier: Timestamp) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }

    /// Milliseconds elapsed since `earlier`, clamped at zero
    pub const fn millis_since(self, earlier: Timestamp) -> u32 {
        let diff = self.ticks_diff(earlier);
        if diff < 0 {
            0
        } else {
            diff as u32
        }
    }

    /// Check whether at least `ms` have passed since `earlier`
    pub const fn has_elapsed(self, earlier: Timestamp, ms: u32) -> bool {
        self.ticks_diff(earlier) as i64 >= ms as i64
    }

    /// Timestamp `ms` milliseconds after this one
    pub const fn add_millis(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }
}

impl From<u32> for Timestamp {
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}
