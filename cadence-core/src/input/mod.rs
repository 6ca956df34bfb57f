//! Input conditioning
//!
//! Turns raw pin edges into semantic events: rotation passes from the reed
//! switch and gestures from the mode button, plus the wake press that ends a
//! suspend.

pub mod button;
pub mod trigger;
pub mod wake;

pub use button::{ButtonDebouncer, ButtonEvent, DisplayMode};
pub use trigger::{RotationEvent, TriggerFilter};
pub use wake::WakeGate;

/// Electrical level of a digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a pin reading
    pub const fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Whether this level means "active" for an input with the given polarity
    pub const fn is_active(self, active_low: bool) -> bool {
        matches!(
            (self, active_low),
            (Level::Low, true) | (Level::High, false)
        )
    }
}
