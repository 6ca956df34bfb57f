//! Power state machine
//!
//! The sensor is either counting or has been asked to sleep. Entering sleep
//! is terminal for the running firmware (the chip suspends and restarts on
//! wake), but the state is still modelled so the display can show the
//! pending sleep and rotations are dropped in the meantime.

use crate::input::ButtonEvent;

/// Sensor power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Counting rotations and refreshing the display
    #[default]
    Active,
    /// Sleep gesture seen; rotations ignored, suspend requested
    SleepPending,
}

impl PowerState {
    /// Check if rotations should be counted in this state
    pub fn counts_rotations(&self) -> bool {
        matches!(self, PowerState::Active)
    }

    /// Check if the sensor is on its way to low power
    pub fn is_sleeping(&self) -> bool {
        matches!(self, PowerState::SleepPending)
    }

    /// Process a button gesture and return the next state
    pub fn transition(self, event: ButtonEvent) -> Self {
        use PowerState::*;

        match (self, event) {
            (Active, ButtonEvent::ToggleSleep) => SleepPending,
            (SleepPending, ButtonEvent::ToggleSleep) => Active,

            // Other gestures do not change the power state
            _ => self,
        }
    }
}
