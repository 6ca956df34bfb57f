//! Wake-from-suspend qualification
//!
//! The sleep gesture ends on a button release, and that release still bounces
//! when the board starts waiting for a wake. A wake is only taken on an
//! active edge that follows at least [`DEBOUNCE_TIME_MS`] of a quiet pin.

use crate::config::DEBOUNCE_TIME_MS;
use crate::input::Level;
use crate::time::Timestamp;

/// Decides which button edge ends a suspend
#[derive(Debug, Clone, Copy)]
pub struct WakeGate {
    active_low: bool,
    /// Last edge seen, or the arming time before any
    quiet_since: Timestamp,
}

impl WakeGate {
    /// Arm the gate at `now`; edges before the pin has been quiet for the
    /// debounce time are treated as bounce
    pub const fn new(active_low: bool, now: Timestamp) -> Self {
        Self {
            active_low,
            quiet_since: now,
        }
    }

    /// Feed a level change, returns true when it is a genuine press
    pub fn on_level_change(&mut self, level: Level, now: Timestamp) -> bool {
        let settled = now.has_elapsed(self.quiet_since, DEBOUNCE_TIME_MS);
        if settled && level.is_active(self.active_low) {
            return true;
        }
        self.quiet_since = now;
        false
    }
}
