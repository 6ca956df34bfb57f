//! Board glue
//!
//! Binds the core's clock and power traits to the RP2040.

use cortex_m::peripheral::SCB;
use embassy_time::Instant;

use cadence_core::traits::{Clock, PowerControl};
use cadence_core::Timestamp;

/// Millisecond clock backed by the embassy time driver
///
/// Truncates to 32 bits; the core compares timestamps with wrapping
/// arithmetic.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(Instant::now().as_millis() as u32)
    }
}

/// Low power exit by chip reset
///
/// Entered once the wake press has been seen; until then the executor idles
/// in WFE between GPIO interrupts. The RP2040 keeps no state across the
/// reset, so the next boot starts a fresh session.
pub struct ChipReset;

impl PowerControl for ChipReset {
    fn enter_low_power(&mut self) -> ! {
        SCB::sys_reset()
    }
}
