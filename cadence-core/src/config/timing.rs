//! Timing tunables
//!
//! All values are in milliseconds unless stated otherwise. They are fixed at
//! compile time.

/// Minimum spacing between accepted button edges
pub const DEBOUNCE_TIME_MS: u32 = 100;

/// Minimum spacing between accepted rotation events
///
/// 200 ms caps the measurable cadence at 300 rpm, well above pedalling range.
pub const DEAD_TIME_MS: u32 = 200;

/// Press duration at or above which a release counts as a long press
pub const LONG_PRESS_TIME_MS: u32 = 1000;

/// Maximum gap between short presses that still extends a sequence
pub const SHORT_PRESS_WINDOW_MS: u32 = 500;

/// Consecutive short presses that toggle sleep mode
pub const SLEEP_TOGGLE_COUNT: u32 = 5;

/// Display refresh interval
pub const DISPLAY_REFRESH_MS: u32 = 100;

/// How long the LED stays lit after an accepted rotation
pub const LED_FLASH_MS: u32 = 50;

/// Upper bound on how long the controller loop sleeps between polls
pub const MAIN_LOOP_POLL_MS: u32 = 10;

/// Pause after a faulted loop iteration before trying again
pub const ERROR_COOLDOWN_MS: u32 = 1000;

/// LED on-time during the boot self-test
pub const LED_SELF_TEST_MS: u32 = 100;

/// Cadence reads zero once the last rotation is older than this
pub const CADENCE_TIMEOUT_MS: u32 = 3000;

/// Milliseconds per minute, for cadence conversion
pub const MS_PER_MINUTE: u32 = 60_000;
