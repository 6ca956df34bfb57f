//! Time source trait

use crate::time::Timestamp;

/// Monotonic millisecond clock
///
/// Implementations may wrap; callers only ever compare timestamps through
/// [`Timestamp::ticks_diff`].
pub trait Clock {
    /// Current time
    fn now(&self) -> Timestamp;
}
