//! Power control trait

/// Low-power entry
///
/// Suspending is one-way: the firmware does not resume where it left off.
/// Waking restarts the chip and the session begins again from zero.
pub trait PowerControl {
    /// Enter the lowest power state the board supports
    ///
    /// Callers must have cleaned up their outputs first.
    fn enter_low_power(&mut self) -> !;
}
