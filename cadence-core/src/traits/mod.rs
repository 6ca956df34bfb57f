//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod display;
pub mod indicator;
pub mod power;

pub use clock::Clock;
pub use display::{DisplayDriver, DisplayError};
pub use indicator::{PinError, StatusLed};
pub use power::PowerControl;
