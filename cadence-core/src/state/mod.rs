//! Sensor state machine
//!
//! Defines the power state of the sensor and the raw edges that drive it.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Edge;
pub use machine::PowerState;
