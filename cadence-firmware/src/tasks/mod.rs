//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod controller;
pub mod reed;

pub use button::button_task;
pub use controller::{controller_task, Sensor};
pub use reed::reed_task;
