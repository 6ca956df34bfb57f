//! Configuration constants
//!
//! Everything here is compile-time; there is no runtime reconfiguration.

pub mod hardware;
pub mod timing;

pub use hardware::*;
pub use timing::*;
