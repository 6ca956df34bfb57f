//! Ride session accounting

pub mod counter;

pub use counter::{SessionCounter, SessionSnapshot, SessionTime};
