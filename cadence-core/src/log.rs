//! Logging shim
//!
//! Expands to `defmt` macros when the `defmt` feature is enabled and to
//! nothing otherwise, so host builds stay free of a global logger.
//!
//! The warning level is `warning!` since `warn` would clash with the
//! built-in lint attribute.

macro_rules! debug {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
    );
}

macro_rules! info {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)+);
    );
}

macro_rules! warning {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
    );
}

pub(crate) use debug;
pub(crate) use info;
pub(crate) use warning;
