//! Raw input edges delivered to the controller

use crate::input::Level;
use crate::time::Timestamp;

/// A pin edge stamped where it was observed
///
/// Edge tasks stamp the time before queueing, so filtering sees the moment
/// of the edge rather than the moment the controller got to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Reed switch fell (magnet arrived)
    Rotation { at: Timestamp },
    /// Button changed level
    Button { level: Level, at: Timestamp },
}

impl Edge {
    /// When the edge was observed
    pub fn at(&self) -> Timestamp {
        match self {
            Edge::Rotation { at } | Edge::Button { at, .. } => *at,
        }
    }
}
