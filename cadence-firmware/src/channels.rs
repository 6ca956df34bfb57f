//! Inter-task communication channels
//!
//! Edge tasks stamp pin transitions and hand them to the controller task
//! through a bounded channel. They never block: when the channel is full the
//! edge is dropped and counted.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use cadence_core::state::Edge;

/// Channel capacity for pin edges
const EDGE_CHANNEL_SIZE: usize = 16;

/// Timestamped edges from the reed switch and button tasks
pub static EDGE_CHANNEL: Channel<CriticalSectionRawMutex, Edge, EDGE_CHANNEL_SIZE> =
    Channel::new();

/// Edges lost because the channel was full
pub static DROPPED_EDGES: AtomicU32 = AtomicU32::new(0);

/// Raised by the controller once outputs are cleaned up and the board
/// should suspend
pub static SUSPEND: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Set before [`SUSPEND`] is raised; edge tasks stop forwarding once it is
pub static SUSPENDED: AtomicBool = AtomicBool::new(false);

/// Queue an edge for the controller without waiting
pub fn publish(edge: Edge) {
    if EDGE_CHANNEL.try_send(edge).is_err() {
        DROPPED_EDGES.fetch_add(1, Ordering::Relaxed);
    }
}

/// Whether the board is waiting for a wake press
pub fn suspended() -> bool {
    SUSPENDED.load(Ordering::Acquire)
}

/// Total edges dropped since boot
pub fn dropped_edges() -> u32 {
    DROPPED_EDGES.load(Ordering::Relaxed)
}
