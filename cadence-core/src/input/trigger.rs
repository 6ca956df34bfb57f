//! Rotation trigger filter
//!
//! A reed switch chatters when the magnet enters and leaves its field, and a
//! crank rocked back and forth can produce several edges per pass. The filter
//! enforces a dead time between accepted rotations.

use crate::config::DEAD_TIME_MS;
use crate::time::Timestamp;

/// One confirmed pass of the magnet past the reed switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationEvent {
    /// When the pass was accepted
    pub at: Timestamp,
}

/// Dead-time filter for reed switch falling edges
#[derive(Debug, Clone, Default)]
pub struct TriggerFilter {
    /// Last accepted edge, `None` until the first rotation
    last_trigger_time: Option<Timestamp>,
}

impl TriggerFilter {
    /// Create a filter that accepts the first edge it sees
    pub const fn new() -> Self {
        Self {
            last_trigger_time: None,
        }
    }

    /// Feed a falling edge
    ///
    /// Returns a rotation event unless the edge lands within the dead time of
    /// the previously accepted one. Rejected edges do not move the anchor.
    pub fn on_edge(&mut self, now: Timestamp) -> Option<RotationEvent> {
        if let Some(last) = self.last_trigger_time {
            if now.ticks_diff(last) < DEAD_TIME_MS as i32 {
                return None;
            }
        }

        self.last_trigger_time = Some(now);
        Some(RotationEvent { at: now })
    }

    /// Timestamp of the last accepted rotation
    pub fn last_trigger_time(&self) -> Option<Timestamp> {
        self.last_trigger_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(v: u32) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn test_first_edge_is_accepted() {
        let mut filter = TriggerFilter::new();
        assert_eq!(filter.on_edge(ms(5)), Some(RotationEvent { at: ms(5) }));
    }

    #[test]
    fn test_bounce_within_dead_time_is_rejected() {
        let mut filter = TriggerFilter::new();
        assert!(filter.on_edge(ms(1_000)).is_some());
        assert!(filter.on_edge(ms(1_003)).is_none());
        assert!(filter.on_edge(ms(1_199)).is_none());
        assert_eq!(filter.last_trigger_time(), Some(ms(1_000)));
    }

    #[test]
    fn test_edge_at_exact_dead_time_is_accepted() {
        let mut filter = TriggerFilter::new();
        assert!(filter.on_edge(ms(1_000)).is_some());
        assert!(filter.on_edge(ms(1_200)).is_some());
    }

    #[test]
    fn test_rejected_edges_do_not_extend_dead_time() {
        let mut filter = TriggerFilter::new();
        assert!(filter.on_edge(ms(0)).is_some());
        assert!(filter.on_edge(ms(150)).is_none());
        // 200ms after the accepted edge, even though only 50ms after the bounce
        assert!(filter.on_edge(ms(200)).is_some());
    }

    #[test]
    fn test_dead_time_across_counter_wraparound() {
        let mut filter = TriggerFilter::new();
        let start = ms(u32::MAX - 99);
        assert!(filter.on_edge(start).is_some());
        assert!(filter.on_edge(start.add_millis(150)).is_none());
        assert!(filter.on_edge(start.add_millis(250)).is_some());
    }

    #[test]
    fn test_edge_stamped_before_last_is_rejected() {
        let mut filter = TriggerFilter::new();
        assert!(filter.on_edge(ms(5_000)).is_some());
        assert!(filter.on_edge(ms(4_000)).is_none());
    }

    proptest! {
        #[test]
        fn prop_two_edges_inside_dead_time_yield_one_event(
            start in any::<u32>(),
            gap in 0u32..DEAD_TIME_MS,
        ) {
            let mut filter = TriggerFilter::new();
            let first = ms(start);
            let events = [filter.on_edge(first), filter.on_edge(first.add_millis(gap))];
            prop_assert_eq!(events.iter().filter(|e| e.is_some()).count(), 1);
        }

        #[test]
        fn prop_two_edges_outside_dead_time_yield_two_events(
            start in any::<u32>(),
            gap in DEAD_TIME_MS..(i32::MAX as u32),
        ) {
            let mut filter = TriggerFilter::new();
            let first = ms(start);
            prop_assert!(filter.on_edge(first).is_some());
            prop_assert!(filter.on_edge(first.add_millis(gap)).is_some());
        }
    }
}
