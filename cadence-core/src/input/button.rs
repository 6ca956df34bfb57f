//! Button debouncer and gesture recognizer
//!
//! The mode button is the only user input. Raw level changes are debounced
//! and turned into gestures:
//!
//! ```text
//!   press ──────────────► PressStart
//!   release (held ≥ 1s) ► LongPress            (session reset)
//!   release (held < 1s) ► ShortPress           (display mode toggle)
//!   5th short press in a
//!   row, ≤ 500ms apart ─► ToggleSleep          (sleep / wake)
//! ```
//!
//! The short-press window is checked after the counter is incremented: the
//! increment happens first, and a press landing more than
//! [`SHORT_PRESS_WINDOW_MS`] after the previous short press then overwrites
//! the count with 1. This ordering is kept as observed device behavior.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Level;
use crate::config::{
    DEBOUNCE_TIME_MS, LONG_PRESS_TIME_MS, SHORT_PRESS_WINDOW_MS, SLEEP_TOGGLE_COUNT,
};
use crate::time::Timestamp;

/// Semantic button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Button went down
    PressStart,
    /// Released after being held at least [`LONG_PRESS_TIME_MS`]
    LongPress,
    /// Released before the long-press threshold
    ShortPress,
    /// Short press that completed a sleep-toggle sequence
    ToggleSleep,
}

/// What the main area of the display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayMode {
    /// Total rotations this session
    #[default]
    RawCount,
    /// Current cadence in revolutions per minute
    Rpm,
}

impl DisplayMode {
    /// The other mode
    pub const fn toggled(self) -> Self {
        match self {
            DisplayMode::RawCount => DisplayMode::Rpm,
            DisplayMode::Rpm => DisplayMode::RawCount,
        }
    }
}

/// Debounced button state plus gesture bookkeeping
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    /// Input reads low when pressed (pull-up wiring)
    active_low: bool,
    /// Current debounced press state
    is_pressed: bool,
    /// When the current press began
    press_start_time: Timestamp,
    /// Last accepted edge, `None` until the first one
    last_event_time: Option<Timestamp>,
    /// Consecutive short presses in the current sequence
    short_press_count: u32,
    /// Anchor of the short-press window
    last_short_press_time: Option<Timestamp>,
    /// Toggled by a full short-press sequence
    sleep_mode: bool,
    /// Toggled by the controller on a plain short press
    display_mode: DisplayMode,
}

impl ButtonDebouncer {
    /// Create a debouncer for a button wired to ground with a pull-up
    pub const fn new() -> Self {
        Self::with_polarity(true)
    }

    /// Create a debouncer with explicit input polarity
    pub const fn with_polarity(active_low: bool) -> Self {
        Self {
            active_low,
            is_pressed: false,
            press_start_time: Timestamp::from_millis(0),
            last_event_time: None,
            short_press_count: 0,
            last_short_press_time: None,
            sleep_mode: false,
            display_mode: DisplayMode::RawCount,
        }
    }

    /// Feed a raw level change observed at `now`
    ///
    /// Edges inside the debounce interval of the last accepted edge are
    /// dropped without touching any state.
    pub fn on_level_change(&mut self, level: Level, now: Timestamp) -> Option<ButtonEvent> {
        if let Some(last) = self.last_event_time {
            if now.ticks_diff(last) < DEBOUNCE_TIME_MS as i32 {
                return None;
            }
        }
        self.last_event_time = Some(now);

        let down = level.is_active(self.active_low);

        if down && !self.is_pressed {
            self.is_pressed = true;
            self.press_start_time = now;
            Some(ButtonEvent::PressStart)
        } else if !down && self.is_pressed {
            self.is_pressed = false;
            Some(self.on_release(now))
        } else {
            None
        }
    }

    fn on_release(&mut self, now: Timestamp) -> ButtonEvent {
        let duration = now.millis_since(self.press_start_time);
        if duration >= LONG_PRESS_TIME_MS {
            return ButtonEvent::LongPress;
        }

        self.short_press_count = self.short_press_count.saturating_add(1);

        let within_window = self
            .last_short_press_time
            .is_some_and(|last| now.ticks_diff(last) <= SHORT_PRESS_WINDOW_MS as i32);
        if !within_window {
            self.short_press_count = 1;
        }

        self.last_short_press_time = Some(now);

        if self.short_press_count >= SLEEP_TOGGLE_COUNT {
            self.short_press_count = 0;
            self.sleep_mode = !self.sleep_mode;
            ButtonEvent::ToggleSleep
        } else {
            ButtonEvent::ShortPress
        }
    }

    /// Flip between raw count and cadence display
    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.display_mode
    }

    /// Forget any short presses counted so far
    pub fn clear_press_count(&mut self) {
        self.short_press_count = 0;
    }

    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    pub fn sleep_mode(&self) -> bool {
        self.sleep_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn short_press_count(&self) -> u32 {
        self.short_press_count
    }
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(v: u32) -> Timestamp {
        Timestamp::from_millis(v)
    }

    /// Press at `at`, release `held` ms later
    fn click(
        button: &mut ButtonDebouncer,
        at: u32,
        held: u32,
    ) -> (Option<ButtonEvent>, Option<ButtonEvent>) {
        let down = button.on_level_change(Level::Low, ms(at));
        let up = button.on_level_change(Level::High, ms(at + held));
        (down, up)
    }

    #[test]
    fn test_press_start_on_active_level() {
        let mut button = ButtonDebouncer::new();
        assert_eq!(
            button.on_level_change(Level::Low, ms(1_000)),
            Some(ButtonEvent::PressStart)
        );
        assert!(button.is_pressed());
    }

    #[test]
    fn test_active_high_polarity() {
        let mut button = ButtonDebouncer::with_polarity(false);
        assert_eq!(
            button.on_level_change(Level::High, ms(1_000)),
            Some(ButtonEvent::PressStart)
        );
        assert_eq!(
            button.on_level_change(Level::Low, ms(1_200)),
            Some(ButtonEvent::ShortPress)
        );
    }

    #[test]
    fn test_bounce_is_ignored_without_state_change() {
        let mut button = ButtonDebouncer::new();
        button.on_level_change(Level::Low, ms(1_000));
        let before = button.clone();

        assert_eq!(button.on_level_change(Level::High, ms(1_050)), None);
        assert!(button.is_pressed());
        assert_eq!(button.last_event_time, before.last_event_time);
        assert_eq!(button.short_press_count(), before.short_press_count());
    }

    #[test]
    fn test_repeated_level_consumes_debounce_slot() {
        let mut button = ButtonDebouncer::new();
        assert_eq!(button.on_level_change(Level::High, ms(1_000)), None);
        assert_eq!(button.last_event_time, Some(ms(1_000)));
        // Within 100ms of the no-op edge, so still gated
        assert_eq!(button.on_level_change(Level::Low, ms(1_050)), None);
        assert_eq!(
            button.on_level_change(Level::Low, ms(1_100)),
            Some(ButtonEvent::PressStart)
        );
    }

    #[test]
    fn test_release_without_press_yields_nothing() {
        let mut button = ButtonDebouncer::new();
        assert_eq!(button.on_level_change(Level::High, ms(1_000)), None);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_long_press() {
        let mut button = ButtonDebouncer::new();
        let (down, up) = click(&mut button, 1_000, 1_000);
        assert_eq!(down, Some(ButtonEvent::PressStart));
        assert_eq!(up, Some(ButtonEvent::LongPress));
        assert_eq!(button.short_press_count(), 0);
    }

    #[test]
    fn test_long_press_leaves_short_press_count_alone() {
        let mut button = ButtonDebouncer::new();
        click(&mut button, 1_000, 100);
        click(&mut button, 1_300, 100);
        assert_eq!(button.short_press_count(), 2);

        let (_, up) = click(&mut button, 1_600, 1_500);
        assert_eq!(up, Some(ButtonEvent::LongPress));
        assert_eq!(button.short_press_count(), 2);
    }

    #[test]
    fn test_just_under_long_press_is_short() {
        let mut button = ButtonDebouncer::new();
        let (_, up) = click(&mut button, 1_000, 999);
        assert_eq!(up, Some(ButtonEvent::ShortPress));
        assert_eq!(button.short_press_count(), 1);
    }

    #[test]
    fn test_five_short_presses_toggle_sleep() {
        let mut button = ButtonDebouncer::new();
        let mut events = heapless::Vec::<ButtonEvent, 10>::new();

        for i in 0..5 {
            let (down, up) = click(&mut button, 1_000 + i * 300, 150);
            events.push(down.unwrap()).unwrap();
            events.push(up.unwrap()).unwrap();
        }

        use ButtonEvent::*;
        assert_eq!(
            events.as_slice(),
            &[
                PressStart, ShortPress, PressStart, ShortPress, PressStart, ShortPress,
                PressStart, ShortPress, PressStart, ToggleSleep,
            ]
        );
        assert!(button.sleep_mode());
        assert_eq!(button.short_press_count(), 0);
    }

    #[test]
    fn test_second_sequence_toggles_sleep_back() {
        let mut button = ButtonDebouncer::new();
        for i in 0..10 {
            click(&mut button, 1_000 + i * 300, 150);
        }
        assert!(!button.sleep_mode());
    }

    #[test]
    fn test_gap_restarts_sequence_at_one() {
        let mut button = ButtonDebouncer::new();
        click(&mut button, 1_000, 100);
        click(&mut button, 1_300, 100);
        assert_eq!(button.short_press_count(), 2);

        // Release lands 700ms after the previous short press
        let (_, up) = click(&mut button, 1_900, 100);
        assert_eq!(up, Some(ButtonEvent::ShortPress));
        assert_eq!(button.short_press_count(), 1);
    }

    #[test]
    fn test_stale_sequence_does_not_reach_threshold_after_gap() {
        let mut button = ButtonDebouncer::new();
        for i in 0..4 {
            click(&mut button, 1_000 + i * 300, 100);
        }
        assert_eq!(button.short_press_count(), 4);

        // Incremented to 5 first, then overwritten with 1 by the window check
        let (_, up) = click(&mut button, 10_000, 100);
        assert_eq!(up, Some(ButtonEvent::ShortPress));
        assert_eq!(button.short_press_count(), 1);
        assert!(!button.sleep_mode());
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let mut button = ButtonDebouncer::new();
        click(&mut button, 1_000, 100); // release at 1100
        click(&mut button, 1_500, 100); // release at 1600, exactly 500ms later
        assert_eq!(button.short_press_count(), 2);
    }

    #[test]
    fn test_clear_press_count() {
        let mut button = ButtonDebouncer::new();
        click(&mut button, 1_000, 100);
        click(&mut button, 1_300, 100);
        button.clear_press_count();
        assert_eq!(button.short_press_count(), 0);
    }

    #[test]
    fn test_toggle_display_mode_round_trip() {
        let mut button = ButtonDebouncer::new();
        let original = button.display_mode();
        assert_eq!(button.toggle_display_mode(), DisplayMode::Rpm);
        assert_eq!(button.toggle_display_mode(), original);
    }

    #[test]
    fn test_press_across_counter_wraparound() {
        let mut button = ButtonDebouncer::new();
        let start = u32::MAX - 300;
        assert_eq!(
            button.on_level_change(Level::Low, ms(start)),
            Some(ButtonEvent::PressStart)
        );
        assert_eq!(
            button.on_level_change(Level::High, ms(start).add_millis(1_200)),
            Some(ButtonEvent::LongPress)
        );
    }

    proptest! {
        #[test]
        fn prop_edge_inside_debounce_is_ignored(
            start in any::<u32>(),
            gap in 0u32..DEBOUNCE_TIME_MS,
            pressed in any::<bool>(),
        ) {
            let mut button = ButtonDebouncer::new();
            let first = if pressed { Level::Low } else { Level::High };
            let second = if pressed { Level::High } else { Level::Low };

            button.on_level_change(first, ms(start));
            let snapshot = button.clone();

            prop_assert_eq!(button.on_level_change(second, ms(start).add_millis(gap)), None);
            prop_assert_eq!(button.is_pressed(), snapshot.is_pressed());
            prop_assert_eq!(button.last_event_time, snapshot.last_event_time);
            prop_assert_eq!(button.short_press_count(), snapshot.short_press_count());
        }

        #[test]
        fn prop_long_hold_is_always_long_press(
            history in 0u32..4,
            held in LONG_PRESS_TIME_MS..60_000,
        ) {
            let mut button = ButtonDebouncer::new();
            let mut t = 1_000;
            for _ in 0..history {
                click(&mut button, t, 100);
                t += 300;
            }
            let count = button.short_press_count();

            let (_, up) = click(&mut button, t, held);
            prop_assert_eq!(up, Some(ButtonEvent::LongPress));
            prop_assert_eq!(button.short_press_count(), count);
        }

        #[test]
        fn prop_five_spaced_short_presses_toggle_sleep_once(
            start in 0u32..1_000_000,
            held in DEBOUNCE_TIME_MS..=300,
            idle in DEBOUNCE_TIME_MS..=200,
        ) {
            // Release-to-release spacing is held + idle, at most the window
            let mut button = ButtonDebouncer::new();
            let mut t = start;
            let mut toggles = 0;
            for i in 0..5 {
                let (down, up) = click(&mut button, t, held);
                prop_assert_eq!(down, Some(ButtonEvent::PressStart));
                if i < 4 {
                    prop_assert_eq!(up, Some(ButtonEvent::ShortPress));
                } else {
                    prop_assert_eq!(up, Some(ButtonEvent::ToggleSleep));
                    toggles += 1;
                }
                t += held + idle;
            }
            prop_assert_eq!(toggles, 1);
            prop_assert!(button.sleep_mode());
        }
    }
}
