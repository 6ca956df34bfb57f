//! Sensor controller
//!
//! Owns the trigger filter, button debouncer, and session counter, and is the
//! only code that mutates them. Raw edges come in through [`SensorController::handle`];
//! the run loop calls [`SensorController::poll`] to service the LED deadline
//! and the display refresh.
//!
//! ```text
//!  reed edge ──► [sleep?] ──► TriggerFilter ──► SessionCounter + LED pulse
//!  button edge ──────────────► ButtonDebouncer ─┬─ ShortPress  ► display mode
//!                                               ├─ LongPress   ► session reset
//!                                               └─ ToggleSleep ► suspend / new session
//!  poll ──► LED off when due, display refresh every DISPLAY_REFRESH_MS
//! ```
//!
//! The LED pulse never blocks: an accepted rotation lights the LED and stores
//! an off-deadline that the next poll past it consumes. A failed refresh holds
//! further refreshes off for `ERROR_COOLDOWN_MS`; edges keep being handled in
//! the meantime.

use crate::config::{DISPLAY_REFRESH_MS, ERROR_COOLDOWN_MS, LED_FLASH_MS};
use crate::diagnostics::Fault;
use crate::input::{ButtonDebouncer, ButtonEvent, Level, RotationEvent, TriggerFilter};
use crate::log;
use crate::screen::{DisplayStatus, Screen};
use crate::session::SessionCounter;
use crate::state::{Edge, PowerState};
use crate::time::Timestamp;
use crate::traits::{DisplayDriver, StatusLed};

/// What the caller must do after an edge was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Directive {
    /// Keep running
    Continue,
    /// Outputs are cleaned up; enter low power now
    Suspend,
}

/// Orchestrates the sensor's core state and its collaborators
pub struct SensorController<L, D> {
    trigger: TriggerFilter,
    button: ButtonDebouncer,
    counter: SessionCounter,
    state: PowerState,
    led: L,
    display: D,
    /// When the LED pulse should end
    led_off_at: Option<Timestamp>,
    /// Last display refresh
    last_refresh: Option<Timestamp>,
    /// No refresh before this, set after a failed one
    refresh_hold_until: Option<Timestamp>,
    /// Fault raised on the edge path, reported by the next poll
    pending_fault: Option<Fault>,
    rotations_suppressed: u32,
    display_faults: u32,
}

impl<L: StatusLed, D: DisplayDriver> SensorController<L, D> {
    /// Create a controller whose session starts at `now`
    pub fn new(led: L, display: D, now: Timestamp) -> Self {
        Self {
            trigger: TriggerFilter::new(),
            button: ButtonDebouncer::new(),
            counter: SessionCounter::new(now),
            state: PowerState::Active,
            led,
            display,
            led_off_at: None,
            last_refresh: None,
            refresh_hold_until: None,
            pending_fault: None,
            rotations_suppressed: 0,
            display_faults: 0,
        }
    }

    /// Dispatch a raw edge
    pub fn handle(&mut self, edge: Edge) -> Directive {
        match edge {
            Edge::Rotation { at } => {
                self.on_rotation_edge(at);
                Directive::Continue
            }
            Edge::Button { level, at } => self.on_button_edge(level, at),
        }
    }

    /// Reed switch falling edge
    ///
    /// Dropped before the trigger filter while sleep is pending, so a sleeping
    /// sensor does not even advance the dead-time anchor.
    pub fn on_rotation_edge(&mut self, now: Timestamp) -> Option<RotationEvent> {
        if !self.state.counts_rotations() {
            self.rotations_suppressed = self.rotations_suppressed.wrapping_add(1);
            log::debug!("Rotation ignored, sleep pending");
            return None;
        }

        let event = self.trigger.on_edge(now)?;
        self.counter.add_trigger(event.at);
        self.pulse_led(event.at);
        Some(event)
    }

    /// Button level change
    pub fn on_button_edge(&mut self, level: Level, now: Timestamp) -> Directive {
        let Some(event) = self.button.on_level_change(level, now) else {
            return Directive::Continue;
        };
        log::debug!("Button: {:?}", event);

        match event {
            ButtonEvent::PressStart => Directive::Continue,
            ButtonEvent::ShortPress => {
                self.button.toggle_display_mode();
                log::info!("Display mode: {:?}", self.button.display_mode());
                Directive::Continue
            }
            ButtonEvent::LongPress => {
                log::info!("Session reset");
                self.counter.reset(now);
                Directive::Continue
            }
            ButtonEvent::ToggleSleep => {
                self.state = self.state.transition(event);
                debug_assert_eq!(self.state.is_sleeping(), self.button.sleep_mode());
                if self.state.is_sleeping() {
                    log::info!("Sleep requested, cleaning up");
                    self.cleanup();
                    Directive::Suspend
                } else {
                    log::info!("Sleep cancelled, new session");
                    self.counter.reset(now);
                    Directive::Continue
                }
            }
        }
    }

    /// Run-loop step: end the LED pulse when due and refresh the display
    ///
    /// All due work is attempted; the first fault encountered is returned.
    /// Callers keep feeding edges regardless of the result.
    pub fn poll(&mut self, now: Timestamp) -> Result<(), Fault> {
        let mut result = Ok(());

        if let Some(deadline) = self.led_off_at {
            if now.ticks_diff(deadline) >= 0 {
                self.led_off_at = None;
                if let Err(e) = self.led.off() {
                    result = Err(Fault::Indicator(e));
                }
            }
        }

        if self.refresh_due(now) {
            self.last_refresh = Some(now);
            let screen = Screen::status(&self.status(now));
            if let Err(e) = self.display.draw(&screen) {
                log::warning!("Display refresh failed: {:?}", e);
                self.refresh_hold_until = Some(now.add_millis(ERROR_COOLDOWN_MS));
                self.display_faults = self.display_faults.wrapping_add(1);
                if result.is_ok() {
                    result = Err(Fault::Display(e));
                }
            }
        }

        if let Some(fault) = self.pending_fault.take() {
            if result.is_ok() {
                result = Err(fault);
            }
        }

        result
    }

    /// Switch outputs off ahead of a suspend
    pub fn cleanup(&mut self) {
        self.led_off_at = None;
        if let Err(e) = self.led.off() {
            self.defer_fault(Fault::Indicator(e));
        }
        if let Err(e) = self.display.clear() {
            self.defer_fault(Fault::Display(e));
        }
    }

    /// Everything the display shows, at `now`
    pub fn status(&self, now: Timestamp) -> DisplayStatus {
        DisplayStatus {
            session: self.counter.snapshot(now),
            mode: self.button.display_mode(),
            sleep_pending: self.state.is_sleeping(),
        }
    }

    fn refresh_due(&self, now: Timestamp) -> bool {
        if let Some(until) = self.refresh_hold_until {
            if now.ticks_diff(until) < 0 {
                return false;
            }
        }
        self.last_refresh
            .map_or(true, |last| now.has_elapsed(last, DISPLAY_REFRESH_MS))
    }

    /// Keep the first fault until the next poll reports it
    fn defer_fault(&mut self, fault: Fault) {
        if self.pending_fault.is_none() {
            self.pending_fault = Some(fault);
        }
    }

    fn pulse_led(&mut self, now: Timestamp) {
        self.led_off_at = Some(now.add_millis(LED_FLASH_MS));
        if let Err(e) = self.led.on() {
            self.defer_fault(Fault::Indicator(e));
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn counter(&self) -> &SessionCounter {
        &self.counter
    }

    pub fn button(&self) -> &ButtonDebouncer {
        &self.button
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Rotations dropped because sleep was pending
    pub fn rotations_suppressed(&self) -> u32 {
        self.rotations_suppressed
    }

    /// Display refreshes that failed since boot
    pub fn display_faults(&self) -> u32 {
        self.display_faults
    }
}
