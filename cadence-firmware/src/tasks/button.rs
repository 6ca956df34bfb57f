//! Button edge task
//!
//! Forwards both edges of the mode button to the controller. The button pin
//! is also the wake source, so this task owns the suspend: once the
//! controller raises [`SUSPEND`], the task awaits a debounced press while
//! the executor idles the core, then resets the chip.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;

use cadence_core::config::PINS;
use cadence_core::input::{Level, WakeGate};
use cadence_core::state::Edge;
use cadence_core::traits::{Clock, PowerControl};

use crate::board::{ChipReset, EmbassyClock};
use crate::channels::{publish, SUSPEND};

#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    let clock = EmbassyClock;
    loop {
        match select(button.wait_for_any_edge(), SUSPEND.wait()).await {
            Either::First(()) => {
                let edge = Edge::Button {
                    level: Level::from_high(button.is_high()),
                    at: clock.now(),
                };
                publish(edge);
            }
            Either::Second(()) => {
                info!("Suspending until button press");
                wait_for_wake(&mut button, &clock).await;
                info!("Wake press, restarting");
                ChipReset.enter_low_power();
            }
        }
    }
}

/// Wait for a press that is not bounce from the sleep gesture
async fn wait_for_wake(button: &mut Input<'static>, clock: &EmbassyClock) {
    let mut gate = WakeGate::new(PINS.button.inverted, clock.now());
    loop {
        button.wait_for_any_edge().await;
        let level = Level::from_high(button.is_high());
        if gate.on_level_change(level, clock.now()) {
            return;
        }
        trace!("Wake edge ignored");
    }
}
