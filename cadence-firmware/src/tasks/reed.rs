//! Reed switch edge task
//!
//! Stamps every falling edge of the reed switch and forwards it to the
//! controller. Chatter is left in; the controller's trigger filter
//! rejects it. Once the board is suspended the task parks for good.

use defmt::*;
use embassy_rp::gpio::Input;

use cadence_core::state::Edge;
use cadence_core::traits::Clock;

use crate::board::EmbassyClock;
use crate::channels::{publish, suspended};

#[embassy_executor::task]
pub async fn reed_task(mut reed: Input<'static>) {
    info!("Reed switch task started");

    let clock = EmbassyClock;
    loop {
        reed.wait_for_falling_edge().await;
        if suspended() {
            info!("Reed switch task parked");
            core::future::pending::<()>().await;
        }
        let edge = Edge::Rotation { at: clock.now() };
        trace!("Reed edge at {}", edge.at().as_millis());
        publish(edge);
    }
}
