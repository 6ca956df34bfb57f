//! Main controller task
//!
//! Feeds edges into the sensor controller and polls it at least every
//! `MAIN_LOOP_POLL_MS` for LED and display deadlines. Faults are logged and
//! the loop carries on; the controller holds off display retries itself.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Timer;
use portable_atomic::Ordering;

use cadence_core::config::MAIN_LOOP_POLL_MS;
use cadence_core::traits::Clock;
use cadence_core::{Directive, SensorController};
use cadence_drivers::{GpioLed, Ssd1306};

use crate::board::EmbassyClock;
use crate::channels::{dropped_edges, EDGE_CHANNEL, SUSPEND, SUSPENDED};

/// The sensor controller wired to the board's LED and OLED
pub type Sensor =
    SensorController<GpioLed<Output<'static>>, Ssd1306<I2c<'static, I2C0, Blocking>>>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(sensor: &'static mut Sensor) {
    info!("Controller task started");

    let clock = EmbassyClock;
    let mut reported_drops = 0;

    loop {
        let received = select(
            EDGE_CHANNEL.receive(),
            Timer::after_millis(MAIN_LOOP_POLL_MS as u64),
        )
        .await;

        if let Either::First(edge) = received {
            if sensor.handle(edge) == Directive::Suspend {
                info!(
                    "Sleep requested after {} rotations",
                    sensor.counter().total_triggers()
                );
                SUSPENDED.store(true, Ordering::Release);
                SUSPEND.signal(());
                // The button task resets the chip on wake
                core::future::pending::<()>().await;
            }
        }

        let drops = dropped_edges();
        if drops != reported_drops {
            warn!("{} edges dropped (channel full)", drops.wrapping_sub(reported_drops));
            reported_drops = drops;
        }

        if let Err(fault) = sensor.poll(clock.now()) {
            warn!("Fault {:?} (code {})", fault, fault.error_code().code());
        }
    }
}
