//! Cadence - Bicycle Cadence Sensor Firmware
//!
//! Main firmware binary for RP2040-based boards. Counts crank rotations from
//! a reed switch, shows session time and count on an SSD1306 OLED, and
//! handles a single mode button (display mode, new session, sleep).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cadence_core::config::{ERROR_COOLDOWN_MS, I2C_FREQUENCY_HZ, PINS};
use cadence_core::diagnostics::BootError;
use cadence_core::traits::{Clock, DisplayDriver};
use cadence_core::SensorController;
use cadence_drivers::{GpioLed, SelfTest, Ssd1306};

mod board;
mod channels;
mod tasks;

use board::EmbassyClock;
use tasks::Sensor;

// The controller lives for the whole program; tasks borrow it
static SENSOR: StaticCell<Sensor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cadence firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!(
        "Pins: reed={} button={} led={} sda={} scl={}",
        PINS.reed_switch.pin, PINS.button.pin, PINS.led.pin, PINS.i2c_sda, PINS.i2c_scl
    );

    // I2C0 for the OLED (SCL=GPIO1, SDA=GPIO0)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c_config);
    let mut display = Ssd1306::new(bus);

    // Reed switch and button short to ground
    let mut reed = Input::new(p.PIN_15, pull_for(PINS.reed_switch.pull_up));
    let mut button = Input::new(p.PIN_16, pull_for(PINS.button.pull_up));

    let led_pin = Output::new(p.PIN_13, Level::Low);
    let led = GpioLed::new(led_pin, PINS.led.inverted);
    let mut led = match led {
        Ok(led) => led,
        Err(e) => {
            error!("LED init failed: {:?}", e);
            halt(BootError::HardwareInit).await
        }
    };

    if let Err(e) = display.init() {
        error!("Display init failed: {:?}", e);
        halt(BootError::HardwareInit).await;
    }
    info!("Peripherals initialized");

    let report = SelfTest {
        display: &mut display,
        led: &mut led,
        reed_switch: &mut reed,
        button: &mut button,
    }
    .run(&mut Delay);

    if !report.all_passed() {
        if let Some(subsystem) = report.first_failure() {
            error!("Self-test failed at {:?}", subsystem);
        }
        halt(BootError::Diagnostics(report)).await;
    }
    info!("Self-test passed");

    let sensor = SENSOR.init(SensorController::new(led, display, EmbassyClock.now()));

    // Spawn tasks
    spawner.spawn(tasks::reed_task(reed)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner.spawn(tasks::controller_task(sensor)).unwrap();

    info!("All tasks spawned, firmware running");
}

fn pull_for(pull_up: bool) -> Pull {
    if pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}

/// Park the firmware after a fatal boot failure
///
/// The run loop never starts; the diagnostic code is repeated on the probe
/// log.
async fn halt(err: BootError) -> ! {
    loop {
        error!(
            "Boot failed: {:?} (code {})",
            err,
            err.error_code().code()
        );
        Timer::after_millis(ERROR_COOLDOWN_MS as u64).await;
    }
}
