//! End-to-end ride scenarios through the sensor controller

use cadence_core::input::{DisplayMode, Level};
use cadence_core::screen::Screen;
use cadence_core::state::{Edge, PowerState};
use cadence_core::traits::{DisplayDriver, DisplayError, PinError, StatusLed};
use cadence_core::{Directive, SensorController, Timestamp};
use proptest::prelude::*;

#[derive(Default)]
struct Led {
    lit: bool,
}

impl StatusLed for Led {
    fn on(&mut self) -> Result<(), PinError> {
        self.lit = true;
        Ok(())
    }

    fn off(&mut self) -> Result<(), PinError> {
        self.lit = false;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.lit
    }
}

#[derive(Default)]
struct Panel {
    last: Screen,
    unplugged: bool,
}

impl DisplayDriver for Panel {
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn probe(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        if self.unplugged {
            return Err(DisplayError::Bus);
        }
        self.last = screen.clone();
        Ok(())
    }
}

type Sensor = SensorController<Led, Panel>;

fn ms(v: u32) -> Timestamp {
    Timestamp::from_millis(v)
}

fn press(sensor: &mut Sensor, at: u32, held: u32) -> Directive {
    sensor.handle(Edge::Button {
        level: Level::Low,
        at: ms(at),
    });
    sensor.handle(Edge::Button {
        level: Level::High,
        at: ms(at + held),
    })
}

/// Pedal at a steady cadence, polling the run loop every 10ms
fn pedal(sensor: &mut Sensor, from: u32, to: u32, period: u32) {
    let faults = pedal_unchecked(sensor, from, to, period);
    assert_eq!(faults, 0);
}

/// Same as [`pedal`], returning how many polls reported a fault
fn pedal_unchecked(sensor: &mut Sensor, from: u32, to: u32, period: u32) -> u32 {
    let mut faults = 0;
    let mut next_pass = from;
    let mut t = from;
    while t < to {
        if t >= next_pass {
            sensor.handle(Edge::Rotation { at: ms(t) });
            // Reed chatter right after the pass
            sensor.handle(Edge::Rotation { at: ms(t + 3) });
            next_pass += period;
        }
        if sensor.poll(ms(t)).is_err() {
            faults += 1;
        }
        t += 10;
    }
    faults
}

#[test]
fn ride_counts_and_displays_cadence() {
    let mut sensor = Sensor::new(Led::default(), Panel::default(), ms(0));

    // 90 rpm for one minute
    pedal(&mut sensor, 0, 60_000, 670);
    assert_eq!(sensor.counter().total_triggers(), 90);

    sensor.poll(ms(60_000)).unwrap();
    assert_eq!(sensor.display().last.line(0), "Time: 01:00");
    assert_eq!(sensor.display().last.line(5), "90");

    press(&mut sensor, 60_500, 200);
    assert_eq!(sensor.button().display_mode(), DisplayMode::Rpm);
    sensor.poll(ms(60_800)).unwrap();
    assert_eq!(sensor.display().last.line(3), "Cadence:");
    assert_eq!(sensor.display().last.line(5), "89 rpm");
}

#[test]
fn unplugged_display_keeps_counting_and_retries_each_second() {
    let panel = Panel {
        unplugged: true,
        ..Default::default()
    };
    let mut sensor = Sensor::new(Led::default(), panel, ms(0));

    let faults = pedal_unchecked(&mut sensor, 0, 60_000, 670);
    assert_eq!(sensor.counter().total_triggers(), 90);
    assert_eq!(faults, 60);
    assert_eq!(sensor.display_faults(), 60);
}

#[test]
fn long_press_mid_ride_starts_new_session() {
    let mut sensor = Sensor::new(Led::default(), Panel::default(), ms(0));
    pedal(&mut sensor, 0, 10_000, 1_000);
    assert_eq!(sensor.counter().total_triggers(), 10);

    assert_eq!(press(&mut sensor, 10_000, 1_500), Directive::Continue);
    assert_eq!(sensor.counter().total_triggers(), 0);

    pedal(&mut sensor, 12_000, 15_000, 1_000);
    assert_eq!(sensor.counter().total_triggers(), 3);
    assert_eq!(sensor.counter().elapsed(ms(15_000)), (0, 3));
}

#[test]
fn sleep_gesture_shows_pending_and_requests_suspend() {
    let mut sensor = Sensor::new(Led::default(), Panel::default(), ms(0));

    let mut directives = [Directive::Continue; 5];
    for (i, d) in directives.iter_mut().enumerate() {
        *d = press(&mut sensor, 1_000 + i as u32 * 250, 120);
    }

    assert_eq!(&directives[..4], &[Directive::Continue; 4]);
    assert_eq!(directives[4], Directive::Suspend);
    assert_eq!(sensor.state(), PowerState::SleepPending);

    sensor.poll(ms(3_000)).unwrap();
    assert_eq!(sensor.display().last.line(7), "SLEEP PENDING");
}

proptest! {
    #[test]
    fn no_rotation_counted_while_sleep_pending(
        passes in proptest::collection::vec(0u32..100_000, 0..64),
    ) {
        let mut sensor = Sensor::new(Led::default(), Panel::default(), ms(0));
        for i in 0..5u32 {
            press(&mut sensor, 1_000 + i * 250, 120);
        }
        prop_assert!(sensor.state().is_sleeping());

        for offset in &passes {
            prop_assert!(sensor.on_rotation_edge(ms(5_000 + offset)).is_none());
        }
        prop_assert_eq!(sensor.counter().total_triggers(), 0);
        prop_assert!(!sensor.led().is_on());
    }
}
