#![cfg(feature = "std")]

use std::{cell::Cell, collections::VecDeque};

use csv::ReaderBuilder;
use ulanding::avec::{Clock, Rangefinder, Sensor, SensorState};

#[test]
fn replay_standard_capture() {
    const PATH: &str = "fixtures/standard-capture.csv";
    let clock = CaptureClock(Cell::new(0));
    let rangefinder = replay(PATH, &clock);
    assert_eq!(rangefinder.firmware(), Some(2));
}

#[test]
fn replay_legacy_capture() {
    const PATH: &str = "fixtures/legacy-capture.csv";
    let clock = CaptureClock(Cell::new(0));
    let rangefinder = replay(PATH, &clock);
    assert_eq!(rangefinder.firmware(), None);
    assert!(rangefinder.version().is_known());
}

struct CaptureClock(Cell<u32>);

impl Clock for CaptureClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Poll once per captured row, checking the published state after each.
fn replay<'c>(
    path: &str,
    clock: &'c CaptureClock,
) -> Rangefinder<VecDeque<u8>, &'c CaptureClock, SensorState> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .unwrap();

    let mut rangefinder = Rangefinder::new(VecDeque::new(), clock, SensorState::default());

    for (row, record) in reader.records().enumerate() {
        let record = record.unwrap();

        clock.0.set(record[0].parse().unwrap());

        let source = rangefinder.source_mut().unwrap();
        source.extend(
            record[1]
                .split_whitespace()
                .map(|b| u8::from_str_radix(b, 16).unwrap()),
        );

        rangefinder.poll();

        let state = rangefinder.sink();
        assert_eq!(
            state.distance_cm.to_string(),
            &record[2],
            "distance after row {row}"
        );
        assert_eq!(format!("{:?}", state.status), &record[3], "status after row {row}");
        assert_eq!(rangefinder.source_mut().unwrap().len(), 0);
    }

    rangefinder
}
