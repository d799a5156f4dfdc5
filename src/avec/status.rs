//! Publishing readings and status to the rest of the system.

/// A distance reading, averaged over one polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub distance_cm: u16,
    /// Clock time at which the reading was taken, in milliseconds.
    pub timestamp_ms: u32,
}

/// Externally visible availability of readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// No reading has been published, and the staleness timeout has not yet
    /// passed.
    #[default]
    Initializing,
    /// The published distance is current.
    Current,
    /// No reading has arrived within the staleness timeout.
    NoData,
}

/// Receive readings and status changes from a rangefinder.
///
/// Classifying a distance (for example, as below the minimum or above the
/// maximum range) is left to the receiver.
pub trait StatusSink {
    /// Publish a fresh reading.
    fn update(&mut self, reading: Reading);

    /// Report that readings have stopped arriving.
    fn no_data(&mut self);
}

impl<K: StatusSink + ?Sized> StatusSink for &mut K {
    fn update(&mut self, reading: Reading) {
        (**self).update(reading)
    }

    fn no_data(&mut self) {
        (**self).no_data()
    }
}

/// Discards everything it receives.
impl StatusSink for () {
    fn update(&mut self, _: Reading) {}
    fn no_data(&mut self) {}
}

/// The last published distance, status, and reading time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorState {
    pub distance_cm: u16,
    pub status: Status,
    pub last_reading_ms: u32,
}

impl StatusSink for SensorState {
    fn update(&mut self, reading: Reading) {
        self.distance_cm = reading.distance_cm;
        self.last_reading_ms = reading.timestamp_ms;
        self.status = Status::Current;
    }

    fn no_data(&mut self) {
        self.status = Status::NoData;
    }
}
