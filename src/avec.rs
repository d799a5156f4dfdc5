//! Convenience interfaces for polling a sensor.
//!
//! A [`Rangefinder`] owns a [`ByteSource`], a [`Clock`], and a
//! [`StatusSink`], all supplied by the application. Call
//! [`Sensor::poll`] periodically; each call takes only the bytes available at
//! that moment and returns promptly.
//!
//! ```
//! let mut state = SensorState::default();
//! let mut rangefinder = Rangefinder::new(&mut uart, StdClock::new(), &mut state);
//!
//! loop {
//!     rangefinder.poll();
//!     // Read rangefinder.sink().distance_cm ...
//! }
//! ```
//!
//! After the staleness timeout passes without a valid frame, the sink is told
//! there is no data. Distances themselves are never classified here.

pub mod aggregate;
pub mod sensor;
pub mod source;
pub mod staleness;
pub mod status;

pub use aggregate::PollResult;
pub use sensor::{Config, Rangefinder, ReadError, Sensor};
pub use source::ByteSource;
#[cfg(feature = "std")]
pub use staleness::StdClock;
pub use staleness::{Clock, STALENESS_TIMEOUT_MS, StalenessMonitor};
pub use status::{Reading, SensorState, Status, StatusSink};
