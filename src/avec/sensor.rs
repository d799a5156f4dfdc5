//! Polled rangefinder driver.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    FrameDecoder, ProtocolVersion, VersionDetector,
    detect::Detected,
    frame::FrameError,
};

use super::{
    ByteSource, Clock, PollResult, Reading, StatusSink,
    staleness::{STALENESS_TIMEOUT_MS, StalenessMonitor},
};

/// Reasons a polling cycle produced no reading.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// No byte source was configured. This will not change.
    #[error("No byte source is configured.")]
    NotConnected,
    /// The wire format has not been detected yet.
    #[error("The protocol version has not been detected.")]
    VersionUnknown,
    /// No valid frame arrived during the cycle.
    #[error("No valid frames were received.")]
    NoSamples,
}

/// Runtime settings for a [`Rangefinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Time without a reading before reporting no data, in milliseconds.
    pub staleness_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staleness_timeout_ms: STALENESS_TIMEOUT_MS,
        }
    }
}

/// A distance sensor driven by periodic polling.
pub trait Sensor {
    /// Consume the bytes available now and publish the outcome.
    fn poll(&mut self);

    /// Consume the bytes available now and return their averaged distance in
    /// centimeters, if any valid frame arrived.
    fn try_get_reading(&mut self) -> Option<u16>;
}

/// Driver for a uLanding radar altimeter.
///
/// Each poll drains the bytes available from the source, detecting the wire
/// format on first contact, and averages the frames received into a single
/// distance. Frames left incomplete at the end of a poll are discarded.
///
/// The wire format is detected once and kept for the lifetime of the driver.
#[derive(Debug)]
pub struct Rangefinder<S, C, K> {
    source: Option<S>,
    clock: C,
    sink: K,
    version: ProtocolVersion,
    staleness: StalenessMonitor,
    reported_no_data: bool,
}

impl<S: ByteSource, C: Clock, K: StatusSink> Rangefinder<S, C, K> {
    /// Create a driver reading from a byte source.
    pub fn new(source: S, clock: C, sink: K) -> Self {
        Self::with_source(Some(source), clock, sink)
    }

    /// Create a driver with no byte source. Every read fails with
    /// [`ReadError::NotConnected`].
    pub fn disconnected(clock: C, sink: K) -> Self {
        Self::with_source(None, clock, sink)
    }

    fn with_source(source: Option<S>, clock: C, sink: K) -> Self {
        Self {
            source,
            clock,
            sink,
            version: ProtocolVersion::Unknown,
            staleness: StalenessMonitor::default(),
            reported_no_data: false,
        }
    }

    /// Apply runtime settings, keeping the last reading time.
    pub fn with_config(mut self, config: Config) -> Self {
        let last_reading_ms = self.staleness.last_reading_ms();
        self.staleness = StalenessMonitor::new(config.staleness_timeout_ms);
        self.staleness.record(last_reading_ms);
        self
    }

    /// Whether a byte source is configured.
    pub fn is_connected(&self) -> bool {
        self.source.is_some()
    }

    /// The protocol version detected for this session.
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// The firmware version reported by a standard-format sensor.
    pub fn firmware(&self) -> Option<u8> {
        self.version.firmware()
    }

    /// Clock time of the last good reading, in milliseconds.
    pub fn last_reading_ms(&self) -> u32 {
        self.staleness.last_reading_ms()
    }

    /// The receiver of readings and status.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// The receiver of readings and status, mutably.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// The byte source, if one is configured.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Run one detection and decoding pass over the bytes available now.
    ///
    /// Returns the averaged distance in centimeters.
    pub fn read(&mut self) -> Result<u16, ReadError> {
        let source = self.source.as_mut().ok_or(ReadError::NotConnected)?;

        let mut samples = PollResult::default();

        let mut frames = match self.version.protocol() {
            Some(protocol) => FrameDecoder::new(protocol),
            None => {
                let detected = detect(source).ok_or(ReadError::VersionUnknown)?;
                let protocol = detected
                    .version
                    .protocol()
                    .ok_or(ReadError::VersionUnknown)?;

                log::debug!("uLanding: detected {:?}", detected.version);
                self.version.resolve(detected.version);

                // The detection frame is already off the wire.
                let mut frames = FrameDecoder::new(protocol);
                for &r in detected.replay() {
                    accept(frames.advance(r), &mut samples);
                }
                frames
            }
        };

        for _ in 0..source.available() {
            let Some(r) = source.read_next() else {
                break;
            };
            accept(frames.advance(r), &mut samples);
        }

        if frames.pending() != 0 {
            log::trace!("uLanding: discarding {} bytes of a partial frame", frames.pending());
        }

        samples
            .reduce(frames.protocol())
            .ok_or(ReadError::NoSamples)
    }
}

impl<S: ByteSource, C: Clock, K: StatusSink> Sensor for Rangefinder<S, C, K> {
    fn poll(&mut self) {
        match self.read() {
            Ok(distance_cm) => {
                let timestamp_ms = self.clock.now_ms();
                self.staleness.record(timestamp_ms);
                self.reported_no_data = false;

                self.sink.update(Reading {
                    distance_cm,
                    timestamp_ms,
                });
            }
            Err(err) => {
                let now_ms = self.clock.now_ms();
                if self.staleness.is_stale(now_ms) {
                    if !self.reported_no_data {
                        log::debug!(
                            "uLanding: no data for {} ms ({err})",
                            self.staleness.elapsed_ms(now_ms)
                        );
                        self.reported_no_data = true;
                    }
                    self.sink.no_data();
                }
            }
        }
    }

    fn try_get_reading(&mut self) -> Option<u16> {
        self.read().ok()
    }
}

/// Scan the bytes available now for proof of a wire format.
fn detect(source: &mut impl ByteSource) -> Option<Detected> {
    let mut state = VersionDetector::new();

    for _ in 0..source.available() {
        let r = source.read_next()?;

        state = match state.advance(r) {
            Left(state) => state,
            Right(detected) => return Some(detected),
        };
    }

    None
}

/// Add a completed frame to the cycle's samples, dropping corrupt frames.
fn accept(outcome: Option<Result<u16, FrameError>>, samples: &mut PollResult) {
    match outcome {
        Some(Ok(sample)) => samples.add(sample),
        Some(Err(err)) => log::trace!("uLanding: dropped frame: {err}"),
        None => {}
    }
}
