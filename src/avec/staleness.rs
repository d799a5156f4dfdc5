//! Tracking the age of the last good reading.

/// Default time without a reading before reporting no data, in milliseconds.
pub const STALENESS_TIMEOUT_MS: u32 = 200;

/// A monotonic millisecond clock.
///
/// Timestamps may wrap around; elapsed times are computed with wrapping
/// arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

#[cfg(feature = "std")]
pub use std_clock::StdClock;

#[cfg(feature = "std")]
mod std_clock {
    extern crate std;

    use std::time::Instant;

    use super::Clock;

    /// Clock measuring time since its creation.
    ///
    /// _Requires Cargo feature `std`._
    #[derive(Debug, Clone, Copy)]
    pub struct StdClock(Instant);

    impl StdClock {
        /// Start the clock at zero.
        pub fn new() -> Self {
            Self(Instant::now())
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now_ms(&self) -> u32 {
            // Truncation wraps like a hardware tick counter.
            self.0.elapsed().as_millis() as u32
        }
    }
}

/// Decides when the last good reading has become too old to report.
#[derive(Debug, Clone, Copy)]
pub struct StalenessMonitor {
    last_reading_ms: u32,
    timeout_ms: u32,
}

impl StalenessMonitor {
    /// Create a monitor whose clock starts at zero, as if a reading were
    /// taken at boot.
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            last_reading_ms: 0,
            timeout_ms,
        }
    }

    /// Clock time of the last good reading, in milliseconds.
    pub fn last_reading_ms(&self) -> u32 {
        self.last_reading_ms
    }

    /// Time without a reading before reporting no data, in milliseconds.
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Note a good reading taken at `now_ms`.
    pub fn record(&mut self, now_ms: u32) {
        self.last_reading_ms = now_ms;
    }

    /// Milliseconds since the last good reading.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_reading_ms)
    }

    /// Whether strictly more than the timeout has passed since the last good
    /// reading.
    pub fn is_stale(&self, now_ms: u32) -> bool {
        self.elapsed_ms(now_ms) > self.timeout_ms
    }
}

impl Default for StalenessMonitor {
    fn default() -> Self {
        Self::new(STALENESS_TIMEOUT_MS)
    }
}
