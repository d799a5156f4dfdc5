//! Reduction of one polling cycle's samples to a distance.

use crate::sans::Protocol;

/// Samples accepted during a single polling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollResult {
    count: u32,
    sum: u64,
}

impl PollResult {
    /// Add a raw sample, in the units of the wire format.
    pub fn add(&mut self, sample: u16) {
        self.count += 1;
        self.sum += u64::from(sample);
    }

    /// Number of samples accepted.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sum of the accepted raw samples.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Whether no samples were accepted.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Average the samples and convert them to centimeters.
    ///
    /// Legacy samples count in units of 2.5 cm. Both the mean and the scaled
    /// distance are truncated to whole numbers, and the result saturates at
    /// `u16::MAX`. Returns `None` if no samples were accepted.
    pub fn reduce(&self, protocol: Protocol) -> Option<u16> {
        if self.is_empty() {
            return None;
        }

        let mean = self.sum / u64::from(self.count);

        let cm = match protocol {
            Protocol::Legacy => mean * 5 / 2,
            Protocol::Standard => mean,
        };

        Some(u16::try_from(cm).unwrap_or(u16::MAX))
    }
}

impl Extend<u16> for PollResult {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for sample in iter {
            self.add(sample);
        }
    }
}

impl FromIterator<u16> for PollResult {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut result = Self::default();
        result.extend(iter);
        result
    }
}
