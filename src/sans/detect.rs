//! States detecting the wire format in use.

use either::Either::{self, Left, Right};
use tartan_bitfield::bitfield;
use tinyvec::ArrayVec;

use super::version::{LEGACY_HEADER, ProtocolVersion, STANDARD_HEADER};

/// Bytes needed to confirm the legacy format: a header, two data bytes, and
/// the recurring header.
const LEGACY_WINDOW: usize = 4;

/// State token to detect the wire format from a stream of bytes.
///
/// The token holds the current header candidate and the bytes that followed
/// it. A rejected candidate is abandoned one byte past its header, so a byte
/// examined as part of the rejected window is still considered as a header.
#[derive(Debug, Default)]
pub struct VersionDetector {
    window: ArrayVec<[u8; LEGACY_WINDOW]>,
}

impl VersionDetector {
    /// Create a detector waiting for a header candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition to another state by examining a byte.
    ///
    /// Returns a successor state token, or the detected version along with
    /// the bytes to replay into a frame decoder.
    pub fn advance(mut self, r: u8) -> Either<Self, Detected> {
        let Some(&candidate) = self.window.first() else {
            if r == LEGACY_HEADER || r == STANDARD_HEADER {
                self.window.push(r);
            }

            return Left(self);
        };

        self.window.push(r);

        if candidate == LEGACY_HEADER {
            if self.window.len() < LEGACY_WINDOW {
                return Left(self);
            }

            if r == LEGACY_HEADER {
                let detected = Detected {
                    version: ProtocolVersion::Legacy,
                    replay: self.window,
                };

                return Right(detected);
            }
        } else if is_version_byte(r) {
            let detected = Detected {
                version: ProtocolVersion::Standard { firmware: r },
                replay: self.window,
            };

            return Right(detected);
        }

        Self::rescan(&self.window[1..])
    }

    /// Restart detection over bytes already taken from the stream.
    fn rescan(r: &[u8]) -> Either<Self, Detected> {
        let mut state = Self::new();

        for (i, &b) in r.iter().enumerate() {
            state = match state.advance(b) {
                Left(state) => state,
                Right(mut detected) => {
                    detected.replay.extend_from_slice(&r[i + 1..]);
                    return Right(detected);
                }
            };
        }

        Left(state)
    }
}

/// Whether the byte following a standard header can be a firmware version.
///
/// Legacy data bytes always carry their high bit, and a legacy header may
/// follow a legacy data byte that happens to equal the standard header.
/// Either pattern means the candidate was not a standard frame.
fn is_version_byte(r: u8) -> bool {
    bitfield! {
        struct FollowingByte(u8) {
            [7] is_legacy_data,
        }
    }

    !FollowingByte(r).is_legacy_data() && r != LEGACY_HEADER
}

/// A detected wire format.
#[derive(Debug, Clone)]
pub struct Detected {
    /// The resolved protocol version.
    pub version: ProtocolVersion,
    replay: ArrayVec<[u8; LEGACY_WINDOW]>,
}

impl Detected {
    /// Bytes taken from the stream from the confirming header onward.
    ///
    /// These begin a frame, and must be fed to a frame decoder before any
    /// further bytes from the stream.
    pub fn replay(&self) -> &[u8] {
        &self.replay
    }
}
