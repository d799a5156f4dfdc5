//! States assembling and validating frames.

use tartan_bitfield::bitfield;
use thiserror::Error;
use tinyvec::ArrayVec;
use zerocopy::FromBytes;

use super::{
    check::compute_checksum,
    version::{LEGACY_FRAME_LEN, Protocol, STANDARD_FRAME_LEN, STANDARD_HEADER},
};

/// An error validating a frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Calculated and found checksum values do not match.
    #[error("Calculated ({calculated}) and found ({found}) checksum values do not match.")]
    Checksum { found: u8, calculated: u8 },
}

/// Progress through the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Discarding bytes until a header arrives.
    SeekingHeader,
    /// Collecting the bytes of a frame.
    Accumulating,
}

/// Frame assembler for a resolved wire format.
///
/// A header byte always restarts the frame in progress, trading a partly
/// collected frame for quick recovery from misalignment.
#[derive(Debug)]
pub struct FrameDecoder {
    protocol: Protocol,
    phase: Phase,
    buffer: ArrayVec<[u8; STANDARD_FRAME_LEN]>,
}

impl FrameDecoder {
    /// Create a decoder for a wire format, waiting for a header.
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            phase: Phase::SeekingHeader,
            buffer: ArrayVec::new(),
        }
    }

    /// The wire format being decoded.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Number of bytes collected toward the frame in progress.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Discard the frame in progress and wait for the next header.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.phase = Phase::SeekingHeader;
    }

    /// Feed a byte to the decoder.
    ///
    /// Returns the raw distance of a frame completed by this byte, in the
    /// units of the wire format, or an error if the completed frame was
    /// corrupt. Returns `None` while no frame is complete.
    pub fn advance(&mut self, r: u8) -> Option<Result<u16, FrameError>> {
        if r == self.protocol.header() {
            self.buffer.clear();
            self.phase = Phase::Accumulating;
        }

        if self.phase == Phase::SeekingHeader {
            return None;
        }

        self.buffer.push(r);

        if self.buffer.len() < self.protocol.frame_len() {
            return None;
        }

        let frame = core::mem::take(&mut self.buffer).into_inner();
        self.phase = Phase::SeekingHeader;

        Some(match self.protocol {
            Protocol::Legacy => Ok(decode_legacy([frame[0], frame[1], frame[2]])),
            Protocol::Standard => decode_standard(frame),
        })
    }
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct LegacyFrame {
    _header: u8,
    low: u8,
    high: u8,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct StandardFrame {
    _header: u8,
    version: u8,
    distance: [u8; 2],
    extra: u8,
    checksum: u8,
}

/// Extract the raw distance from a legacy frame, in units of 2.5 cm.
///
/// Legacy frames have no checksum, so every complete frame is accepted.
pub fn decode_legacy(r: [u8; LEGACY_FRAME_LEN]) -> u16 {
    bitfield! {
        struct DataByte(u8) {
            [0..7] value: u8,
        }
    }

    let LegacyFrame { low, high, .. } = zerocopy::transmute!(r);

    u16::from(DataByte(high).value()) * 128 + u16::from(DataByte(low).value())
}

/// Validate a standard frame and extract its raw distance, in centimeters.
pub fn decode_standard(r: [u8; STANDARD_FRAME_LEN]) -> Result<u16, FrameError> {
    let StandardFrame {
        version,
        distance,
        extra,
        checksum,
        ..
    } = zerocopy::transmute!(r);

    let calculated = compute_checksum(version, &[distance[0], distance[1], extra]);

    if calculated != checksum {
        Err(FrameError::Checksum {
            found: checksum,
            calculated,
        })?;
    }

    Ok(u16::from_le_bytes(distance))
}

/// Build a standard frame with a valid checksum.
pub fn encode_standard(version: u8, distance: u16, extra: u8) -> [u8; STANDARD_FRAME_LEN] {
    let [low, high] = distance.to_le_bytes();
    let checksum = compute_checksum(version, &[low, high, extra]);

    [STANDARD_HEADER, version, low, high, extra, checksum]
}
