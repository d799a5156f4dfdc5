//! Wire formats and the session's protocol version.

/// Header byte of the legacy 3-byte format.
pub const LEGACY_HEADER: u8 = 0x48;
/// Header byte of the standard 6-byte format.
pub const STANDARD_HEADER: u8 = 0xFE;

/// Length of a legacy frame, header included.
pub const LEGACY_FRAME_LEN: usize = 3;
/// Length of a standard frame, header included.
pub const STANDARD_FRAME_LEN: usize = 6;

/// A wire format spoken by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Beta firmware: `[0x48, d0, d1]`, no checksum, 2.5 cm units.
    Legacy,
    /// Current firmware: `[0xFE, v, d0, d1, d2, chk]`, centimeters.
    Standard,
}

impl Protocol {
    /// The byte opening every frame of this format.
    pub const fn header(self) -> u8 {
        match self {
            Protocol::Legacy => LEGACY_HEADER,
            Protocol::Standard => STANDARD_HEADER,
        }
    }

    /// The number of bytes in a frame of this format.
    pub const fn frame_len(self) -> usize {
        match self {
            Protocol::Legacy => LEGACY_FRAME_LEN,
            Protocol::Standard => STANDARD_FRAME_LEN,
        }
    }
}

/// The protocol version of a decoding session.
///
/// Starts [`Unknown`](ProtocolVersion::Unknown) and is resolved at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProtocolVersion {
    /// No format has been confirmed yet.
    #[default]
    Unknown,
    /// The legacy format was confirmed by a recurring header.
    Legacy,
    /// The standard format was confirmed, reporting a firmware version.
    Standard { firmware: u8 },
}

impl ProtocolVersion {
    /// The wire format in use, if known.
    pub const fn protocol(self) -> Option<Protocol> {
        match self {
            ProtocolVersion::Unknown => None,
            ProtocolVersion::Legacy => Some(Protocol::Legacy),
            ProtocolVersion::Standard { .. } => Some(Protocol::Standard),
        }
    }

    /// The firmware version byte, for the standard format.
    pub const fn firmware(self) -> Option<u8> {
        match self {
            ProtocolVersion::Standard { firmware } => Some(firmware),
            _ => None,
        }
    }

    /// Whether a wire format has been confirmed.
    pub const fn is_known(self) -> bool {
        !matches!(self, ProtocolVersion::Unknown)
    }

    /// Record a detected version.
    ///
    /// Only the first resolution takes effect; a resolved version is never
    /// replaced or reset.
    pub fn resolve(&mut self, detected: ProtocolVersion) {
        debug_assert!(!self.is_known(), "protocol version resolved twice");
        debug_assert!(detected.is_known(), "resolved to an unknown version");

        if let ProtocolVersion::Unknown = self {
            *self = detected;
        }
    }
}
