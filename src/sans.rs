//! Internal finite-state machine for decoding the sensor's byte stream.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for a polled driver covering the
//! common case.
//!
//! # Architecture
//!
//! Decoding happens in two stages, each fed one byte at a time.
//!
//! A [`VersionDetector`] is a by-value state token. Advancing it with a byte
//! returns either a successor token or a [`detect::Detected`], which names the
//! wire format and holds the bytes of the frame that proved it. Those bytes
//! must be replayed into the frame decoder, since a byte source cannot be
//! rewound.
//!
//! A [`FrameDecoder`] is created for a resolved [`Protocol`]. It skips bytes
//! until it sees a header, then collects a fixed-length frame. A header byte
//! always restarts collection, even part way through a frame. Each completed
//! frame yields a raw distance, or an error if its checksum does not match.
//!
//! Some areas of the decoding process are not represented here and must be
//! carefully written by the application:
//!
//! - Reading only the bytes currently available, without blocking.
//!
//! - Recording the [`ProtocolVersion`] once detected, and never detecting
//! again for the same session.
//!
//! - Averaging and scaling raw distances. Legacy frames count in units of
//! 2.5 cm; standard frames count in centimeters.

pub mod check;
pub mod detect;
pub mod frame;
pub mod version;

pub use detect::VersionDetector;
pub use frame::FrameDecoder;
pub use version::{Protocol, ProtocolVersion};
