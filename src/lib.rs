#![no_std]

//! A streaming decoder for the serial output of uLanding radar altimeters.
//!
//! The sensor speaks one of two self-synchronizing wire formats, and never
//! says which. Ulanding infers the format from the bytes it sees, then keeps
//! finding frame boundaries, checking integrity, and averaging the frames of
//! each polling cycle into a single distance.
//!
//! Most users should begin with [`avec::Rangefinder`], which drains a
//! [`avec::ByteSource`] once per poll and publishes to a
//! [`avec::StatusSink`]. Applications that manage their own bytes (such as
//! those running on embedded systems) can drive the finite-state machine in
//! the [`sans`] module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the system clock and `VecDeque` byte source (default).

pub mod avec;
pub mod sans;
