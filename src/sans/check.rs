//! Helper for computing frame checksums.

/// Accumulate a slice of bytes into a checksum value.
pub fn compute_checksum(init: u8, r: &[u8]) -> u8 {
    r.iter().fold(init, |acc, b| acc.wrapping_add(*b))
}
