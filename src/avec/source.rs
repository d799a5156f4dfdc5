//! Non-blocking byte sources.

/// A non-blocking supplier of bytes from the sensor.
///
/// Bytes are yielded in the order they were received, and cannot be read
/// again once taken.
pub trait ByteSource {
    /// Number of bytes that can be read without blocking.
    fn available(&self) -> usize;

    /// Take the next byte, if one is available.
    fn read_next(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn available(&self) -> usize {
        (**self).available()
    }

    fn read_next(&mut self) -> Option<u8> {
        (**self).read_next()
    }
}

impl ByteSource for &[u8] {
    fn available(&self) -> usize {
        self.len()
    }

    fn read_next(&mut self) -> Option<u8> {
        let (&first, rest) = self.split_first()?;
        *self = rest;
        Some(first)
    }
}

#[cfg(feature = "std")]
mod std_impls {
    extern crate std;

    use std::collections::VecDeque;

    use super::ByteSource;

    /// _Requires Cargo feature `std`._
    impl ByteSource for VecDeque<u8> {
        fn available(&self) -> usize {
            self.len()
        }

        fn read_next(&mut self) -> Option<u8> {
            self.pop_front()
        }
    }
}
