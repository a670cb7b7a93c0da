//! Bounded input buffer for the counter-mode engine.
//!
//! Everything injected before finalize is kept here so that it can be
//! hashed in one pass. The buffer is owned by exactly one engine and has a
//! capacity fixed at construction time.

use alloc::vec::Vec;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::PrngError;

/// Default input capacity, in bytes.
///
/// Large enough for the seed material used by key generation and signing
/// (a 48-byte system seed plus optional caller context).
pub const MAX_BUFFER_SIZE: usize = 1024;

/// Append-only byte buffer with a hard capacity.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct InputBuffer {
    data: Vec<u8>,
    #[zeroize(skip)]
    capacity: usize,
}

impl InputBuffer {
    /// Create a buffer holding at most [`MAX_BUFFER_SIZE`] bytes.
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_SIZE)
    }

    /// Create a buffer holding at most `capacity` bytes.
    ///
    /// The storage is allocated up front so that appends never reallocate
    /// (a reallocation would leave an unzeroized copy behind).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `bytes`, or fail without appending anything.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), PrngError> {
        if bytes.len() > self.remaining() {
            return Err(PrngError::Overflow);
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Wipe the contents. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.data.zeroize();
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = InputBuffer::new();
        assert_eq!(buffer.capacity(), MAX_BUFFER_SIZE);
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_push_up_to_capacity() {
        let mut buffer = InputBuffer::with_capacity(8);
        buffer.push(b"test").unwrap();
        buffer.push(b"").unwrap();
        buffer.push(b"1234").unwrap();
        assert_eq!(buffer.as_slice(), b"test1234");
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn test_overflow_is_not_partially_applied() {
        let mut buffer = InputBuffer::with_capacity(8);
        buffer.push(b"test").unwrap();
        assert_eq!(buffer.push(b"input"), Err(PrngError::Overflow));
        assert_eq!(buffer.as_slice(), b"test");
    }

    #[test]
    fn test_buffer_clear() {
        let mut buffer = InputBuffer::with_capacity(16);
        buffer.push(b"secret").unwrap();

        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 16);
        buffer.push(&[0xAA; 16]).unwrap();
    }

    #[test]
    fn test_zeroize_keeps_capacity() {
        let mut buffer = InputBuffer::with_capacity(16);
        buffer.push(b"secret").unwrap();

        buffer.zeroize();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.remaining(), 16);
        buffer.push(&[0xAA; 16]).unwrap();
    }
}
