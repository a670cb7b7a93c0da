//! Counter-mode expansion of the derived state.
//!
//! Block `i` of the output stream is `SHA3-256(state || be64(i))`. An
//! [`Expansion`] strategy turns that block function into a byte stream that
//! can be read in arbitrary slices; reading `n1` bytes and then `n2` bytes
//! yields the same bytes as reading `n1 + n2` at once.
//!
//! Two strategies produce identical streams:
//!
//! - [`Cached`] keeps the last block and a cursor into it.
//! - [`Recompute`] keeps only the cursor and rehashes a partially read
//!   block when the next request starts inside it.

use zeroize::Zeroize;

use crate::hash::{digest_parts, DIGEST_SIZE};

/// Size of one expansion block.
pub const BLOCK_SIZE: usize = DIGEST_SIZE;

/// Output block number `counter` for `state`.
pub fn counter_block(state: &[u8; DIGEST_SIZE], counter: u64) -> [u8; BLOCK_SIZE] {
    digest_parts(&[state.as_slice(), counter.to_be_bytes().as_slice()])
}

/// How an engine turns [`counter_block`] into a contiguous stream.
///
/// `counter` is the number of blocks generated so far, which is also the
/// index of the next block to generate. Implementations must bump it once
/// per newly generated block.
pub trait Expansion: Default + Zeroize {
    /// Forget any buffered output. Called at finalize time.
    fn reset(&mut self);

    /// Fill `out` with the next `out.len()` bytes of the stream.
    fn squeeze(&mut self, state: &[u8; DIGEST_SIZE], counter: &mut u64, out: &mut [u8]);
}

/// Keeps the most recent block so that short reads never rehash.
#[derive(Clone)]
pub struct Cached {
    block: [u8; BLOCK_SIZE],
    // BLOCK_SIZE means the cache is empty.
    pos: usize,
}

impl Default for Cached {
    fn default() -> Self {
        Self {
            block: [0u8; BLOCK_SIZE],
            pos: BLOCK_SIZE,
        }
    }
}

impl Zeroize for Cached {
    fn zeroize(&mut self) {
        self.reset();
    }
}

impl Expansion for Cached {
    fn reset(&mut self) {
        self.block.zeroize();
        self.pos = BLOCK_SIZE;
    }

    fn squeeze(&mut self, state: &[u8; DIGEST_SIZE], counter: &mut u64, out: &mut [u8]) {
        let mut offset = 0;
        while offset < out.len() {
            if self.pos == BLOCK_SIZE {
                self.block = counter_block(state, *counter);
                *counter = counter.wrapping_add(1);
                self.pos = 0;
            }
            let take = core::cmp::min(out.len() - offset, BLOCK_SIZE - self.pos);
            out[offset..offset + take].copy_from_slice(&self.block[self.pos..self.pos + take]);
            self.pos += take;
            offset += take;
        }
    }
}

/// Stores no output; a read that starts mid-block regenerates that block.
#[derive(Clone, Default, Zeroize)]
pub struct Recompute {
    // Bytes already consumed from block `counter - 1`; 0 when aligned.
    pos: usize,
}

impl Expansion for Recompute {
    fn reset(&mut self) {
        self.pos = 0;
    }

    fn squeeze(&mut self, state: &[u8; DIGEST_SIZE], counter: &mut u64, out: &mut [u8]) {
        let mut offset = 0;
        if self.pos != 0 && !out.is_empty() {
            let mut block = counter_block(state, counter.wrapping_sub(1));
            let take = core::cmp::min(out.len(), BLOCK_SIZE - self.pos);
            out[..take].copy_from_slice(&block[self.pos..self.pos + take]);
            block.zeroize();
            self.pos = (self.pos + take) % BLOCK_SIZE;
            offset = take;
        }
        while offset < out.len() {
            let mut block = counter_block(state, *counter);
            *counter = counter.wrapping_add(1);
            let take = core::cmp::min(out.len() - offset, BLOCK_SIZE);
            out[offset..offset + take].copy_from_slice(&block[..take]);
            block.zeroize();
            self.pos = take % BLOCK_SIZE;
            offset += take;
        }
    }
}
