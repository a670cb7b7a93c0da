//! SHAKE256 engine.
//!
//! The sponge flavor of [`XofPrng`]. It follows the same phase and capacity
//! rules as [`KeccakPrng`](crate::KeccakPrng), so the two can be swapped
//! without changing anything but the bytes produced.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake256, Shake256Reader};
use tracing::trace;

use crate::buffer::MAX_BUFFER_SIZE;
use crate::error::PrngError;
use crate::prng::XofPrng;

#[derive(Clone)]
enum Phase {
    Absorbing(Shake256),
    Squeezing(Shake256Reader),
}

/// SHAKE256 used as inject / finalize / extract PRNG.
///
/// Unlike [`KeccakPrng`](crate::KeccakPrng), this engine is not zeroized on
/// drop. The `sha3` sponge and reader state is released as is, so absorbed
/// input may linger in freed memory.
#[derive(Clone)]
pub struct ShakePrng {
    phase: Phase,
    absorbed: usize,
    capacity: usize,
}

impl ShakePrng {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_SIZE)
    }

    /// An engine accepting at most `capacity` bytes of input.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            phase: Phase::Absorbing(Shake256::default()),
            absorbed: 0,
            capacity,
        }
    }

    /// Number of bytes injected so far.
    pub fn input_len(&self) -> usize {
        self.absorbed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl core::fmt::Debug for ShakePrng {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShakePrng")
            .field("input_len", &self.absorbed)
            .field("capacity", &self.capacity)
            .field("finalized", &self.is_finalized())
            .finish_non_exhaustive()
    }
}

impl Default for ShakePrng {
    fn default() -> Self {
        Self::new()
    }
}

impl XofPrng for ShakePrng {
    fn inject(&mut self, data: &[u8]) -> Result<(), PrngError> {
        let Phase::Absorbing(hasher) = &mut self.phase else {
            return Err(PrngError::InvalidState);
        };
        if data.len() > self.capacity - self.absorbed {
            return Err(PrngError::Overflow);
        }
        hasher.update(data);
        self.absorbed += data.len();
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), PrngError> {
        let reader = match &mut self.phase {
            Phase::Absorbing(hasher) => core::mem::take(hasher).finalize_xof(),
            Phase::Squeezing(_) => return Err(PrngError::InvalidState),
        };
        trace!(input_len = self.absorbed, "shake256 prng finalized");
        self.phase = Phase::Squeezing(reader);
        Ok(())
    }

    fn extract(&mut self, out: &mut [u8]) -> Result<(), PrngError> {
        match &mut self.phase {
            Phase::Squeezing(reader) => {
                reader.read(out);
                Ok(())
            }
            Phase::Absorbing(_) => Err(PrngError::InvalidState),
        }
    }

    fn is_finalized(&self) -> bool {
        matches!(self.phase, Phase::Squeezing(_))
    }
}
