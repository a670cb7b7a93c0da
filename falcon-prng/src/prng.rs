//! XOF-PRNG engines.
//!
//! Every engine goes through two phases. While open it accepts input via
//! [`XofPrng::inject`]; [`XofPrng::finalize`] locks the input for good, and
//! from then on [`XofPrng::extract`] produces an unbounded output stream.
//! Calling an operation in the wrong phase returns
//! [`PrngError::InvalidState`] and changes nothing.

use alloc::vec;
use alloc::vec::Vec;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::buffer::{InputBuffer, MAX_BUFFER_SIZE};
use crate::error::PrngError;
use crate::expand::{Cached, Expansion};
use crate::hash::{digest_parts, DIGEST_SIZE};
use crate::shake::ShakePrng;

/// Inject / finalize / extract interface shared by all engine flavors.
pub trait XofPrng {
    /// Absorb `data`. Injecting `a` then `b` is the same as injecting
    /// `a || b`; injecting an empty slice is a no-op.
    fn inject(&mut self, data: &[u8]) -> Result<(), PrngError>;

    /// Lock the input and switch to output mode. Allowed exactly once.
    fn finalize(&mut self) -> Result<(), PrngError>;

    /// Fill `out` with the next bytes of the output stream.
    fn extract(&mut self, out: &mut [u8]) -> Result<(), PrngError>;

    fn is_finalized(&self) -> bool;

    /// Extract `len` bytes into a fresh vector.
    fn extract_vec(&mut self, len: usize) -> Result<Vec<u8>, PrngError> {
        let mut out = vec![0u8; len];
        self.extract(&mut out)?;
        Ok(out)
    }
}

/// Byte appended to the buffered input before the finalize digest.
pub const SHAKE_DOMAIN_SUFFIX: u8 = 0x1F;

/// What, if anything, follows the absorbed input in the finalize digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainSeparation {
    /// `state = SHA3-256(input)`.
    None,
    /// `state = SHA3-256(input || byte)`.
    Suffix(u8),
}

impl Default for DomainSeparation {
    fn default() -> Self {
        DomainSeparation::Suffix(SHAKE_DOMAIN_SUFFIX)
    }
}

/// Construction-time settings of a [`KeccakPrng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeccakPrngConfig {
    /// Maximum number of bytes that can be injected.
    pub capacity: usize,
    pub domain_separation: DomainSeparation,
}

impl Default for KeccakPrngConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_BUFFER_SIZE,
            domain_separation: DomainSeparation::default(),
        }
    }
}

/// SHA3-256 counter-mode engine.
///
/// Input is buffered until [`finalize`](XofPrng::finalize), which hashes it
/// into a 32-byte state. Output block `i` is `SHA3-256(state || be64(i))`.
/// The expansion strategy `E` decides whether a partially read block is
/// kept ([`Cached`], the default) or regenerated
/// ([`Recompute`](crate::expand::Recompute)); the output is the same.
///
/// Input, derived state and cached output are wiped on drop. An explicit
/// [`zeroize`](Zeroize::zeroize) does the same and leaves an open engine
/// with its configuration intact.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeccakPrng<E: Expansion = Cached> {
    input: InputBuffer,
    #[zeroize(skip)]
    domain_separation: DomainSeparation,
    state: [u8; DIGEST_SIZE],
    counter: u64,
    finalized: bool,
    expansion: E,
}

impl KeccakPrng<Cached> {
    /// A caching engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(KeccakPrngConfig::default())
    }
}

impl Default for KeccakPrng<Cached> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Expansion> KeccakPrng<E> {
    pub fn with_config(config: KeccakPrngConfig) -> Self {
        Self {
            input: InputBuffer::with_capacity(config.capacity),
            domain_separation: config.domain_separation,
            state: [0u8; DIGEST_SIZE],
            counter: 0,
            finalized: false,
            expansion: E::default(),
        }
    }

    /// Number of bytes injected so far.
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    pub fn capacity(&self) -> usize {
        self.input.capacity()
    }

    /// Number of expansion blocks generated so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn domain_separation(&self) -> DomainSeparation {
        self.domain_separation
    }
}

// Key material stays out of debug output.
impl<E: Expansion> core::fmt::Debug for KeccakPrng<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeccakPrng")
            .field("input_len", &self.input.len())
            .field("capacity", &self.input.capacity())
            .field("domain_separation", &self.domain_separation)
            .field("counter", &self.counter)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl<E: Expansion> XofPrng for KeccakPrng<E> {
    fn inject(&mut self, data: &[u8]) -> Result<(), PrngError> {
        if self.finalized {
            return Err(PrngError::InvalidState);
        }
        self.input.push(data)
    }

    fn finalize(&mut self) -> Result<(), PrngError> {
        if self.finalized {
            return Err(PrngError::InvalidState);
        }
        self.state = match self.domain_separation {
            DomainSeparation::None => digest_parts(&[self.input.as_slice()]),
            DomainSeparation::Suffix(byte) => {
                digest_parts(&[self.input.as_slice(), core::slice::from_ref(&byte)])
            }
        };
        trace!(input_len = self.input.len(), "keccak256 prng finalized");
        self.input.clear();
        self.counter = 0;
        self.expansion.reset();
        self.finalized = true;
        Ok(())
    }

    fn extract(&mut self, out: &mut [u8]) -> Result<(), PrngError> {
        if !self.finalized {
            return Err(PrngError::InvalidState);
        }
        self.expansion.squeeze(&self.state, &mut self.counter, out);
        Ok(())
    }

    fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// Engine flavor used for a generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrngKind {
    /// [`KeccakPrng`] with the default configuration.
    Keccak256,
    /// [`ShakePrng`].
    Shake256,
}

impl PrngKind {
    pub fn name(self) -> &'static str {
        match self {
            PrngKind::Keccak256 => "keccak256",
            PrngKind::Shake256 => "shake256",
        }
    }

    /// A fresh, open engine of this flavor.
    pub fn engine(self) -> SessionPrng {
        match self {
            PrngKind::Keccak256 => SessionPrng::Keccak256(KeccakPrng::new()),
            PrngKind::Shake256 => SessionPrng::Shake256(ShakePrng::new()),
        }
    }
}

impl Default for PrngKind {
    /// SHAKE256, or SHA3-256 counter mode with the `keccak256-prng` feature.
    fn default() -> Self {
        if cfg!(feature = "keccak256-prng") {
            PrngKind::Keccak256
        } else {
            PrngKind::Shake256
        }
    }
}

impl core::fmt::Display for PrngKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for PrngKind {
    type Err = PrngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keccak256" | "sha3-256" => Ok(PrngKind::Keccak256),
            "shake256" => Ok(PrngKind::Shake256),
            _ => Err(PrngError::InvalidArgument),
        }
    }
}

/// An engine whose flavor was chosen at run time.
#[derive(Clone, Debug)]
pub enum SessionPrng {
    Keccak256(KeccakPrng),
    Shake256(ShakePrng),
}

impl SessionPrng {
    pub fn kind(&self) -> PrngKind {
        match self {
            SessionPrng::Keccak256(_) => PrngKind::Keccak256,
            SessionPrng::Shake256(_) => PrngKind::Shake256,
        }
    }
}

impl XofPrng for SessionPrng {
    fn inject(&mut self, data: &[u8]) -> Result<(), PrngError> {
        match self {
            SessionPrng::Keccak256(prng) => prng.inject(data),
            SessionPrng::Shake256(prng) => prng.inject(data),
        }
    }

    fn finalize(&mut self) -> Result<(), PrngError> {
        match self {
            SessionPrng::Keccak256(prng) => prng.finalize(),
            SessionPrng::Shake256(prng) => prng.finalize(),
        }
    }

    fn extract(&mut self, out: &mut [u8]) -> Result<(), PrngError> {
        match self {
            SessionPrng::Keccak256(prng) => prng.extract(out),
            SessionPrng::Shake256(prng) => prng.extract(out),
        }
    }

    fn is_finalized(&self) -> bool {
        match self {
            SessionPrng::Keccak256(prng) => prng.is_finalized(),
            SessionPrng::Shake256(prng) => prng.is_finalized(),
        }
    }
}
