//! Seeding of per-session engines.

use tracing::debug;

use crate::error::{FalconError, PrngError};
use crate::prng::{PrngKind, SessionPrng, XofPrng};

/// Bytes drawn from the operating system when seeding from the system.
pub const SYSTEM_SEED_SIZE: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source<'a> {
    #[cfg(feature = "getrandom")]
    System,
    Seed(&'a [u8]),
}

/// Where a session engine gets its seed from, and which flavor it is.
///
/// Each call to [`Entropy::session`] builds a new engine; engines are never
/// shared between key generation or signing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entropy<'a> {
    source: Source<'a>,
    kind: PrngKind,
}

impl<'a> Entropy<'a> {
    /// Seed from the operating system RNG.
    #[cfg(feature = "getrandom")]
    pub fn system() -> Self {
        Self {
            source: Source::System,
            kind: PrngKind::default(),
        }
    }

    /// Seed from an explicit buffer. Meant for tests and reproducible runs.
    pub fn from_seed(seed: &'a [u8]) -> Self {
        Self {
            source: Source::Seed(seed),
            kind: PrngKind::default(),
        }
    }

    /// Use the given engine flavor instead of the build default.
    pub fn with_kind(self, kind: PrngKind) -> Self {
        Self { kind, ..self }
    }

    pub fn kind(&self) -> PrngKind {
        self.kind
    }

    /// A fresh engine, seeded and finalized, ready to be read from.
    pub fn session(&self) -> Result<SessionPrng, FalconError> {
        let mut prng = self.kind.engine();
        match self.source {
            #[cfg(feature = "getrandom")]
            Source::System => {
                let mut seed = [0u8; SYSTEM_SEED_SIZE];
                getrandom::getrandom(&mut seed).map_err(|_| FalconError::Random)?;
                let injected = prng.inject(&seed);
                zeroize::Zeroize::zeroize(&mut seed);
                injected?;
            }
            Source::Seed(seed) => {
                if seed.is_empty() {
                    return Err(PrngError::InvalidArgument.into());
                }
                prng.inject(seed)?;
            }
        }
        prng.finalize()?;
        debug!(prng = self.kind.name(), "seeded session prng");
        Ok(prng)
    }
}
