use core::num::NonZeroU32;

use thiserror::Error;

/// Misuse of an XOF-PRNG engine.
///
/// A call that returns one of these leaves the engine exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrngError {
    /// The operation is not valid in the current phase: inject after
    /// finalize, extract before finalize, or a second finalize.
    #[error("operation not valid in the current engine phase")]
    InvalidState,
    /// The absorbed input would exceed the input buffer capacity.
    #[error("absorbed input would exceed the buffer capacity")]
    Overflow,
    /// A required buffer was empty.
    #[error("invalid argument")]
    InvalidArgument,
}

impl PrngError {
    /// Stable code used when the error travels through `rand_core::Error`.
    pub const fn code(self) -> NonZeroU32 {
        let offset = match self {
            PrngError::InvalidState => 1,
            PrngError::Overflow => 2,
            PrngError::InvalidArgument => 3,
        };
        match NonZeroU32::new(rand_core::Error::CUSTOM_START + offset) {
            Some(code) => code,
            None => panic!("custom rand_core error codes are non-zero"),
        }
    }
}

impl From<PrngError> for rand_core::Error {
    fn from(err: PrngError) -> Self {
        rand_core::Error::from(err.code())
    }
}

/// Errors from key generation, signing and verification.
///
/// The first variants follow the error codes of the reference Falcon
/// library; `Prng` wraps a failure of the randomness engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FalconError {
    /// The operating system entropy source failed.
    #[error("random number generation failed")]
    Random,
    /// An encoded key or signature could not be decoded.
    #[error("invalid format")]
    Format,
    /// The signature does not match the message and public key.
    #[error("invalid signature")]
    BadSignature,
    /// Unsupported degree or empty input buffer.
    #[error("invalid argument")]
    BadArgument,
    #[error("prng failure: {0}")]
    Prng(#[from] PrngError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_custom() {
        let codes = [
            PrngError::InvalidState.code(),
            PrngError::Overflow.code(),
            PrngError::InvalidArgument.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert!(a.get() >= rand_core::Error::CUSTOM_START);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_rand_core_error_keeps_code() {
        let err: rand_core::Error = PrngError::Overflow.into();
        assert_eq!(err.code(), Some(PrngError::Overflow.code()));
    }

    #[test]
    fn test_prng_error_wraps_into_falcon_error() {
        let err: FalconError = PrngError::InvalidState.into();
        assert_eq!(err, FalconError::Prng(PrngError::InvalidState));
    }
}
