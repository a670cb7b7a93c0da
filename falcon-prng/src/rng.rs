//! `rand_core` integration.
//!
//! The signature library draws randomness through [`RngCore`]. A finalized
//! engine serves those requests from its output stream; an engine that was
//! never finalized reports [`PrngError::InvalidState`] through
//! `try_fill_bytes` and panics in `fill_bytes`, which has no error path.

use rand_core::{impls, CryptoRng, RngCore};

use crate::expand::Expansion;
use crate::prng::{KeccakPrng, SessionPrng, XofPrng};
use crate::shake::ShakePrng;

macro_rules! rng_impl {
    (impl$(<$param:ident: $bound:path>)? for $typename:ty) => {
        impl$(<$param: $bound>)? RngCore for $typename {
            fn next_u32(&mut self) -> u32 {
                impls::next_u32_via_fill(self)
            }

            fn next_u64(&mut self) -> u64 {
                impls::next_u64_via_fill(self)
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                if let Err(err) = self.extract(dest) {
                    panic!("prng extraction failed: {}", err);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
                self.extract(dest).map_err(rand_core::Error::from)
            }
        }

        impl$(<$param: $bound>)? CryptoRng for $typename {}
    };
}

rng_impl!(impl<E: Expansion> for KeccakPrng<E>);
rng_impl!(impl for ShakePrng);
rng_impl!(impl for SessionPrng);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrngError;
    use crate::prng::PrngKind;

    #[test]
    fn test_fill_bytes_follows_extract() {
        for kind in [PrngKind::Keccak256, PrngKind::Shake256] {
            let mut a = kind.engine();
            let mut b = kind.engine();
            for prng in [&mut a, &mut b] {
                prng.inject(b"rng adapter").unwrap();
                prng.finalize().unwrap();
            }

            let mut via_rng = [0u8; 40];
            a.fill_bytes(&mut via_rng[..12]);
            a.fill_bytes(&mut via_rng[12..]);

            assert_eq!(via_rng.to_vec(), b.extract_vec(40).unwrap(), "{}", kind);
        }
    }

    #[test]
    fn test_next_u64_is_little_endian_stream() {
        let mut a = KeccakPrng::new();
        let mut b = KeccakPrng::new();
        for prng in [&mut a, &mut b] {
            prng.finalize().unwrap();
        }
        let mut bytes = [0u8; 8];
        b.extract(&mut bytes).unwrap();
        assert_eq!(a.next_u64(), u64::from_le_bytes(bytes));
    }

    #[test]
    fn test_try_fill_before_finalize_reports_code() {
        let mut prng = ShakePrng::new();
        let mut out = [0u8; 4];
        let err = prng.try_fill_bytes(&mut out).unwrap_err();
        assert_eq!(err.code(), Some(PrngError::InvalidState.code()));
    }
}
