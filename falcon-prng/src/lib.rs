//! Falcon post-quantum signatures driven by a pluggable extendable-output
//! pseudorandom generator.
//!
//! The lattice side of [Falcon] (key generation, the fast Fourier sampler,
//! key and signature encodings) is provided by the [fn-dsa] crate. What this
//! crate adds is the randomness source that feeds it: a deterministic,
//! stateful XOF-PRNG with strict inject / finalize / extract phases.
//!
//! Two engine flavors share the [`XofPrng`] interface:
//!
//! - [`KeccakPrng`]: SHA3-256 in counter mode. The absorbed input is hashed
//!   once at finalize time into a 32-byte state, and output block `i` is
//!   `SHA3-256(state || be64(i))`.
//! - [`ShakePrng`]: the SHAKE256 sponge.
//!
//! Both implement [`rand_core::RngCore`] and [`rand_core::CryptoRng`], so
//! they can be handed directly to the signature library. The flavor used by
//! [`keygen`] and [`sign`] is picked with [`PrngKind`]; its default follows
//! the `keccak256-prng` cargo feature.
//!
//! [Falcon]: https://falcon-sign.info/
//! [fn-dsa]: https://crates.io/crates/fn-dsa
//!
//! # Usage
//!
//! ```ignore
//! use falcon_prng::{keygen, sign, verify, Entropy, FALCON_512};
//!
//! let keys = keygen(FALCON_512, &Entropy::system())?;
//! let sig = sign(b"Hello, Falcon!", &keys.private_key, &Entropy::system())?;
//! verify(&sig, b"Hello, Falcon!", &keys.public_key)?;
//! ```
//!
//! Driving an engine by hand:
//!
//! ```ignore
//! use falcon_prng::{KeccakPrng, XofPrng};
//!
//! let mut prng = KeccakPrng::new();
//! prng.inject(b"test input")?;
//! prng.finalize()?;
//! let mut out = [0u8; 32];
//! prng.extract(&mut out)?;
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod entropy;
pub mod error;
pub mod expand;
pub mod falcon;
pub mod hash;
pub mod prng;
pub mod rng;
pub mod shake;

pub use buffer::{InputBuffer, MAX_BUFFER_SIZE};
pub use entropy::{Entropy, SYSTEM_SEED_SIZE};
pub use error::{FalconError, PrngError};
pub use expand::{Cached, Expansion, Recompute};
pub use falcon::{
    get_logn, keygen, keygen_with_rng, sign, sign_with_rng, verify, KeyPair, FALCON_1024,
    FALCON_512, FALCON_LOGN_MIN,
};
pub use fn_dsa::{sign_key_size, signature_size, vrfy_key_size};
pub use hash::{digest, DIGEST_SIZE};
pub use prng::{
    DomainSeparation, KeccakPrng, KeccakPrngConfig, PrngKind, SessionPrng, XofPrng,
    SHAKE_DOMAIN_SUFFIX,
};
pub use shake::ShakePrng;
