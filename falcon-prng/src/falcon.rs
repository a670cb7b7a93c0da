//! Falcon key generation, signing and verification.
//!
//! The lattice algorithm and the key / signature encodings come from the
//! `fn-dsa` crate. This module only moves byte buffers in and out of it and
//! supplies the randomness: each key generation or signing call builds its
//! own engine from an [`Entropy`] description, or takes a caller-provided
//! RNG in the `*_with_rng` variants.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use fn_dsa::{
    sign_key_size, signature_size, vrfy_key_size, KeyPairGenerator, KeyPairGeneratorStandard,
    KeyPairGeneratorWeak, SigningKey, SigningKeyStandard, SigningKeyWeak, VerifyingKey,
    VerifyingKeyStandard, VerifyingKeyWeak, DOMAIN_NONE, FN_DSA_LOGN_1024, FN_DSA_LOGN_512,
    HASH_ID_RAW,
};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::entropy::Entropy;
use crate::error::FalconError;

/// Degree parameter (`logn`) of Falcon-512.
pub const FALCON_512: u32 = FN_DSA_LOGN_512;
/// Degree parameter (`logn`) of Falcon-1024.
pub const FALCON_1024: u32 = FN_DSA_LOGN_1024;
/// Smallest supported degree parameter. Degrees below [`FALCON_512`] are
/// reduced parameter sets, only meant for tests and experiments.
pub const FALCON_LOGN_MIN: u32 = 2;

/// Encoded key pair.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl KeyPair {
    pub fn logn(&self) -> Result<u32, FalconError> {
        get_logn(&self.public_key)
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(&self.public_key))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

fn check_logn(logn: u32) -> Result<(), FalconError> {
    if (FALCON_LOGN_MIN..=FALCON_1024).contains(&logn) {
        Ok(())
    } else {
        Err(FalconError::BadArgument)
    }
}

/// Degree of an encoded private key, public key or signature.
///
/// The degree sits in the low four bits of the header byte.
pub fn get_logn(encoded: &[u8]) -> Result<u32, FalconError> {
    let header = *encoded.first().ok_or(FalconError::BadArgument)?;
    let logn = u32::from(header & 0x0F);
    if logn == 0 || logn > FALCON_1024 {
        return Err(FalconError::Format);
    }
    Ok(logn)
}

/// Generate a key pair of degree `logn` with a fresh engine.
pub fn keygen(logn: u32, entropy: &Entropy<'_>) -> Result<KeyPair, FalconError> {
    check_logn(logn)?;
    let mut rng = entropy.session()?;
    keygen_with_rng(logn, &mut rng)
}

/// Generate a key pair of degree `logn` from `rng`.
pub fn keygen_with_rng<R: CryptoRng + RngCore>(
    logn: u32,
    rng: &mut R,
) -> Result<KeyPair, FalconError> {
    check_logn(logn)?;
    debug!(logn, "generating key pair");

    let mut private_key = vec![0u8; sign_key_size(logn)];
    let mut public_key = vec![0u8; vrfy_key_size(logn)];
    // The generators carry tens of kilobytes of scratch space.
    if logn >= FALCON_512 {
        Box::<KeyPairGeneratorStandard>::default().keygen(
            logn,
            rng,
            &mut private_key,
            &mut public_key,
        );
    } else {
        Box::<KeyPairGeneratorWeak>::default().keygen(
            logn,
            rng,
            &mut private_key,
            &mut public_key,
        );
    }

    Ok(KeyPair {
        private_key,
        public_key,
    })
}

/// Sign `message` with an encoded private key, using a fresh engine.
pub fn sign(
    message: &[u8],
    private_key: &[u8],
    entropy: &Entropy<'_>,
) -> Result<Vec<u8>, FalconError> {
    let logn = encoded_logn(private_key)?;
    let mut rng = entropy.session()?;
    sign_with_logn(logn, message, private_key, &mut rng)
}

/// Sign `message` with an encoded private key, drawing randomness from `rng`.
pub fn sign_with_rng<R: CryptoRng + RngCore>(
    message: &[u8],
    private_key: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, FalconError> {
    let logn = encoded_logn(private_key)?;
    sign_with_logn(logn, message, private_key, rng)
}

/// Degree of a key about to be decoded; unsupported degrees are `Format`.
fn encoded_logn(encoded: &[u8]) -> Result<u32, FalconError> {
    let logn = get_logn(encoded)?;
    if logn < FALCON_LOGN_MIN {
        return Err(FalconError::Format);
    }
    Ok(logn)
}

fn sign_with_logn<R: CryptoRng + RngCore>(
    logn: u32,
    message: &[u8],
    private_key: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, FalconError> {
    if logn >= FALCON_512 {
        sign_as::<SigningKeyStandard, R>(message, private_key, rng)
    } else {
        sign_as::<SigningKeyWeak, R>(message, private_key, rng)
    }
}

fn sign_as<K: SigningKey, R: CryptoRng + RngCore>(
    message: &[u8],
    private_key: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, FalconError> {
    let mut signing_key = K::decode(private_key).ok_or(FalconError::Format)?;
    let logn = signing_key.get_logn();
    debug!(logn, message_len = message.len(), "signing message");
    let mut signature = vec![0u8; signature_size(logn)];
    signing_key.sign(rng, &DOMAIN_NONE, &HASH_ID_RAW, message, &mut signature);
    Ok(signature)
}

/// Check `signature` over `message` against an encoded public key.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> Result<(), FalconError> {
    if signature.is_empty() {
        return Err(FalconError::BadArgument);
    }
    let logn = encoded_logn(public_key)?;
    let accepted = if logn >= FALCON_512 {
        verify_as::<VerifyingKeyStandard>(signature, message, public_key)?
    } else {
        verify_as::<VerifyingKeyWeak>(signature, message, public_key)?
    };
    if accepted {
        Ok(())
    } else {
        debug!(signature_len = signature.len(), "signature rejected");
        Err(FalconError::BadSignature)
    }
}

fn verify_as<K: VerifyingKey>(
    signature: &[u8],
    message: &[u8],
    public_key: &[u8],
) -> Result<bool, FalconError> {
    let verifying_key = K::decode(public_key).ok_or(FalconError::Format)?;
    Ok(verifying_key.verify(signature, &DOMAIN_NONE, &HASH_ID_RAW, message))
}
