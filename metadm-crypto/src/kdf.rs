#![forbid(unsafe_code)]

//! Deterministic keypair derivation for meta-feed direct messages.
//!
//! The secret scalar is `HKDF-SHA256(salt = "ssb", ikm = seed, info, L = 32)` where
//! `info` is built by [`dm_info`]. The public key is the fixed-base X25519 product
//! of that scalar. No randomness is involved: identical `(seed, nonce)` pairs always
//! yield identical keypairs.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::dh::scalar_base_mult;
use crate::keys::{Keypair, Nonce, Seed, SecretKey, KEY_LENGTH};
use crate::CryptoError;

/// HKDF salt shared by every implementation of the protocol.
pub const DM_SALT: &[u8] = b"ssb";

/// Versioned domain separation prefix of the HKDF info parameter.
pub const DM_INFO_PREFIX: &[u8] = b"ssb-meta-feeds-dm-v1:";

pub const SECRET_KEY_LENGTH: usize = KEY_LENGTH;

/// Build the HKDF info parameter for `nonce`.
///
/// The byte rule is `DM_INFO_PREFIX || utf8(lossy_decode(nonce))`: the nonce is
/// decoded as UTF-8 with every maximal invalid subsequence replaced by U+FFFD, then
/// re-encoded. This is the textual form other implementations obtain when they
/// concatenate the raw nonce buffer onto the prefix string, so it must not be
/// replaced by hex or by the raw bytes. Valid UTF-8 nonces pass through unchanged.
pub fn dm_info(nonce: &Nonce) -> Vec<u8> {
    let text = String::from_utf8_lossy(nonce.as_bytes());
    let mut info = Vec::with_capacity(DM_INFO_PREFIX.len() + text.len());
    info.extend_from_slice(DM_INFO_PREFIX);
    info.extend_from_slice(text.as_bytes());
    info
}

/// RFC 5869 extract-then-expand into `okm`.
pub fn hkdf_sha256(
    salt: &[u8],
    ikm: &[u8],
    info: &[u8],
    okm: &mut [u8],
) -> Result<(), CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    hk.expand(info, okm)
        .map_err(|_| CryptoError::KdfExpand(okm.len()))
}

/// Derive the secret scalar for `(seed, nonce)`.
pub fn derive_secret(seed: &Seed, nonce: &Nonce) -> SecretKey {
    let info = dm_info(nonce);
    let mut okm = [0u8; SECRET_KEY_LENGTH];
    let Ok(()) = hkdf_sha256(DM_SALT, seed.as_bytes(), &info, &mut okm) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };
    SecretKey::new(okm)
}

/// Derive the full keypair for `(seed, nonce)`.
pub fn derive_keys(seed: &Seed, nonce: &Nonce) -> Keypair {
    let secret = derive_secret(seed, nonce);
    let public = scalar_base_mult(&secret);
    Keypair { secret, public }
}

/// Length-checked variant of [`derive_keys`] for untyped buffers.
pub fn derive_keys_from_slices(seed: &[u8], nonce: &[u8]) -> Result<Keypair, CryptoError> {
    let seed = Seed::from_slice(seed)?;
    let nonce = Nonce::from_slice(nonce)?;
    Ok(derive_keys(&seed, &nonce))
}
