#![forbid(unsafe_code)]

//! X25519 scalar multiplication.

use tracing::warn;
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};

use crate::keys::{PublicKey, SecretKey, SharedSecret, KEY_LENGTH};
use crate::CryptoError;

/// Fixed-base multiplication: the public point for `secret`.
pub fn scalar_base_mult(secret: &SecretKey) -> PublicKey {
    PublicKey::new(x25519(secret.to_bytes(), X25519_BASEPOINT_BYTES))
}

/// Variable-base multiplication of `secret` by the peer's point.
///
/// An all-zero output means `peer` lies in the small-order subgroup and the
/// result carries no contribution from `secret`; it is rejected.
pub fn scalar_mult(secret: &SecretKey, peer: &PublicKey) -> Result<SharedSecret, CryptoError> {
    let shared = SharedSecret::new(x25519(secret.to_bytes(), peer.to_bytes()));
    if shared.as_bytes() == &[0u8; KEY_LENGTH] {
        warn!(peer = ?peer, "rejecting low-order peer public key");
        return Err(CryptoError::LowOrderPoint);
    }
    Ok(shared)
}

/// Length-checked variant of [`scalar_mult`] for untyped buffers.
pub fn scalar_mult_slices(secret: &[u8], peer: &[u8]) -> Result<[u8; KEY_LENGTH], CryptoError> {
    let secret = SecretKey::from_slice(secret)?;
    let peer = PublicKey::from_slice(peer)?;
    scalar_mult(&secret, &peer).map(|shared| shared.to_bytes())
}
