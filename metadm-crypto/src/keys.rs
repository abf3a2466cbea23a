#![forbid(unsafe_code)]

//! Fixed-size key material.
//!
//! Every buffer handled by the derivation and agreement steps is exactly
//! [`KEY_LENGTH`] bytes. Conversions from untyped slices reject any other
//! length with [`CryptoError::InvalidInputLength`] and never truncate or pad.

use rand_core::{CryptoRng, RngCore};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::CryptoError;

/// Length of every seed, nonce, scalar and point in bytes.
pub const KEY_LENGTH: usize = 32;

fn fixed(field: &'static str, bytes: &[u8]) -> Result<[u8; KEY_LENGTH], CryptoError> {
    <[u8; KEY_LENGTH]>::try_from(bytes).map_err(|_| CryptoError::InvalidInputLength {
        field,
        expected: KEY_LENGTH,
        actual: bytes.len(),
    })
}

macro_rules! key_bytes {
    ($name:ident, $field:literal) => {
        impl $name {
            pub const fn new(bytes: [u8; KEY_LENGTH]) -> Self {
                Self(bytes)
            }

            /// Copy from a slice, failing unless it is exactly 32 bytes long.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
                fixed($field, bytes).map(Self)
            }

            pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
                &self.0
            }

            pub fn to_bytes(&self) -> [u8; KEY_LENGTH] {
                self.0
            }
        }

        impl From<[u8; KEY_LENGTH]> for $name {
            fn from(bytes: [u8; KEY_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = CryptoError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

/// High-entropy input keying material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed([u8; KEY_LENGTH]);

/// Per-derivation context, e.g. a message or session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; KEY_LENGTH]);

/// curve25519 secret scalar. Unclamped; X25519 clamps internally.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LENGTH]);

/// curve25519 public point (Montgomery u-coordinate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey([u8; KEY_LENGTH]);

/// X25519 agreement output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; KEY_LENGTH]);

key_bytes!(Seed, "seed");
key_bytes!(Nonce, "nonce");
key_bytes!(SecretKey, "secret key");
key_bytes!(PublicKey, "public key");
key_bytes!(SharedSecret, "shared secret");

impl Seed {
    /// Draw a fresh seed from the supplied CSPRNG.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LENGTH];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl Nonce {
    /// Draw a fresh nonce from the supplied CSPRNG.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LENGTH];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Secret scalar together with its public point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_of_wrong_length_are_rejected() {
        for len in [0usize, 1, 31, 33, 64] {
            let buf = vec![7u8; len];
            let err = Seed::from_slice(&buf).unwrap_err();
            assert_eq!(
                err,
                CryptoError::InvalidInputLength { field: "seed", expected: 32, actual: len }
            );
            assert!(PublicKey::try_from(buf.as_slice()).is_err());
        }
    }

    #[test]
    fn exact_length_slice_is_copied_verbatim() {
        let buf: Vec<u8> = (0u8..32).collect();
        let nonce = Nonce::from_slice(&buf).unwrap();
        assert_eq!(nonce.as_bytes().as_slice(), buf.as_slice());
    }

    #[test]
    fn secret_material_is_redacted_in_debug() {
        let secret = SecretKey::new([0xAA; 32]);
        let rendered = format!("{secret:?}");
        assert_eq!(rendered, "SecretKey(..)");
        assert!(!rendered.contains("170"));
    }

    #[test]
    fn random_draws_differ() {
        let mut rng = rand_core::OsRng;
        assert_ne!(Seed::random(&mut rng), Seed::random(&mut rng));
        assert_ne!(Nonce::random(&mut rng), Nonce::random(&mut rng));
    }
}
