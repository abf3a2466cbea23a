#![forbid(unsafe_code)]

//! Meta-feed direct message key agreement.
//!
//! This crate provides:
//! 1. Fixed-size key material types with strict length validation (see [`keys`]).
//! 2. Deterministic curve25519 keypair derivation from a seed and nonce via
//!    HKDF-SHA256 with the `ssb-meta-feeds-dm-v1:` domain tag (see [`kdf`]).
//! 3. X25519 shared secret agreement (see [`dh`]).

pub mod dh;
pub mod error;
pub mod kdf;
pub mod keys;

pub use dh::{scalar_base_mult, scalar_mult, scalar_mult_slices};
pub use error::CryptoError;
pub use kdf::{derive_keys, derive_keys_from_slices, derive_secret, dm_info};
pub use keys::{Keypair, Nonce, PublicKey, Seed, SecretKey, SharedSecret, KEY_LENGTH};
