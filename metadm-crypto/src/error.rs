#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors produced by key derivation and agreement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidInputLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("DH operation failed: peer public key has small order")]
    LowOrderPoint,

    #[error("HKDF expand failed for {0}-byte output")]
    KdfExpand(usize),
}
