#![forbid(unsafe_code)]

//! Common error type for the vector tooling.

use metadm_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadmError {
    /// Artifact or config file I/O failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing failures.
    #[error("Config parse error: {0}")]
    ConfigParse(toml::de::Error),

    /// Vector (de)serialization failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A base64 field in a vector could not be decoded.
    #[error("Base64 decode error in `{field}`: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// Malformed key material or rejected agreement.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A determinism, commutativity or round-trip check failed.
    #[error("Invariant violated ({property}): {detail}")]
    InvariantViolation { property: String, detail: String },
}

impl MetadmError {
    pub fn invariant(property: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvariantViolation { property: property.into(), detail: detail.into() }
    }
}

/// Convenient alias for results throughout the vector crates.
pub type MetadmResult<T> = Result<T, MetadmError>;
