#![forbid(unsafe_code)]

//! JSON test vector artifact.
//!
//! Field names, the `type` constant and standard padded base64 are part of the
//! compatibility contract with other implementations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use metadm_core::{MetadmError, MetadmResult};
use metadm_crypto::{derive_keys, Keypair, Nonce, PublicKey, SecretKey, Seed};

/// Discriminator identifying the vector format.
pub const VECTOR_TYPE: &str = "meta_feeds_direct_message_derived";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorInput {
    pub seed: String,
    pub nonce: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorOutput {
    pub secret: String,
    pub public: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub input: VectorInput,
    pub output: VectorOutput,
}

fn decode(field: &'static str, text: &str) -> MetadmResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|source| MetadmError::Base64 { field, source })
}

impl TestVector {
    /// Record the keypair derived from `(seed, nonce)`.
    pub fn derived(
        description: impl Into<String>,
        seed: &Seed,
        nonce: &Nonce,
        keys: &Keypair,
    ) -> Self {
        Self {
            kind: VECTOR_TYPE.to_string(),
            description: description.into(),
            input: VectorInput {
                seed: STANDARD.encode(seed),
                nonce: STANDARD.encode(nonce),
            },
            output: VectorOutput {
                secret: STANDARD.encode(&keys.secret),
                public: STANDARD.encode(keys.public),
            },
        }
    }

    /// Two-space indented JSON, without a trailing newline.
    pub fn to_json_pretty(&self) -> MetadmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> MetadmResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn seed(&self) -> MetadmResult<Seed> {
        Ok(Seed::from_slice(&decode("input.seed", &self.input.seed)?)?)
    }

    pub fn nonce(&self) -> MetadmResult<Nonce> {
        Ok(Nonce::from_slice(&decode("input.nonce", &self.input.nonce)?)?)
    }

    pub fn secret(&self) -> MetadmResult<SecretKey> {
        Ok(SecretKey::from_slice(&decode("output.secret", &self.output.secret)?)?)
    }

    pub fn public(&self) -> MetadmResult<PublicKey> {
        Ok(PublicKey::from_slice(&decode("output.public", &self.output.public)?)?)
    }

    /// Re-derive from the recorded inputs and compare against the recorded outputs.
    pub fn verify(&self) -> MetadmResult<()> {
        if self.kind != VECTOR_TYPE {
            return Err(MetadmError::invariant(
                "vector type",
                format!("expected `{VECTOR_TYPE}`, found `{}`", self.kind),
            ));
        }
        let keys = derive_keys(&self.seed()?, &self.nonce()?);
        if keys.secret != self.secret()? {
            return Err(MetadmError::invariant(
                "artifact round-trip",
                "secret key does not match re-derivation",
            ));
        }
        if keys.public != self.public()? {
            return Err(MetadmError::invariant(
                "artifact round-trip",
                "public key does not match re-derivation",
            ));
        }
        Ok(())
    }

    /// Write the artifact to `path`, creating parent directories as needed.
    ///
    /// The JSON is staged in a temporary file next to `path` and renamed into
    /// place, so a failed write never leaves a truncated artifact behind.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> MetadmResult<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(self.to_json_pretty()?.as_bytes())?;
        staged.persist(path).map_err(|e| MetadmError::Io(e.error))?;
        info!(path = %path.display(), public = %self.output.public, "wrote test vector");
        Ok(())
    }
}
