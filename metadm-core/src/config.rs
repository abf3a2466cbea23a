#![forbid(unsafe_code)]

//! Vector generation settings. Parses a TOML file into a strongly-typed structure; every
//! field is optional and falls back to the defaults used for the published vectors.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::MetadmError;

/// Settings for a harness run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Logging verbosity (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,

    /// Directory the artifact is written to.
    pub output_dir: PathBuf,

    /// Artifact file name inside `output_dir`.
    pub file_name: String,

    /// Free-text `description` field of the artifact.
    pub description: String,

    /// Number of random seed/nonce pairs checked before emitting the artifact.
    pub random_rounds: usize,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            output_dir: PathBuf::from("vectors"),
            file_name: "01_derive.json".to_string(),
            description: "calculate a curve25519 keypair from a seed and nonce".to_string(),
            random_rounds: 16,
        }
    }
}

impl VectorConfig {
    /// Load a configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::MetadmResult<Self> {
        let data = fs::read_to_string(&path).map_err(MetadmError::from)?;
        let cfg = Self::from_toml_str(&data)?;
        debug!(
            path = %path.as_ref().display(),
            rounds = cfg.random_rounds,
            "loaded vector config"
        );
        Ok(cfg)
    }

    pub fn from_toml_str(data: &str) -> crate::MetadmResult<Self> {
        toml::from_str::<VectorConfig>(data).map_err(MetadmError::ConfigParse)
    }

    /// Full path of the artifact.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}
