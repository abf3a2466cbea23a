#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::VectorConfig;
pub use error::{MetadmError, MetadmResult};
pub use logging::init_tracing;
