#![forbid(unsafe_code)]

//! Tracing bootstrap shared by the harness and its tests.

use tracing_subscriber::EnvFilter;

use crate::VectorConfig;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to the configured level.
///
/// Returns `false` when a global subscriber was already installed; repeated calls are harmless.
pub fn init_tracing(config: &VectorConfig) -> bool {
    let level = config.log_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let cfg = VectorConfig::default();
        let _ = init_tracing(&cfg);
        assert!(!init_tracing(&cfg));
    }
}
