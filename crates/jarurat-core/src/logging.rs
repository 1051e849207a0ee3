//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber filtered by `filter`.
///
/// `RUST_LOG`, when set, takes precedence over `filter`. Returns false if a
/// subscriber was already installed, in which case nothing changes.
#[uniffi::export]
pub fn init_logging(filter: String) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_ok()
}
