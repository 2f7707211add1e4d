//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with an explicit filter string
///
/// The filter uses `env_logger` syntax (`"info"`, `"scriptui=trace"`, ...).
/// Fails if a logger was already installed, which happens when a host
/// reloads the plugin without restarting the process.
pub fn init_with_level(filter: &str) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new().parse_filters(filter).try_init()
}
