//! # Unified Configuration System
//!
//! All configuration structures live here so hosts can ship a single file
//! (TOML or RON) describing logging and resource collection behavior.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging and debug features
//! - **Resource Config**: Idle collection window and registry limits

use serde::{Serialize, Deserialize};

// Re-export from the config module for compatibility
pub use crate::config::{Config, ConfigError};

/// Default number of heartbeats a resource survives without being used
pub const DEFAULT_KEEP_ALIVE_FRAMES: u32 = 2;

/// Default number of cells in a callback program's memory
pub const DEFAULT_FUNCTION_MEMORY: usize = 1024;

/// # Resource Configuration
///
/// Controls idle collection and registry limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Heartbeats a resource may go without use before it is collected.
    ///
    /// Two frames tolerate a single skipped frame without collecting
    /// something the script still uses.
    pub keep_alive_frames: u32,
    /// Maximum number of live resources (0 = unlimited)
    pub max_resources: usize,
    /// Number of memory cells allocated to each callback program
    pub function_memory: usize,
}

impl ResourceConfig {
    /// Create a resource configuration with defaults
    pub fn new() -> Self {
        Self {
            keep_alive_frames: DEFAULT_KEEP_ALIVE_FRAMES,
            max_resources: 0,
            function_memory: DEFAULT_FUNCTION_MEMORY,
        }
    }

    /// Set the idle collection window in heartbeats
    pub fn with_keep_alive_frames(mut self, frames: u32) -> Self {
        self.keep_alive_frames = frames;
        self
    }

    /// Limit the number of live resources
    pub fn with_max_resources(mut self, max: usize) -> Self {
        self.max_resources = max;
        self
    }

    /// Set the memory size of callback programs
    pub fn with_function_memory(mut self, cells: usize) -> Self {
        self.function_memory = cells;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keep_alive_frames == 0 {
            return Err(ConfigError::Invalid(
                "keep_alive_frames must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Core engine behavior: logging and debug features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter for the engine (`env_logger` syntax)
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Resource registry configuration
    pub resources: ResourceConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resources.validate()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resources.keep_alive_frames, DEFAULT_KEEP_ALIVE_FRAMES);
        assert_eq!(config.engine.log_level, "info");
    }

    #[test]
    fn test_zero_keep_alive_rejected() {
        let config = ResourceConfig::default().with_keep_alive_frames(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_partial_config_uses_defaults() {
        let text = "[resources]\nkeep_alive_frames = 5\n";
        let config = ApplicationConfig::from_str_with_format(text, "host.toml").unwrap();
        assert_eq!(config.resources.keep_alive_frames, 5);
        assert_eq!(config.resources.function_memory, DEFAULT_FUNCTION_MEMORY);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_log_level("scriptui=trace"),
            resources: ResourceConfig::new().with_max_resources(64),
        };
        let text = config.to_string_with_format("host.ron").unwrap();
        let parsed = ApplicationConfig::from_str_with_format(&text, "host.ron").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::from_str_with_format("", "host.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("scriptui_config_{}.toml", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        let config = ApplicationConfig {
            resources: ResourceConfig::new().with_keep_alive_frames(3),
            ..Default::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
