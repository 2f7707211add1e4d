//! # Core Engine Module
//!
//! Shared configuration types used by the resource registry, the boundary
//! layer and the engine frame loop.

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::resource;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    ResourceConfig,
    Config,
    ConfigError,
};
