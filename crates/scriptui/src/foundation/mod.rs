//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types for viewport and draw list geometry
//! - Generational slot storage for resources
//! - Frame clock driving the resource heartbeat
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
