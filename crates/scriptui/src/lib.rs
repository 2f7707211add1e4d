//! # scriptui
//!
//! Handle-based lifetime management for UI engine objects exposed to
//! untyped script callers.
//!
//! Scripts receive plain numbers in place of references. Every call
//! validates its handles (liveness, generation and kind) before touching
//! the object behind them, and objects a script stops using are collected
//! after a few frames without the script ever releasing them.
//!
//! ## Features
//!
//! - **Generational Handles**: Stale and wrong-kind handles are rejected
//! - **Idle Collection**: Resources live while used, plus a short window
//! - **Attachment**: Fonts, filters and programs can share a context's lifetime
//! - **Proxy Handles**: Viewports and draw lists addressed through their context
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scriptui::prelude::*;
//!
//! struct MyScript {
//!     ctx: Handle,
//! }
//!
//! impl Application for MyScript {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         self.ctx = engine.api_mut().create_context("My script", ContextFlags::empty())?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         let api = engine.api_mut();
//!         let list = api.get_foreground_draw_list(self.ctx)?;
//!         api.draw_list_add_text(list, Vec2::new(10.0, 10.0), 0xFFFF_FFFF, "hello")?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut script = MyScript { ctx: Handle::NULL };
//!     Engine::run(ApplicationConfig::default(), &mut script)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

pub mod api;
pub mod resource;
pub mod ui;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        api::Api,
        core::config::{ApplicationConfig, Config, EngineConfig, ResourceConfig},
        foundation::math::{pack_color, Color, Vec2},
        resource::{Handle, ResourceError},
        ui::{ContextFlags, FontFlags, ProgramRuntime, ProgramState},
        AppError, Application, Engine, EngineError,
    };
}
