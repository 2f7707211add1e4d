//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::resource::ResourceError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive scripts against the engine. The engine
/// calls [`Application::update`] once per frame and runs idle collection
/// right after it, so anything the application stops using in `update` is
/// collected within the configured keep-alive window.
pub trait Application {
    /// Called once before the first frame
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Called every frame
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Called once after the last frame, before outstanding resources are
    /// destroyed
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A boundary call failed
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
