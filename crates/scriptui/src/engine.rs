//! Core engine implementation
//!
//! The engine owns the script boundary and drives it one frame at a time:
//! the application runs, contexts finish their frame, and the registry's
//! heartbeat collects whatever went unused.

use crate::api::Api;
use crate::application::Application;
use crate::core::config::{ApplicationConfig, ConfigError};
use crate::foundation::logging;
use crate::foundation::time::FrameClock;
use crate::resource::{HeartbeatReport, ResourceError};
use crate::ui::Context;
use thiserror::Error;

/// Main engine struct
pub struct Engine {
    /// Boundary every script call goes through
    api: Api,

    /// Frame timing
    clock: FrameClock,

    /// Engine configuration
    config: ApplicationConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: ApplicationConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        Ok(Self {
            api: Api::new(config.resources.clone()),
            clock: FrameClock::new(),
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: ApplicationConfig, app: &mut T) -> Result<(), EngineError> {
        if let Err(e) = logging::init_with_level(&config.engine.log_level) {
            log::debug!("Keeping existing logger: {}", e);
        }

        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            let delta_time = engine.clock.delta_time();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            engine.frame();
        }

        app.cleanup(&mut engine);
        engine.shutdown();

        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// Finish the current frame and run idle collection
    pub fn frame(&mut self) -> HeartbeatReport {
        let frame = self.clock.tick();
        self.api
            .resources_mut()
            .for_each_mut::<Context>(|_, context| context.end_frame());

        let report = self.api.heartbeat();
        if report.destroyed > 0 {
            log::debug!(
                "Frame {}: collected {} resources ({} expired, {} invalid), {} alive",
                frame,
                report.destroyed,
                report.expired,
                report.invalidated,
                report.live
            );
        }
        if self.config.engine.debug_mode && frame % 600 == 0 {
            log::debug!("Frame {}: {:.1} fps average", frame, self.clock.average_fps());
        }
        report
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop and destroy every outstanding resource. Returns how many were
    /// destroyed; calling it again returns zero.
    pub fn shutdown(&mut self) -> usize {
        self.running = false;
        let destroyed = self.api.destroy_all();
        if destroyed > 0 {
            log::info!("Destroyed {} resources still alive at shutdown", destroyed);
        }
        destroyed
    }

    /// Script boundary
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Mutable script boundary
    pub fn api_mut(&mut self) -> &mut Api {
        &mut self.api
    }

    /// Engine configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame()
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource registry error
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
