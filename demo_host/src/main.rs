//! Demo host
//!
//! Stands in for a host application running one script for a fixed number
//! of frames. The script keeps a context alive by drawing into it every
//! frame, attaches a font and a filter to it, and leaves a scratch filter
//! behind early on so the log shows it being collected.
//!
//! Usage: `demo_host [config.toml|config.ron]`

use scriptui::prelude::*;
use scriptui::ui::Context;
use thiserror::Error;

/// Frames the demo runs before quitting
const DEMO_FRAMES: u32 = 120;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] scriptui::core::ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Counts its own executions in the `count` variable
struct CounterRuntime;

impl ProgramRuntime for CounterRuntime {
    fn execute(&mut self, _code: &str, state: &mut ProgramState) -> Result<(), String> {
        let count = state.number("count").unwrap_or(0.0);
        if state.set_number("count", count + 1.0) {
            Ok(())
        } else {
            Err("count is not writable".to_string())
        }
    }
}

struct DemoScript {
    ctx: Handle,
    filter: Handle,
    counter: Handle,
    clipper: Handle,
    scratch: Handle,
    frames: u32,
}

impl DemoScript {
    fn new() -> Self {
        Self {
            ctx: Handle::NULL,
            filter: Handle::NULL,
            counter: Handle::NULL,
            clipper: Handle::NULL,
            scratch: Handle::NULL,
            frames: 0,
        }
    }
}

impl Application for DemoScript {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing demo script...");
        let api = engine.api_mut();

        self.ctx = api.create_context("Demo script", ContextFlags::NO_SAVED_SETTINGS)?;
        let font = api.create_font("sans-serif", 14, FontFlags::BOLD.bits())?;
        api.attach(self.ctx, font)?;

        self.filter = api.create_text_filter("frame,-skip")?;
        api.attach(self.ctx, self.filter)?;

        self.counter = api.create_function("count += 1;")?;
        api.attach(self.ctx, self.counter)?;

        self.clipper = api.create_list_clipper(self.ctx)?;
        self.scratch = api.create_text_filter("")?;

        log::info!("Demo script ready: {} resources", api.resources().len());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frames += 1;
        let api = engine.api_mut();

        let label = format!("frame {}", self.frames);
        let foreground = api.get_foreground_draw_list(self.ctx)?;
        if api.text_filter_pass_filter(self.filter, &label)? {
            api.draw_list_add_text(foreground, Vec2::new(10.0, 10.0), pack_color(1.0, 1.0, 1.0, 1.0), &label)?;
        }

        let main = api.get_main_viewport(self.ctx)?;
        let center = api.viewport_get_center(main)?;
        let window = api.get_window_draw_list(self.ctx)?;
        api.draw_list_add_rect(
            window,
            center - Vec2::new(50.0, 50.0),
            center + Vec2::new(50.0, 50.0),
            pack_color(0.2, 0.6, 1.0, 1.0),
            4.0,
            1.0,
        )?;

        api.list_clipper_begin(self.clipper, 10_000, 18.0)?;
        while api.list_clipper_step(self.clipper)? {
            let (start, end) = api.list_clipper_get_display_range(self.clipper)?;
            log::trace!("Submitting rows {}..{}", start, end);
        }
        api.list_clipper_end(self.clipper)?;

        api.function_execute(self.counter, &mut CounterRuntime)?;

        if self.frames == 10 && !api.validate_ptr(self.scratch, "UI_TextFilter") {
            log::info!("Scratch filter {} was collected after going unused", self.scratch);
        }

        if self.frames >= DEMO_FRAMES {
            engine.quit();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let api = engine.api_mut();
        match api.function_get_value(self.counter, "count") {
            Ok(count) => log::info!("Counter program ran {} times", count),
            Err(e) => log::warn!("Counter program unavailable: {}", e),
        }
        log::info!(
            "Context valid at cleanup: {}, {} resources alive",
            api.is_valid::<Context>(self.ctx),
            api.resources().len()
        );
    }
}

fn main() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(&path)?,
        None => ApplicationConfig::default(),
    };

    env_logger::Builder::new()
        .parse_filters(&config.engine.log_level)
        .init();

    log::info!("Starting scriptui demo host");
    let mut script = DemoScript::new();
    Engine::run(config, &mut script)?;
    log::info!("Demo host finished after {} frames", script.frames);
    Ok(())
}
