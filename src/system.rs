// File: ./src/system.rs
// Process-wide setup: file logging and the panic hook.
use crate::context::AppContext;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;

pub const DEBUG_ENV_VAR: &str = "CANVAS_DESK_DEBUG";

fn level_from_env() -> LevelFilter {
    if std::env::var_os(DEBUG_ENV_VAR).is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Sends `log` records to the log file in the data directory.
///
/// The terminal belongs to the TUI, so nothing is logged to stdout. Failing
/// to open the file leaves logging disabled and is not an error.
pub fn init_logging(ctx: &dyn AppContext) {
    let Some(path) = ctx.get_log_path() else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {}", path.display(), e);
            return;
        }
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("canvas_desk")
        .build();
    if WriteLogger::init(level_from_env(), config, file).is_ok() {
        log::info!(
            "canvas-desk v{} starting, logging to {}",
            env!("CARGO_PKG_VERSION"),
            path.display()
        );
    }
}

/// Records panics in the log before handing over to the default hook.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));
}
