//! Console logging bootstrap.
//!
//! The crate logs through the `log` facade. `init_logging` installs a logger
//! that forwards records to the browser console on wasm32 and to stderr on
//! native targets. A logger installed earlier by the host is left in place.
//!
//! Initialization is idempotent and never panics.

use log::{LevelFilter, Log, Metadata, Record};

pub const DEFAULT_LOG_LEVEL: &str = "info";

struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        write_console(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: log::Level, line: &str) {
    use web_sys::console;

    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        log::Level::Error => console::error_1(&value),
        log::Level::Warn => console::warn_1(&value),
        log::Level::Info => console::info_1(&value),
        log::Level::Debug | log::Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: log::Level, line: &str) {
    eprintln!("{line}");
}

/// Parses a level name such as `"warn"` or `"DEBUG"`.
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("unsupported log level `{}`", level.trim()))
}

/// Installs the console logger and applies `level`.
///
/// Calling this again only changes the level.
pub fn init_logging(level: &str) -> Result<(), String> {
    let filter = parse_level(level)?;

    // Err means a logger is already installed; keep it.
    let _ = log::set_logger(&CONSOLE_LOGGER);

    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_any_case() {
        assert_eq!(parse_level("warn"), Ok(LevelFilter::Warn));
        assert_eq!(parse_level(" DEBUG "), Ok(LevelFilter::Debug));
        assert_eq!(parse_level("off"), Ok(LevelFilter::Off));
    }

    #[test]
    fn parse_level_rejects_unknown_names() {
        let err = parse_level("loud").unwrap_err();
        assert!(err.contains("loud"));
    }
}
