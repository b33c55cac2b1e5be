use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Initialize the global logger: terminal output plus an optional log file, both at `level`.
///
/// Can be called once per process; later calls report that a logger is already set.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<(), String> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    // File logger
    if let Some(filename) = log_file {
        let file = File::create(filename)
            .map_err(|e| format!("cannot create log file {}: {}", filename.display(), e))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    CombinedLogger::init(loggers).map_err(|e| e.to_string())
}

/// Parses "off", "error", "warn", "info", "debug" or "trace" (any case).
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse::<LevelFilter>().ok()
}
