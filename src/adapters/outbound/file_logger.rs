use crate::domains::logger::{DomainLogger, DynLogger, Severity};
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;

/// Writes through the `log` facade into a fast_log file appender.
pub struct FileLogger;

impl FileLogger {
    /// Install fast_log as the process-wide `log` backend writing to `path`.
    /// Unknown level names fall back to `info`. Only the first install in a process wins.
    pub fn install(path: &str, level: &str) -> Result<Self, String> {
        let filter = log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info);
        fast_log::init(fast_log::config::Config::new().file(path).level(filter))
            .map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
        Ok(Self)
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log::info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Sends every message to each of `sinks` in order.
pub struct FanOutLogger {
    sinks: Vec<DynLogger>,
}

impl FanOutLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }

    fn each(&self, severity: Severity, msg: &str) {
        for sink in &self.sinks {
            sink.log(severity, msg);
        }
    }
}

impl DomainLogger for FanOutLogger {
    fn info(&self, msg: &str) { self.each(Severity::Info, msg); }
    fn warn(&self, msg: &str) { self.each(Severity::Warn, msg); }
    fn error(&self, msg: &str) { self.each(Severity::Error, msg); }
}

/// Log file plus console. Falls back to the console alone when the file
/// appender cannot be installed, and says so there.
pub fn init_combined_logger(path: &str, level: &str) -> DynLogger {
    let console = super::init_console_logger(level);
    match FileLogger::install(path, level) {
        Ok(file) => {
            let file: DynLogger = Arc::new(file);
            Arc::new(FanOutLogger::new(vec![file, console]))
        }
        Err(e) => {
            console.warn(&e);
            console
        }
    }
}
