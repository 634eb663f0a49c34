use crate::domains::logger::{DomainLogger, DynLogger, Severity};
use std::sync::Arc;

/// Prints to stdout/stderr, dropping anything below `threshold`.
pub struct ConsoleLogger {
    threshold: Severity,
}

impl ConsoleLogger {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    fn emit(&self, severity: Severity, msg: &str) {
        if severity < self.threshold {
            return;
        }
        match severity {
            Severity::Info => println!("{}", msg),
            Severity::Warn => println!("WARN: {}", msg),
            Severity::Error => eprintln!("ERROR: {}", msg),
        }
    }
}

impl DomainLogger for ConsoleLogger {
    fn info(&self, msg: &str) { self.emit(Severity::Info, msg); }
    fn warn(&self, msg: &str) { self.emit(Severity::Warn, msg); }
    fn error(&self, msg: &str) { self.emit(Severity::Error, msg); }
}

struct Discard;

impl DomainLogger for Discard {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Console logger honouring a configured level name such as `"warn"`.
pub fn init_console_logger(level: &str) -> DynLogger {
    Arc::new(ConsoleLogger::new(Severity::from_level_name(level)))
}

/// Swallows everything; the usual choice in tests.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(Discard)
}
