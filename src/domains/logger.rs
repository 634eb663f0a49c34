use std::sync::Arc;

/// Logging port the planning service reports through.
/// Infallible from the caller's side; adapters swallow their own failures.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);

    fn log(&self, severity: Severity, msg: &str) {
        match severity {
            Severity::Info => self.info(msg),
            Severity::Warn => self.warn(msg),
            Severity::Error => self.error(msg),
        }
    }
}

pub type DynLogger = Arc<dyn DomainLogger>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Map a configured level name onto the three port levels. Anything more
    /// verbose than `info` counts as `info`; unknown names do too.
    pub fn from_level_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Severity::Warn,
            "error" | "off" => Severity::Error,
            _ => Severity::Info,
        }
    }
}
