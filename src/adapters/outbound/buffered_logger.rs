use crate::domains::logger::{DomainLogger, DynLogger, Severity};
use std::sync::Arc;
use tokio::sync::mpsc;

struct Queued {
    severity: Severity,
    msg: String,
}

struct BufferedLogger {
    sender: mpsc::Sender<Queued>,
}

impl BufferedLogger {
    fn push(&self, severity: Severity, msg: &str) {
        // drop on full rather than block the planner
        let _ = self.sender.try_send(Queued { severity, msg: msg.to_string() });
    }
}

impl DomainLogger for BufferedLogger {
    fn info(&self, msg: &str) {
        self.push(Severity::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Severity::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Severity::Error, msg);
    }
}

/// Non-blocking logger that forwards to `bridge` from a background task.
/// Must be called inside a tokio runtime; `capacity` bounds the queue.
pub fn init_buffered_logger(bridge: DynLogger, capacity: usize) -> DynLogger {
    let (tx, mut rx) = mpsc::channel::<Queued>(capacity);

    tokio::spawn(async move {
        while let Some(queued) = rx.recv().await {
            bridge.log(queued.severity, &queued.msg);
        }
    });

    Arc::new(BufferedLogger { sender: tx })
}
