use super::event::{AuditDetails, AuditEvent, AuditEventType};
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Append-only destination for audit events
pub trait AuditSink: Send + Sync {
    /// Durably append one event
    fn append(&self, event: &AuditEvent) -> std::io::Result<()>;

    /// Sink name for logging
    fn name(&self) -> &str;
}

/// Writes one JSON object per line to a file opened in append mode
pub struct FileAuditSink {
    file: Mutex<File>,
}

impl FileAuditSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open audit log {}", path.display()))?;

        info!("Audit log opened at {}", path.display());

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn append(&self, event: &AuditEvent) -> std::io::Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(&line)?;
        file.flush()
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Keeps events in memory (embedding and tests)
#[derive(Clone, Default)]
pub struct MemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event recorded so far, in append order
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Events of a single type, in append order
    pub fn events_of(&self, event_type: AuditEventType) -> Vec<AuditEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&self, event: &AuditEvent) -> std::io::Result<()> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Records audit events to a sink and to the live `audit` log stream.
///
/// Recording never fails the caller: sink errors are reported through
/// `tracing::error!` and otherwise swallowed.
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Logger backed by an append-only file
    pub fn to_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(FileAuditSink::open(path)?)))
    }

    /// Logger backed by a [`MemoryAuditSink`]; returns the sink for inspection
    pub fn in_memory() -> (Self, MemoryAuditSink) {
        let sink = MemoryAuditSink::new();
        (Self::new(Arc::new(sink.clone())), sink)
    }

    /// Record a security or compliance event.
    ///
    /// `details` must already be redacted; `session_ref` is a hashed token.
    pub fn record(
        &self,
        event_type: AuditEventType,
        details: AuditDetails,
        session_ref: Option<String>,
    ) {
        let event = AuditEvent::new(event_type, details, session_ref);

        if let Err(e) = self.sink.append(&event) {
            error!(
                sink = self.sink.name(),
                event_id = %event.id,
                "Failed to write audit event: {}",
                e
            );
        }

        match serde_json::to_string(&event) {
            Ok(line) => info!(target: "audit", "AUDIT: {}", line),
            Err(e) => error!(event_id = %event.id, "Failed to serialize audit event: {}", e),
        }
    }
}

/// Build [`AuditDetails`] from `key => value` pairs
#[macro_export]
macro_rules! audit_details {
    () => {
        $crate::audit::AuditDetails::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut details = $crate::audit::AuditDetails::new();
        $(details.insert(($key).to_string(), ::serde_json::Value::from($value));)+
        details
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl AuditSink for FailingSink {
        fn append(&self, _event: &AuditEvent) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_memory_sink_keeps_call_order() {
        let (logger, sink) = AuditLogger::in_memory();

        logger.record(AuditEventType::SessionCreated, AuditDetails::new(), None);
        logger.record(AuditEventType::TranscriptionProcessed, AuditDetails::new(), None);
        logger.record(AuditEventType::SessionDestroyed, AuditDetails::new(), None);

        let types: Vec<_> = sink.events().iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![
                AuditEventType::SessionCreated,
                AuditEventType::TranscriptionProcessed,
                AuditEventType::SessionDestroyed,
            ]
        );
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let logger = AuditLogger::new(Arc::new(FailingSink));
        logger.record(AuditEventType::Error, AuditDetails::new(), None);
    }

    #[test]
    fn test_audit_details_macro() {
        let details = crate::audit_details! {
            "model" => "openai",
            "length" => 17usize,
        };
        assert_eq!(details["model"], "openai");
        assert_eq!(details["length"], 17);
    }
}
