//! Compliance audit trail
//!
//! Every security-relevant action (session lifecycle, authorization failures,
//! processed transcriptions, request errors) is written as one JSON line to an
//! append-only sink and mirrored onto the `audit` tracing target.
//!
//! Free text and secrets never reach the sink in clear: see [`redact`].

mod event;
mod logger;
pub mod redact;

pub use event::{AuditDetails, AuditEvent, AuditEventType};
pub use logger::{AuditLogger, AuditSink, FileAuditSink, MemoryAuditSink};
pub use redact::{hash_sensitive_data, redacted_text};
