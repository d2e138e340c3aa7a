use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Scalar key/value pairs attached to an audit event
pub type AuditDetails = Map<String, Value>;

/// Kind of security-relevant action being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    SessionCreated,
    SessionDestroyed,
    SessionExpired,
    TranscriptionProcessed,
    UnauthorizedAccess,
    Error,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionCreated => "SESSION_CREATED",
            Self::SessionDestroyed => "SESSION_DESTROYED",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::TranscriptionProcessed => "TRANSCRIPTION_PROCESSED",
            Self::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event identifier
    pub id: Uuid,

    /// When the event was recorded (UTC)
    pub timestamp: DateTime<Utc>,

    /// What happened
    #[serde(rename = "event")]
    pub event_type: AuditEventType,

    /// Hashed session token, if the action was tied to a session
    #[serde(rename = "session_id")]
    pub session_ref: Option<String>,

    /// Redacted event details
    pub details: AuditDetails,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        details: AuditDetails,
        session_ref: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            session_ref,
            details,
        }
    }

    /// Look up a detail value by key
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}
