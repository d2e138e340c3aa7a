use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata tracked for one live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// Last successful authenticated operation
    pub last_active_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            last_active_at: now,
        }
    }

    /// Whether the session is older than `ttl_secs` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl_secs: u64) -> bool {
        let age = now.signed_duration_since(self.created_at);
        age.num_seconds() > i64::try_from(ttl_secs).unwrap_or(i64::MAX)
    }
}
