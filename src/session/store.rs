use super::config::SessionConfig;
use super::record::SessionRecord;
use crate::audit::{hash_sensitive_data, AuditEventType, AuditLogger};
use crate::audit_details;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

/// Random bytes behind each token (256 bits)
const TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random, URL-safe session token
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Process-wide map of session token → session metadata.
///
/// Cheap to clone; clones share the same map. Each operation takes the lock
/// once and releases it before returning, so callers never hold it across
/// provider calls.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    config: SessionConfig,
    audit: AuditLogger,
}

impl SessionStore {
    pub fn new(config: SessionConfig, audit: AuditLogger) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
            audit,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a new session and return its token
    pub async fn create(&self) -> String {
        let now = Utc::now();
        let token = {
            let mut sessions = self.sessions.write().await;
            let mut token = generate_session_token();
            while sessions.contains_key(&token) {
                token = generate_session_token();
            }
            sessions.insert(token.clone(), SessionRecord::new(now));
            token
        };

        info!("Session created");
        self.audit.record(
            AuditEventType::SessionCreated,
            audit_details! { "session_token_hash" => hash_sensitive_data(&token) },
            None,
        );

        token
    }

    /// Refresh `last_active_at` for a live session.
    ///
    /// Returns false, without creating anything, when the token is unknown.
    pub async fn touch(&self, token: &str) -> bool {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let Some(record) = sessions.get_mut(token) else {
            return false;
        };
        if self.expired(record, now) {
            return false;
        }

        record.last_active_at = now;
        true
    }

    /// Whether `token` identifies a live session. Never mutates.
    pub async fn is_valid(&self, token: &str) -> bool {
        let now = Utc::now();
        let sessions = self.sessions.read().await;

        sessions
            .get(token)
            .map(|record| !self.expired(record, now))
            .unwrap_or(false)
    }

    /// Snapshot of a session's metadata
    pub async fn get(&self, token: &str) -> Option<SessionRecord> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Remove a session. Returns whether it existed.
    pub async fn destroy(&self, token: &str) -> bool {
        let removed = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(token).is_some()
        };

        if removed {
            info!("Session destroyed");
            self.audit.record(
                AuditEventType::SessionDestroyed,
                audit_details! { "session_token_hash" => hash_sensitive_data(token) },
                None,
            );
        }

        removed
    }

    /// Drop every session older than the TTL. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let ttl_secs = self.config.ttl_secs;

        let expired: Vec<String> = {
            let mut sessions = self.sessions.write().await;
            let expired: Vec<String> = sessions
                .iter()
                .filter(|(_, record)| record.is_expired(now, ttl_secs))
                .map(|(token, _)| token.clone())
                .collect();
            for token in &expired {
                sessions.remove(token);
            }
            expired
        };

        for token in &expired {
            self.audit.record(
                AuditEventType::SessionExpired,
                audit_details! {
                    "session_token_hash" => hash_sensitive_data(token),
                    "ttl_secs" => ttl_secs,
                },
                None,
            );
        }

        expired.len()
    }

    /// Number of sessions currently held
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn expired(&self, record: &SessionRecord, now: chrono::DateTime<Utc>) -> bool {
        self.config.enforce_expiry && record.is_expired(now, self.config.ttl_secs)
    }

    #[cfg(test)]
    pub(crate) async fn backdate(&self, token: &str, secs: i64) {
        let mut sessions = self.sessions.write().await;
        if let Some(record) = sessions.get_mut(token) {
            record.created_at -= chrono::Duration::seconds(secs);
        }
    }
}

/// Spawn the periodic expiry sweep.
///
/// Returns `None` when expiry is not enforced.
pub fn spawn_expiry_sweeper(store: SessionStore) -> Option<JoinHandle<()>> {
    if !store.config.enforce_expiry {
        return None;
    }

    let period = store.config.sweep_interval();
    info!("Session expiry sweeper running every {:?}", period);

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                info!("Purged {} expired sessions", purged);
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditSink;

    fn store_with(config: SessionConfig) -> (SessionStore, MemoryAuditSink) {
        let (audit, sink) = AuditLogger::in_memory();
        (SessionStore::new(config, audit), sink)
    }

    #[test]
    fn test_token_is_url_safe_and_long() {
        let token = generate_session_token();
        assert_eq!(token.len(), 43, "32 bytes base64url without padding");
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[tokio::test]
    async fn test_create_audits_hash_not_token() {
        let (store, sink) = store_with(SessionConfig::default());
        let token = store.create().await;

        let events = sink.events_of(AuditEventType::SessionCreated);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].detail("session_token_hash").and_then(|v| v.as_str()),
            Some(hash_sensitive_data(&token).as_str())
        );
        let line = serde_json::to_string(&events[0]).unwrap();
        assert!(!line.contains(&token));
    }

    #[tokio::test]
    async fn test_touch_updates_last_active() {
        let (store, _sink) = store_with(SessionConfig::default());
        let token = store.create().await;
        let before = store.get(&token).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(store.touch(&token).await);

        let after = store.get(&token).await.unwrap();
        assert_eq!(after.created_at, before.created_at);
        assert!(after.last_active_at > before.last_active_at);
    }

    #[tokio::test]
    async fn test_advisory_ttl_keeps_old_sessions_valid() {
        let (store, _sink) = store_with(SessionConfig::default());
        let token = store.create().await;
        store.backdate(&token, 7200).await;

        assert!(store.is_valid(&token).await);
        assert!(store.touch(&token).await);
    }

    #[tokio::test]
    async fn test_enforced_ttl_rejects_and_purges_old_sessions() {
        let (store, sink) = store_with(SessionConfig {
            enforce_expiry: true,
            ..SessionConfig::default()
        });
        let old = store.create().await;
        let fresh = store.create().await;
        store.backdate(&old, 3601).await;

        assert!(!store.is_valid(&old).await);
        assert!(!store.touch(&old).await);
        assert!(store.is_valid(&fresh).await);

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(sink.events_of(AuditEventType::SessionExpired).len(), 1);
    }

    #[tokio::test]
    async fn test_sweeper_only_runs_when_enforced() {
        let (store, _sink) = store_with(SessionConfig::default());
        assert!(spawn_expiry_sweeper(store).is_none());

        let (store, _sink) = store_with(SessionConfig {
            enforce_expiry: true,
            ..SessionConfig::default()
        });
        let handle = spawn_expiry_sweeper(store).expect("sweeper should start");
        handle.abort();
    }
}
