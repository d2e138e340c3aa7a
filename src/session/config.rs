use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session lifetime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Advertised session lifetime in seconds
    /// Default: 3600 (1 hour)
    pub ttl_secs: u64,

    /// Treat sessions older than the TTL as gone.
    /// Off by default: the TTL is only a hint returned to clients.
    pub enforce_expiry: bool,

    /// How often expired sessions are swept when expiry is enforced
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            enforce_expiry: false,
            sweep_interval_secs: 60,
        }
    }
}
