use crate::audit::AuditLogger;
use crate::provider::DispatchGateway;
use crate::session::SessionStore;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live session tokens
    pub sessions: SessionStore,

    /// Compliance audit trail
    pub audit: AuditLogger,

    /// Provider dispatch
    pub gateway: DispatchGateway,

    /// Service name reported by the health check
    pub service_name: String,
}

impl AppState {
    pub fn new(
        sessions: SessionStore,
        audit: AuditLogger,
        gateway: DispatchGateway,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            audit,
            gateway,
            service_name: service_name.into(),
        }
    }
}
