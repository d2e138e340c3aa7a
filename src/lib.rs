pub mod audit;
pub mod config;
pub mod http;
pub mod provider;
pub mod session;

pub use audit::{AuditEvent, AuditEventType, AuditLogger, AuditSink, FileAuditSink, MemoryAuditSink};
pub use config::Config;
pub use http::{create_router, ApiError, AppState};
pub use provider::{
    DispatchError, DispatchGateway, Provider, ProviderCredentials, ProviderError, ProviderKind,
    ProviderRegistry,
};
pub use session::{SessionConfig, SessionRecord, SessionStore};
