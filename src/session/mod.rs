//! In-memory session tokens
//!
//! This module provides the `SessionStore` that manages:
//! - Opaque bearer tokens generated from OS randomness
//! - Creation and last-activity timestamps per token
//! - Optional TTL enforcement with a periodic sweeper
//! - Audit events for every lifecycle change

mod config;
mod record;
mod store;

pub use config::SessionConfig;
pub use record::SessionRecord;
pub use store::{generate_session_token, spawn_expiry_sweeper, SessionStore};
