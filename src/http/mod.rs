//! HTTP API for the transcription frontend
//!
//! This module provides a JSON API under `/api`:
//! - GET /api/health - Health check
//! - POST /api/session/create - Issue a session token
//! - POST /api/session/validate - Check a session token
//! - POST /api/session/destroy - Revoke a session token
//! - POST /api/transcribe - Run a transcription through an AI provider

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{
    CreateSessionResponse, DestroySessionResponse, HealthResponse, SessionTokenRequest,
    TranscribeRequest, TranscribeResponse, ValidateSessionResponse, DEFAULT_PROVIDER,
};
pub use routes::create_router;
pub use state::AppState;
