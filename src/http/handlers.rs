use super::error::ApiError;
use super::state::AppState;
use crate::audit::{hash_sensitive_data, redacted_text, AuditEventType};
use crate::audit_details;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Provider used when a transcription request names none
pub const DEFAULT_PROVIDER: &str = "openai";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,

    /// Sessions currently held in memory
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_token: String,

    /// Advertised lifetime in seconds
    pub expires_in: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionTokenRequest {
    pub session_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    pub session_token: Option<String>,

    /// Free-text medical transcription (never logged)
    pub transcription: Option<String>,

    /// Provider key: "openai", "anthropic" or "groq"
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub success: bool,
    pub response: String,
    pub model: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateSessionResponse {
    pub valid: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestroySessionResponse {
    pub success: bool,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse a `{session_token}` body whatever its Content-Type.
///
/// An empty body is an absent token.
fn parse_token_body(body: &[u8]) -> Result<SessionTokenRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SessionTokenRequest::default());
    }
    serde_json::from_slice(body)
}

/// Token from an optional body; empty strings count as absent
fn presented_token(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: state.service_name.clone(),
            timestamp: now_rfc3339(),
            active_sessions: state.sessions.len().await,
        }),
    )
}

/// POST /api/session/create
/// Issue a new session token
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_token = state.sessions.create().await;

    (
        StatusCode::OK,
        Json(CreateSessionResponse {
            session_token,
            expires_in: state.sessions.config().ttl_secs,
        }),
    )
}

/// POST /api/transcribe
/// Run a transcription through the selected AI provider
pub async fn process_transcription(
    State(state): State<AppState>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected transcription request: {}", rejection);
            state.audit.record(
                AuditEventType::Error,
                audit_details! { "error" => "Malformed request body" },
                None,
            );
            return Err(ApiError::MalformedRequest("Malformed request".to_string()));
        }
    };

    // Validate and touch the session before any provider work
    let token = presented_token(req.session_token.as_deref());
    let authorized = match token {
        Some(token) => state.sessions.touch(token).await,
        None => false,
    };
    let Some(token) = token.filter(|_| authorized) else {
        warn!("Unauthorized transcription request");
        state.audit.record(
            AuditEventType::UnauthorizedAccess,
            audit_details! { "reason" => "Invalid session token" },
            None,
        );
        return Err(ApiError::Unauthorized);
    };
    let session_ref = hash_sensitive_data(token);

    let Some(transcription) = req.transcription else {
        let message = "Missing required field: transcription";
        state.audit.record(
            AuditEventType::Error,
            audit_details! { "error" => message },
            Some(session_ref),
        );
        return Err(ApiError::MalformedRequest(message.to_string()));
    };
    let model = req.model.unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let mut details = audit_details! { "model" => model.as_str() };
    details.extend(redacted_text("transcription", &transcription));
    state.audit.record(
        AuditEventType::TranscriptionProcessed,
        details,
        Some(session_ref.clone()),
    );

    let response = match state.gateway.dispatch(&transcription, &model).await {
        Ok(response) => response,
        Err(e) => {
            state.audit.record(
                AuditEventType::Error,
                audit_details! { "error" => e.to_string() },
                Some(session_ref),
            );
            return Err(e.into());
        }
    };

    Ok(Json(TranscribeResponse {
        success: true,
        response,
        model,
        timestamp: now_rfc3339(),
    }))
}

/// POST /api/session/validate
/// Check whether a session token is still active
pub async fn validate_session(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let req = parse_token_body(&body).unwrap_or_else(|e| {
        warn!("Unparseable session validation body: {}", e);
        SessionTokenRequest::default()
    });

    let valid = match presented_token(req.session_token.as_deref()) {
        Some(token) => state.sessions.is_valid(token).await,
        None => false,
    };

    (
        StatusCode::OK,
        Json(ValidateSessionResponse {
            valid,
            timestamp: now_rfc3339(),
        }),
    )
}

/// POST /api/session/destroy
/// Revoke a session token (idempotent)
pub async fn destroy_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DestroySessionResponse>, ApiError> {
    let req = match parse_token_body(&body) {
        Ok(req) => req,
        Err(e) => {
            // Success is only reported once a presented token is revoked
            warn!("Rejected session destroy request: {}", e);
            state.audit.record(
                AuditEventType::Error,
                audit_details! { "error" => "Malformed request body" },
                None,
            );
            return Err(ApiError::MalformedRequest("Malformed request".to_string()));
        }
    };

    if let Some(token) = presented_token(req.session_token.as_deref()) {
        state.sessions.destroy(token).await;
    }

    Ok(Json(DestroySessionResponse { success: true }))
}
