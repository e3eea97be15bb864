//! Request and response DTOs for the gateway API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::SessionState;

// --- Health ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub channel: &'static str,
}

// --- Sessions ---

#[derive(Debug, Serialize, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub session_id: String,
    /// `null` when the session has no stored context.
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl SummaryResponse {
    pub fn from_state(session_id: String, state: Option<SessionState>) -> Self {
        match state {
            Some(state) => Self {
                session_id,
                summary: Some(state.summary),
                last_updated: Some(state.last_updated.to_rfc3339()),
            },
            None => Self {
                session_id,
                summary: None,
                last_updated: None,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppendRequest {
    /// Missing text re-applies the length bound without adding anything.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetSummaryRequest {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TurnRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetSessionRequest {
    #[serde(rename = "sessionId", alias = "session_id", default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetSessionResponse {
    pub ok: bool,
    /// Whether a stored summary existed before the reset.
    pub removed: bool,
}

// --- Prompt ---

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptRequest {
    pub question: String,
    #[serde(default)]
    pub constitution: String,
    #[serde(default)]
    pub principles: Vec<String>,
    #[serde(default)]
    pub legal_focus: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
    /// Whether a rolling summary was folded into the prompt.
    pub has_context: bool,
}

// --- Gateway status ---

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayStatusResponse {
    pub active_sessions: usize,
    pub uptime_secs: u64,
}
