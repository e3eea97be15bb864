//! Axum HTTP server for the context gateway.
//!
//! Exposes the session summary store to the chat collaborator: read context
//! before a completion, record turns after it, and reset sessions.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State},
    http::{HeaderValue, StatusCode, header},
    middleware,
    routing::{delete, get, post},
};
use tokio::sync::oneshot;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::channels::web::auth::{AuthState, auth_middleware};
use crate::channels::web::types::*;
use crate::context::SummaryStore;
use crate::error::{ChannelError, ContextStoreError};
use crate::prompt::{self, PromptInputs};

/// Longest accepted session id, in bytes.
pub const MAX_SESSION_ID_LEN: usize = 256;

/// Shared state for all gateway handlers.
pub struct GatewayState {
    /// Session summary store.
    pub store: Arc<dyn SummaryStore>,
    /// Shutdown signal sender.
    pub shutdown_tx: tokio::sync::RwLock<Option<oneshot::Sender<()>>>,
    /// Server startup time for uptime calculation.
    pub startup_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(store: Arc<dyn SummaryStore>) -> Self {
        Self {
            store,
            shutdown_tx: tokio::sync::RwLock::new(None),
            startup_time: std::time::Instant::now(),
        }
    }

    /// Signal the server task to stop accepting connections.
    pub async fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.write().await.take() {
            let _ = tx.send(());
        }
    }
}

/// Validate a caller-supplied session id before it reaches the store.
///
/// Ids are opaque: they are checked, never rewritten.
pub fn validate_session_id(raw: &str) -> Result<String, (StatusCode, String)> {
    if raw.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "sessionId is required".to_string(),
        ));
    }
    if raw.trim() != raw {
        return Err((
            StatusCode::BAD_REQUEST,
            "sessionId must not have leading or trailing whitespace".to_string(),
        ));
    }
    if raw.len() > MAX_SESSION_ID_LEN {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("sessionId must be at most {MAX_SESSION_ID_LEN} bytes"),
        ));
    }
    if raw.chars().any(char::is_control) {
        return Err((
            StatusCode::BAD_REQUEST,
            "sessionId must not contain control characters".to_string(),
        ));
    }
    Ok(raw.to_string())
}

fn store_failure(action: &str, session_id: &str, e: ContextStoreError) -> (StatusCode, String) {
    tracing::error!(session_id, "Failed to {}: {}", action, e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Build the gateway router.
///
/// `addr` is the address the server is bound to; it determines the allowed
/// CORS origins.
pub fn build_router(state: Arc<GatewayState>, auth_token: String, addr: SocketAddr) -> Router {
    // Public routes (no auth)
    let public = Router::new().route("/api/health", get(health_handler));

    // Protected routes (require auth)
    let auth_state = AuthState { token: auth_token };
    let protected = Router::new()
        .route("/api/sessions", post(session_new_handler))
        .route(
            "/api/sessions/{id}/summary",
            get(session_summary_get_handler).put(session_summary_set_handler),
        )
        .route("/api/sessions/{id}/append", post(session_append_handler))
        .route("/api/sessions/{id}/turns", post(session_turn_handler))
        .route("/api/sessions/{id}/prompt", post(session_prompt_handler))
        .route("/api/sessions/{id}", delete(session_delete_handler))
        .route("/api/chat/reset-session", post(chat_reset_session_handler))
        .route("/api/gateway/status", get(gateway_status_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    // CORS: only the bound address and localhost on the same port.
    let origins: Vec<HeaderValue> = [
        format!("http://{}:{}", addr.ip(), addr.port()),
        format!("http://localhost:{}", addr.port()),
    ]
    .into_iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]))
        .allow_credentials(true);

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Returns the actual bound `SocketAddr` (useful when binding to port 0).
pub async fn start_server(
    addr: SocketAddr,
    state: Arc<GatewayState>,
    auth_token: String,
) -> Result<SocketAddr, ChannelError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ChannelError::StartupFailed {
            name: "gateway".to_string(),
            reason: format!("Failed to bind to {}: {}", addr, e),
        })?;
    let bound_addr = listener
        .local_addr()
        .map_err(|e| ChannelError::StartupFailed {
            name: "gateway".to_string(),
            reason: format!("Failed to get local addr: {}", e),
        })?;

    let app = build_router(state.clone(), auth_token, bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    *state.shutdown_tx.write().await = Some(shutdown_tx);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Context gateway shutting down");
            })
            .await
        {
            tracing::error!("Context gateway server error: {}", e);
        }
    });

    Ok(bound_addr)
}

// --- Health ---

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        channel: "gateway",
    })
}

// --- Session handlers ---

async fn session_new_handler() -> (StatusCode, Json<NewSessionResponse>) {
    (
        StatusCode::CREATED,
        Json(NewSessionResponse {
            session_id: Uuid::new_v4(),
        }),
    )
}

async fn session_summary_get_handler(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    let session_id = validate_session_id(&id)?;
    let current = state
        .store
        .get_state(&session_id)
        .await
        .map_err(|e| store_failure("read session summary", &session_id, e))?;

    Ok(Json(SummaryResponse::from_state(session_id, current)))
}

async fn session_summary_set_handler(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Json(body): Json<SetSummaryRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let session_id = validate_session_id(&id)?;
    state
        .store
        .set_summary(&session_id, &body.summary)
        .await
        .map_err(|e| store_failure("set session summary", &session_id, e))?;

    tracing::debug!(
        session_id,
        chars = body.summary.chars().count(),
        "Replaced session summary"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Append text to a session and return the resulting state.
async fn session_append_handler(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Json(body): Json<AppendRequest>,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    let session_id = validate_session_id(&id)?;
    let text = body.text.unwrap_or_default();
    append_and_respond(&state, session_id, &text).await
}

/// Record a completed question/answer turn.
///
/// Turns with an empty answer are not recorded; the current state is
/// returned unchanged.
async fn session_turn_handler(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Json(body): Json<TurnRequest>,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    let session_id = validate_session_id(&id)?;
    if body.question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "question is required".to_string()));
    }

    if body.answer.is_empty() {
        let current = state
            .store
            .get_state(&session_id)
            .await
            .map_err(|e| store_failure("read session summary", &session_id, e))?;
        return Ok(Json(SummaryResponse::from_state(session_id, current)));
    }

    let turn = prompt::format_turn(&body.question, &body.answer);
    append_and_respond(&state, session_id, &turn).await
}

async fn append_and_respond(
    state: &GatewayState,
    session_id: String,
    text: &str,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    let current = state
        .store
        .append_and_compress(&session_id, text)
        .await
        .map_err(|e| store_failure("append to session summary", &session_id, e))?;

    tracing::debug!(
        session_id,
        appended_chars = text.chars().count(),
        "Appended to session summary"
    );
    Ok(Json(SummaryResponse::from_state(session_id, Some(current))))
}

async fn session_prompt_handler(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Json(body): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, (StatusCode, String)> {
    let session_id = validate_session_id(&id)?;
    if body.question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "question is required".to_string()));
    }

    let summary = state
        .store
        .get_summary(&session_id)
        .await
        .map_err(|e| store_failure("read session summary", &session_id, e))?;
    let context = summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(prompt::rolling_context);

    let prompt = prompt::build_prompt(&PromptInputs {
        question: &body.question,
        constitution: &body.constitution,
        principles: &body.principles,
        legal_focus: &body.legal_focus,
        context: context.as_deref(),
    });

    Ok(Json(PromptResponse {
        prompt,
        has_context: context.is_some(),
    }))
}

async fn session_delete_handler(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Result<Json<ResetSessionResponse>, (StatusCode, String)> {
    let session_id = validate_session_id(&id)?;
    reset_session(&state, session_id).await
}

async fn chat_reset_session_handler(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<ResetSessionRequest>,
) -> Result<Json<ResetSessionResponse>, (StatusCode, String)> {
    let session_id = validate_session_id(body.session_id.as_deref().unwrap_or_default())?;
    reset_session(&state, session_id).await
}

async fn reset_session(
    state: &GatewayState,
    session_id: String,
) -> Result<Json<ResetSessionResponse>, (StatusCode, String)> {
    let removed = state
        .store
        .reset_session(&session_id)
        .await
        .map_err(|e| store_failure("reset session", &session_id, e))?;

    tracing::info!(session_id, removed, "Session context reset");
    Ok(Json(ResetSessionResponse { ok: true, removed }))
}

// --- Gateway control plane ---

async fn gateway_status_handler(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<GatewayStatusResponse>, StatusCode> {
    let active_sessions = state.store.session_count().await.map_err(|e| {
        tracing::error!("Failed to count sessions: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(GatewayStatusResponse {
        active_sessions,
        uptime_secs: state.startup_time.elapsed().as_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::context::{InMemorySummaryStore, SessionState};

    const TOKEN: &str = "test-token";

    fn test_state() -> (Arc<GatewayState>, Arc<InMemorySummaryStore>) {
        let store = Arc::new(InMemorySummaryStore::default());
        let state = Arc::new(GatewayState::new(store.clone()));
        (state, store)
    }

    fn test_router(state: Arc<GatewayState>) -> Router {
        build_router(
            state,
            TOKEN.to_string(),
            "127.0.0.1:3030".parse().expect("addr"),
        )
    }

    fn authed(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[test]
    fn validate_session_id_accepts_opaque_ids() {
        assert_eq!(validate_session_id("demo").expect("valid"), "demo");
        assert_eq!(
            validate_session_id("two words").expect("inner space"),
            "two words"
        );
        assert_eq!(
            validate_session_id("c0ffee/42:chat").expect("valid"),
            "c0ffee/42:chat"
        );
    }

    #[test]
    fn validate_session_id_rejects_malformed_ids() {
        let err = validate_session_id("   ").expect_err("blank id");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("required"));

        for padded in [" a", "a ", "\ta"] {
            let err = validate_session_id(padded).expect_err("padded id");
            assert_eq!(err.0, StatusCode::BAD_REQUEST);
            assert!(err.1.contains("whitespace"), "unexpected message: {}", err.1);
        }

        let err = validate_session_id(&"x".repeat(MAX_SESSION_ID_LEN + 1)).expect_err("long id");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = validate_session_id("bad\u{7}id").expect_err("control char");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("control"));
    }

    #[tokio::test]
    async fn health_is_public() {
        let (state, _) = test_state();
        let response = test_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS),
            Some(&HeaderValue::from_static("nosniff"))
        );
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn session_routes_require_token() {
        let (state, _) = test_state();
        let response = test_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/sessions/demo/summary")
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn summary_of_unknown_session_is_null_not_error() {
        let (state, _) = test_state();
        let response = test_router(state)
            .oneshot(authed("GET", "/api/sessions/fresh/summary", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["session_id"], "fresh");
        assert!(body["summary"].is_null());
        assert!(body.get("last_updated").is_none());
    }

    #[tokio::test]
    async fn append_then_read_returns_merged_summary() {
        let (state, store) = test_state();
        let router = test_router(state);

        let response = router
            .clone()
            .oneshot(authed(
                "POST",
                "/api/sessions/sess1/append",
                Some(serde_json::json!({"text": "hello"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(authed(
                "POST",
                "/api/sessions/sess1/append",
                Some(serde_json::json!({"text": "world"})),
            ))
            .await
            .expect("response");
        let body = body_json(response).await;
        assert_eq!(body["summary"], "hello\nworld");
        assert!(body["last_updated"].is_string());
        assert_eq!(store.summary("sess1").as_deref(), Some("hello\nworld"));
    }

    /// Writes go to a real store; reads always miss.
    struct BlindReadStore {
        inner: InMemorySummaryStore,
    }

    #[async_trait::async_trait]
    impl SummaryStore for BlindReadStore {
        async fn get_state(
            &self,
            _session_id: &str,
        ) -> Result<Option<SessionState>, ContextStoreError> {
            Ok(None)
        }

        async fn append_and_compress(
            &self,
            session_id: &str,
            new_text: &str,
        ) -> Result<SessionState, ContextStoreError> {
            self.inner.append_and_compress(session_id, new_text).await
        }

        async fn set_summary(&self, session_id: &str, summary: &str) -> Result<(), ContextStoreError> {
            self.inner.set_summary(session_id, summary).await
        }

        async fn reset_session(&self, session_id: &str) -> Result<bool, ContextStoreError> {
            self.inner.reset_session(session_id).await
        }

        async fn evict_idle(
            &self,
            max_idle: std::time::Duration,
        ) -> Result<usize, ContextStoreError> {
            self.inner.evict_idle(max_idle).await
        }

        async fn session_count(&self) -> Result<usize, ContextStoreError> {
            self.inner.session_count().await
        }
    }

    #[tokio::test]
    async fn append_responds_with_the_state_it_wrote() {
        let store = Arc::new(BlindReadStore {
            inner: InMemorySummaryStore::default(),
        });
        store.inner.append("s", "hello");
        let state = Arc::new(GatewayState::new(store.clone()));

        let result = session_append_handler(
            State(state),
            Path("s".to_string()),
            Json(AppendRequest {
                text: Some("world".to_string()),
            }),
        )
        .await
        .expect("append");

        assert_eq!(result.0.summary.as_deref(), Some("hello\nworld"));
        assert!(result.0.last_updated.is_some());
        assert_eq!(store.inner.summary("s").as_deref(), Some("hello\nworld"));
    }

    #[tokio::test]
    async fn append_without_text_keeps_summary() {
        let (state, store) = test_state();
        store.set("s", "kept");

        let response = test_router(state)
            .oneshot(authed(
                "POST",
                "/api/sessions/s/append",
                Some(serde_json::json!({})),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.summary("s").as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn put_summary_replaces_and_bounds() {
        let store = Arc::new(InMemorySummaryStore::new(5));
        let state = Arc::new(GatewayState::new(store.clone()));

        let response = test_router(state)
            .oneshot(authed(
                "PUT",
                "/api/sessions/s/summary",
                Some(serde_json::json!({"summary": "0123456789"})),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(store.summary("s").as_deref(), Some("56789"));
    }

    #[tokio::test]
    async fn turn_records_question_and_capped_answer() {
        let (state, store) = test_state();
        let answer = "r".repeat(1500);

        let result = session_turn_handler(
            State(state),
            Path("matter-7".to_string()),
            Json(TurnRequest {
                question: "¿Plazo?".to_string(),
                answer,
            }),
        )
        .await
        .expect("turn should be recorded");

        let summary = result.0.summary.expect("summary present");
        assert!(summary.starts_with("Q: ¿Plazo?\nA: "));
        assert_eq!(summary.matches('r').count(), prompt::TURN_ANSWER_MAX_CHARS);
        assert_eq!(store.summary("matter-7"), Some(summary));
    }

    #[tokio::test]
    async fn turn_with_empty_answer_is_not_recorded() {
        let (state, store) = test_state();

        let result = session_turn_handler(
            State(state),
            Path("s".to_string()),
            Json(TurnRequest {
                question: "q".to_string(),
                answer: String::new(),
            }),
        )
        .await
        .expect("empty answer is not an error");

        assert!(result.0.summary.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn turn_rejects_blank_question() {
        let (state, _) = test_state();
        let err = session_turn_handler(
            State(state),
            Path("s".to_string()),
            Json(TurnRequest {
                question: "  ".to_string(),
                answer: "a".to_string(),
            }),
        )
        .await
        .expect_err("blank question");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn prompt_includes_rolling_summary_when_present() {
        let (state, store) = test_state();
        store.append("s", "Q: antes\nA: respuesta");

        let result = session_prompt_handler(
            State(state.clone()),
            Path("s".to_string()),
            Json(PromptRequest {
                question: "¿Y ahora?".to_string(),
                constitution: "Constitución".to_string(),
                principles: Vec::new(),
                legal_focus: Vec::new(),
            }),
        )
        .await
        .expect("prompt");
        assert!(result.0.has_context);
        assert!(
            result
                .0
                .prompt
                .contains("Contexto relevante:\nResumen previo:\nQ: antes\nA: respuesta")
        );

        let result = session_prompt_handler(
            State(state),
            Path("other".to_string()),
            Json(PromptRequest {
                question: "¿Y ahora?".to_string(),
                constitution: String::new(),
                principles: Vec::new(),
                legal_focus: Vec::new(),
            }),
        )
        .await
        .expect("prompt");
        assert!(!result.0.has_context);
        assert!(!result.0.prompt.contains("Resumen previo"));
    }

    #[tokio::test]
    async fn delete_reports_whether_session_existed() {
        let (state, store) = test_state();
        store.append("a", "alpha");
        store.append("b", "beta");
        let router = test_router(state);

        let response = router
            .clone()
            .oneshot(authed("DELETE", "/api/sessions/a", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["removed"], true);

        let response = router
            .oneshot(authed("DELETE", "/api/sessions/a", None))
            .await
            .expect("response");
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["removed"], false);

        assert_eq!(store.summary("a"), None);
        assert_eq!(store.summary("b").as_deref(), Some("beta"));
    }

    #[tokio::test]
    async fn chat_reset_session_accepts_camel_case_body() {
        let (state, store) = test_state();
        store.append("demo", "context");

        let result = chat_reset_session_handler(
            State(state),
            Json(
                serde_json::from_value(serde_json::json!({"sessionId": "demo"}))
                    .expect("request body"),
            ),
        )
        .await
        .expect("reset");
        assert!(result.0.ok);
        assert!(result.0.removed);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn chat_reset_session_rejects_missing_id_before_store() {
        let (state, store) = test_state();
        store.append("demo", "context");

        let err = chat_reset_session_handler(
            State(state),
            Json(ResetSessionRequest { session_id: None }),
        )
        .await
        .expect_err("missing id");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn new_session_returns_uuid_without_creating_entry() {
        let (state, store) = test_state();
        let response = test_router(state)
            .oneshot(authed("POST", "/api/sessions", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let id = body["session_id"].as_str().expect("session id");
        assert!(Uuid::parse_str(id).is_ok());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn status_reports_session_count() {
        let (state, store) = test_state();
        store.append("a", "1");
        store.append("b", "2");

        let result = gateway_status_handler(State(state)).await.expect("status");
        assert_eq!(result.0.active_sessions, 2);
    }

    #[tokio::test]
    async fn store_errors_map_to_internal_server_error() {
        let err = store_failure(
            "read session summary",
            "s",
            ContextStoreError::Backend {
                reason: "down".to_string(),
            },
        );
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.1.contains("down"));
    }
}
