//! HTTP API for the page chat widget.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/chat` | Answer a question (also mounted at `/chat`) |
//! | `GET`  | `/health` | Liveness check |
//! | `GET`  | `/` | Banner with corpus size |
//!
//! # Chat request
//!
//! ```json
//! { "message": "What are topics?" }
//! ```
//!
//! `query` is accepted in place of `message`, and so is a widget-style
//! `messages` array, in which case the last `user` entry is the question.
//! With `"context_mode": "selected_text"` and a non-empty `selected_text`,
//! the answer is drawn from the selection instead of the book.
//!
//! # Error contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Message is required" } }
//! ```
//!
//! Codes: `bad_request` (400), `internal` (500). A 500 carries `details`
//! only when `[server].expose_error_details` is set.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted; the widget is served
//! from the documentation site's origin, not this one.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::assistant::Assistant;
use crate::config::Config;

#[derive(Clone)]
struct AppState {
    assistant: Arc<Assistant>,
}

/// Build the corpus from config, then serve until the process exits.
///
/// The corpus is fully loaded before the listener binds, so the first
/// request never pays for (or races on) loading the book.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let assistant = Assistant::from_config(config).await?;
    run_server_with_assistant(config, Arc::new(assistant)).await
}

/// Serve a pre-built [`Assistant`] on `[server].bind`.
pub async fn run_server_with_assistant(
    config: &Config,
    assistant: Arc<Assistant>,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(assistant, config.server.expose_error_details);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Chatbot API server is running on http://{}", bind_addr);
    info!("Health check available at http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(assistant: Arc<Assistant>, expose_error_details: bool) -> Router {
    let state = AppState { assistant };

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/chat", post(handle_chat))
        .route("/chat", post(handle_chat))
        .with_state(state)
        .layer(CatchPanicLayer::custom(move |err: Box<dyn Any + Send + 'static>| {
            panic_response(err, expose_error_details)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
        details: None,
    }
}

fn internal_error(details: Option<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: "An error occurred while processing your request".to_string(),
        details,
    }
}

/// Turn a handler panic into a generic 500.
fn panic_response(err: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Error in chat endpoint: {}", detail);

    internal_error(expose_details.then_some(detail)).into_response()
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    message: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Chatbot API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET / ============

#[derive(Serialize)]
struct RootResponse {
    message: String,
    documents: usize,
    characters: usize,
}

async fn handle_root(State(state): State<AppState>) -> Json<RootResponse> {
    let corpus = state.assistant.corpus();
    Json(RootResponse {
        message: "Book assistant API is running".to_string(),
        documents: corpus.document_count(),
        characters: corpus.char_count(),
    })
}

// ============ POST /api/chat ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum ContextMode {
    #[default]
    FullBook,
    #[serde(alias = "selected_text_only")]
    SelectedText,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default, alias = "query")]
    message: Option<String>,
    #[serde(default)]
    messages: Vec<ChatMessage>,
    #[serde(default, alias = "mode")]
    context_mode: ContextMode,
    #[serde(default)]
    selected_text: Option<String>,
}

impl ChatRequest {
    /// The question to answer: `message`, else the last user message.
    ///
    /// Only an absent or empty question is missing; whitespace is answered
    /// like any other text.
    fn question(&self) -> Option<&str> {
        let direct = self.message.as_deref().filter(|m| !m.is_empty());
        direct.or_else(|| {
            self.messages
                .iter()
                .rev()
                .find(|m| m.role == "user")
                .map(|m| m.content.as_str())
                .filter(|m| !m.is_empty())
        })
    }

    fn selection(&self) -> Option<&str> {
        if self.context_mode != ContextMode::SelectedText {
            return None;
        }
        self.selected_text
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Serialize)]
struct ChatResponse {
    success: bool,
    response: String,
    context_used: ContextMode,
    timestamp: DateTime<Utc>,
}

async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) =
        body.map_err(|e| bad_request(format!("Invalid request body: {}", e.body_text())))?;

    let question = request
        .question()
        .ok_or_else(|| bad_request("Message is required"))?;

    let (answer, context_used) = match request.selection() {
        Some(selected) => (
            state.assistant.answer_within(question, selected),
            ContextMode::SelectedText,
        ),
        None => (state.assistant.respond(question), ContextMode::FullBook),
    };

    Ok(Json(ChatResponse {
        success: true,
        response: answer.text,
        context_used,
        timestamp: Utc::now(),
    }))
}
