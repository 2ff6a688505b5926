use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::core::history::SessionStore;
use crate::core::session::{ChatRequest, ChatSession};
use crate::error::ApiError;
use crate::itinerary::request::ItineraryService;
use crate::types::itinerary::ItineraryParams;

/// Application state shared with all routes.
#[derive(Clone)]
pub struct AppState {
    chat: Arc<ChatSession>,
    itineraries: Arc<ItineraryService>,
    sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            chat: Arc::new(ChatSession::new(config)),
            itineraries: Arc::new(ItineraryService::new(config)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }
}

/// Response body for the chat endpoint. Every outcome, including upstream
/// failure, carries a human-readable `reply`.
#[derive(Serialize)]
struct ChatReply {
    reply: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut body = json!({ "error": self.to_string() });
        if let ApiError::MalformedReply { raw, .. } = &self {
            body["raw_response"] = json!(raw);
        }
        error!(target: "tripflow::server", code = self.error_code(), error = %self, "Request failed");
        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/chat", post(handle_chat))
        .route("/generate-itinerary", post(handle_itinerary))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
pub async fn run_server(config: AppConfig, addr: SocketAddr) -> anyhow::Result<()> {
    info!(target: "tripflow::server", %addr, "Starting HTTP server");

    let app = router(AppState::new(&config));

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| anyhow::anyhow!("HTTP server failed: {err}"))
}

async fn health() -> impl IntoResponse {
    "tripflow is running"
}

async fn handle_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    // The store lock is held across the completion call: same-session
    // requests serialize instead of interleaving history appends.
    let mut sessions = state.sessions.lock().await;
    let history = sessions.history_mut(payload.session_id.as_deref());

    match state.chat.submit(history, &payload).await {
        Ok(reply) => (StatusCode::OK, Json(ChatReply { reply })).into_response(),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ChatReply { reply: chat_error_reply(&err) })).into_response()
        }
    }
}

/// Chat error bodies reuse the validation/configuration message verbatim;
/// anything else gets the generic wording without internal detail.
fn chat_error_reply(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput(message) | ApiError::Config(message) => message.clone(),
        other => format!("An unexpected error occurred: {other}"),
    }
}

async fn handle_itinerary(
    State(state): State<AppState>,
    Json(payload): Json<ItineraryParams>,
) -> Result<Json<Value>, ApiError> {
    let document = state.itineraries.generate(payload).await?;
    Ok(Json(json!({ "success": true, "itinerary": document })))
}
