//! HTTP API gateway for Summit.
//!
//! Exposes the coaching turn, the streaming variant, session summaries,
//! and a read-only profile debug view. Built on Axum.
//!
//! The streaming route is a post-hoc re-chunking of an already-complete
//! response: one metadata envelope, then the response text split on
//! whitespace, then a `[DONE]` sentinel. It does not stream the
//! underlying generation.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event as SseEvent, Sse},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use summit_config::AppConfig;
use summit_core::{ChatMessage, CoachingReply, SessionSummary, TurnRequest};
use summit_engine::CoachEngine;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub engine: Arc<CoachEngine>,
    pub config: AppConfig,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/stream", post(chat_stream_handler))
        .route("/api/session/summary", post(summary_handler))
        .route("/api/debug/profile/{user_id}", get(debug_profile_handler))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn serve(
    config: AppConfig,
    engine: Arc<CoachEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = Arc::new(GatewayState { engine, config });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiRejection = (StatusCode, Json<ErrorResponse>);

/// Coaching turns require a provider credential when strict mode is on;
/// without it the route fails fast instead of degrading silently.
fn require_provider(config: &AppConfig) -> Result<(), ApiRejection> {
    if config.strict && !config.has_api_key() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "No API key configured and strict mode is enabled".to_string(),
            }),
        ));
    }
    Ok(())
}

async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        service: "summit",
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/chat` — one full coaching turn.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<CoachingReply>, ApiRejection> {
    require_provider(&state.config)?;
    info!(user_id = %request.user_id, message_len = request.message.len(), "Chat turn received");
    Ok(Json(state.engine.respond(&request).await))
}

/// `POST /api/chat/stream` — the same turn, re-chunked as SSE.
///
/// Emits `data: {"meta": <reply>}`, then one `data: {"token": "<word> "}`
/// event per whitespace-separated fragment, then `data: [DONE]`.
async fn chat_stream_handler(
    State(state): State<SharedState>,
    Json(request): Json<TurnRequest>,
) -> Result<Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>, ApiRejection> {
    require_provider(&state.config)?;
    let reply = state.engine.respond(&request).await;

    let mut events: Vec<Result<SseEvent, Infallible>> = Vec::new();
    events.push(Ok(SseEvent::default()
        .data(serde_json::json!({ "meta": reply }).to_string())));
    for token in reply.response.split_whitespace() {
        events.push(Ok(SseEvent::default()
            .data(serde_json::json!({ "token": format!("{token} ") }).to_string())));
    }
    events.push(Ok(SseEvent::default().data("[DONE]")));

    Ok(Sse::new(futures::stream::iter(events)))
}

#[derive(Deserialize)]
struct SummaryRequest {
    messages: Vec<ChatMessage>,
    #[serde(default)]
    #[allow(dead_code)]
    user_id: Option<String>,
}

/// `POST /api/session/summary` — structured summary of a whole session.
async fn summary_handler(
    State(state): State<SharedState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SessionSummary>, ApiRejection> {
    require_provider(&state.config)?;
    Ok(Json(state.engine.summarize_session(&request.messages).await))
}

/// `GET /api/debug/profile/{user_id}` — read-only profile passthrough.
async fn debug_profile_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Json<serde_json::Value> {
    let (profile, exists) = state.engine.store().inspect(&user_id);
    Json(serde_json::json!({
        "user_id": user_id,
        "profile": profile,
        "exists": exists,
    }))
}
