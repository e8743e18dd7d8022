//! HTTP surface: a thin presentation boundary over the triage engine.
//!
//! The browser front-end is a separate collaborator; it only needs the
//! verdict JSON (plus the rendered marker-prefixed string) and the serving
//! tier, exposed both in the body and as the `X-Triage-Tier` header.

use std::sync::Arc;

use shuttle_axum::axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::bootstrap::TriageRuntime;
use crate::triage::TriageEngine;
use crate::verdict::Verdict;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TriageEngine>,
}

impl AppState {
    pub fn new(engine: Arc<TriageEngine>) -> Self {
        Self { engine }
    }

    /// Build the same state the binary uses (config + env).
    pub fn from_env() -> Self {
        Self::new(TriageRuntime::from_env().engine)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
}

#[derive(serde::Serialize)]
struct AnalyzeResp {
    #[serde(flatten)]
    verdict: Verdict,
    /// Marker-prefixed presentation string for simple substring rendering.
    rendered: String,
}

#[derive(serde::Serialize)]
struct ApiError {
    error: &'static str,
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Response {
    let text = body.text.trim();
    if text.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError {
                error: "text must not be empty",
            }),
        )
            .into_response();
    }

    let verdict = state.engine.resolve(text).await;
    let tier = HeaderValue::from_static(verdict.source_tier.as_str());
    let rendered = verdict.render();

    let mut resp = Json(AnalyzeResp { verdict, rendered }).into_response();
    resp.headers_mut().insert("x-triage-tier", tier);
    resp
}
