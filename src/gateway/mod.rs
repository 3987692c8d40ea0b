//! HTTP gateway (Axum) over the embedding tiers.
//!
//! This module is primarily used by the `lodestone` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{compare_handler, embed_batch_handler, embed_handler, health_handler};
pub use state::HandlerState;

pub const LODESTONE_STATUS_HEADER: &str = "X-Lodestone-Status";
pub const LODESTONE_STATUS_ERROR: &str = "error";

/// Outcome tag carried in the status header of every successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodestoneStatus {
    Ok,
    /// At least one vector in the response is a synthesized fallback.
    Degraded,
}

impl LodestoneStatus {
    #[inline]
    pub fn from_degraded(degraded: bool) -> Self {
        if degraded {
            LodestoneStatus::Degraded
        } else {
            LodestoneStatus::Ok
        }
    }

    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            LodestoneStatus::Ok => "ok",
            LodestoneStatus::Degraded => "degraded",
        }
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self, LodestoneStatus::Degraded)
    }
}

impl std::fmt::Display for LodestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

pub fn create_router(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(liveness_handler))
        .route("/v2/health", get(health_handler))
        .route("/v2/embed", post(embed_handler))
        .route("/v2/embed/batch", post(embed_batch_handler))
        .route("/v2/embed/compare", post(compare_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Process liveness only. Tier reachability is `/v2/health`'s concern.
#[tracing::instrument]
pub async fn liveness_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        LODESTONE_STATUS_HEADER,
        HeaderValue::from_static(LodestoneStatus::Ok.as_header_value()),
    );

    (
        StatusCode::OK,
        headers,
        Json(LivenessResponse { status: "ok" }),
    )
        .into_response()
}
