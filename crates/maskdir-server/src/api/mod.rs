mod pharmacies;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};
use crate::state::{AppState, FeedStatus};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    feed: &'static str,
    records: usize,
    fetched_at: Option<DateTime<Utc>>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "feed_loading" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Public directory API: read-only, any origin.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/pharmacies", get(pharmacies::list_pharmacies))
        .route(
            "/api/v1/pharmacies/nearby",
            get(pharmacies::list_nearby_pharmacies),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let directory = state.directory.read().await;

    let (status_code, status, feed) = match &directory.status {
        FeedStatus::Ready => (StatusCode::OK, "ok", "ok"),
        FeedStatus::Loading => (StatusCode::OK, "ok", "loading"),
        FeedStatus::Error { message } => {
            tracing::warn!(error = %message, "health check: feed degraded");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        status_code,
        Json(ApiResponse {
            data: HealthData {
                status,
                feed,
                records: directory.snapshot.len(),
                fetched_at: directory.fetched_at,
            },
            meta,
        }),
    )
}
