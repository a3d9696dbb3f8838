mod pages;
mod search;
mod states;
mod stores;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use consign_core::AppConfig;
use consign_index::ProcessedIndex;
use consign_site::SiteUrls;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<ProcessedIndex>,
    pub urls: Arc<SiteUrls>,
    pub nearby_limit: usize,
}

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

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    stores: usize,
    states: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
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

    pub(super) fn not_found(request_id: impl Into<String>, what: &str) -> Self {
        Self::new(request_id, "not_found", format!("{what} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(50).clamp(1, 200)
}

/// Resolves a path or query parameter naming a state, by slug or exact name.
pub(super) fn resolve_state<'a>(index: &'a ProcessedIndex, raw: &str) -> Option<&'a str> {
    let raw = raw.trim();
    index
        .states()
        .iter()
        .find(|s| s.as_str() == raw)
        .map(String::as_str)
        .or_else(|| index.state_for_slug(&raw.to_ascii_lowercase()))
}

/// Resolves a city of `state`, by slug or exact name.
pub(super) fn resolve_city<'a>(index: &'a ProcessedIndex, state: &str, raw: &str) -> Option<&'a str> {
    let raw = raw.trim();
    index
        .cities_for_state(state)
        .iter()
        .find(|c| c.as_str() == raw)
        .map(String::as_str)
        .or_else(|| index.city_for_slug(state, &raw.to_ascii_lowercase()))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/stores", get(stores::list_stores))
        .route("/api/v1/states", get(states::list_states))
        .route("/api/v1/states/{state}/cities", get(states::list_cities))
        .route("/api/v1/states/{state}/stores", get(stores::list_state_stores))
        .route(
            "/api/v1/states/{state}/cities/{city}/stores",
            get(stores::list_city_stores),
        )
        .route("/api/v1/search", get(search::search_index))
        .route("/api/v1/stats/states", get(states::list_state_stats))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

fn site_router() -> Router<AppState> {
    Router::new()
        .route("/sitemap.xml", get(pages::sitemap))
        .route("/{state}/", get(pages::state_page))
        .route("/{state}/{city}/", get(pages::city_page))
}

/// The full router. Edge routing is applied around it by the caller.
pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .merge(site_router())
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
    ApiResponse::new(
        req_id.0,
        HealthData {
            status: "ok",
            stores: state.index.store_count(),
            states: state.index.states().len(),
        },
    )
}

pub fn rate_limit_state(config: &AppConfig) -> RateLimitState {
    RateLimitState::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
