use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use consign_site::{city_page as build_city_page, render_sitemap, state_page as build_state_page};
use consign_site::{CityPage, StatePage};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

fn host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Page payload for `/{state}/`. An unknown slug is a 404; a known state is
/// never one, even with no stores.
pub(super) async fn state_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<StatePage>>, ApiError> {
    match build_state_page(&state.index, &slug, &state.urls) {
        Some(mut page) => {
            // City links are relative to the host the page is served on.
            let host = host(&headers);
            for link in &mut page.cities {
                link.url = state.urls.internal_link(&page.state, Some(&link.name), host);
            }
            Ok(ApiResponse::new(req_id.0, page))
        }
        None => Err(ApiError::not_found(req_id.0, "state")),
    }
}

pub(super) async fn city_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Path((state_slug, city_slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CityPage>>, ApiError> {
    match build_city_page(
        &state.index,
        &state_slug,
        &city_slug,
        &state.urls,
        state.nearby_limit,
    ) {
        Some(mut page) => {
            let host = host(&headers);
            for link in &mut page.nearby_cities {
                link.url = state.urls.internal_link(&page.state, Some(&link.name), host);
            }
            Ok(ApiResponse::new(req_id.0, page))
        }
        None => Err(ApiError::not_found(req_id.0, "city")),
    }
}

pub(super) async fn sitemap(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let xml = render_sitemap(&state.index, &state.urls, Utc::now()).map_err(|e| {
        tracing::error!(error = %e, "sitemap rendering failed");
        ApiError::new(req_id.0, "internal_error", "sitemap rendering failed")
    })?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}
