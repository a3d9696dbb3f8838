use axum::{
    extract::{Query, State},
    Extension, Json,
};
use consign_index::{search, SearchHit};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Queries under two characters return an empty list rather than an error.
pub(super) async fn search_index(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchHit>>>, ApiError> {
    let data = search(&state.index, &query.q);
    Ok(ApiResponse::new(req_id.0, data))
}
