use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use consign_index::{state_summaries, StateSummary};
use consign_site::{home_page, CityLink, StateLink};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{resolve_state, ApiError, ApiResponse, AppState};

const DEFAULT_TOP_STORES: usize = 3;
const MAX_TOP_STORES: usize = 25;

pub(super) async fn list_states(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<StateLink>>>, ApiError> {
    let data = home_page(&state.index, &state.urls).states;
    Ok(ApiResponse::new(req_id.0, data))
}

/// Cities of a state, alphabetical. An unknown state has no cities.
pub(super) async fn list_cities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw_state): Path<String>,
) -> Result<Json<ApiResponse<Vec<CityLink>>>, ApiError> {
    let index = &state.index;
    let data = match resolve_state(index, &raw_state) {
        Some(state_name) => index
            .cities_for_state(state_name)
            .iter()
            .map(|city| CityLink {
                name: city.clone(),
                slug: consign_core::city_slug(city),
                url: state.urls.city_url(state_name, city),
                store_count: index.stores_for_city(city, state_name).len(),
            })
            .collect(),
        None => Vec::new(),
    };
    Ok(ApiResponse::new(req_id.0, data))
}

#[derive(Debug, Deserialize)]
pub(super) struct StatsQuery {
    pub top: Option<usize>,
}

pub(super) async fn list_state_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ApiResponse<Vec<StateSummary>>>, ApiError> {
    let top = query.top.unwrap_or(DEFAULT_TOP_STORES).min(MAX_TOP_STORES);
    let data = state_summaries(&state.index, top);
    Ok(ApiResponse::new(req_id.0, data))
}
