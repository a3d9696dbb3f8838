use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use consign_core::{anchor_id, Category, StoreRecord};
use consign_index::{filter_and_sort, SortOrder, StoreFilters};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, resolve_city, resolve_state, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct StoreItem {
    #[serde(flatten)]
    store: Arc<StoreRecord>,
    categories: Vec<Category>,
    /// Canonical city page URL with the store card anchor.
    url: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct StoreListQuery {
    pub state: Option<String>,
    pub city: Option<String>,
    /// Comma-separated category names; a store matches any of them.
    pub category: Option<String>,
    /// Comma-separated exact city names; a store matches any of them.
    pub cities: Option<String>,
    pub has_website: Option<bool>,
    pub has_phone: Option<bool>,
    pub min_reviews: Option<u32>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

impl StoreListQuery {
    fn filters(&self, req_id: &str) -> Result<StoreFilters, ApiError> {
        let categories = comma_list(self.category.as_deref())
            .map(str::parse::<Category>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::new(req_id, "validation_error", e))?;

        let cities = comma_list(self.cities.as_deref())
            .map(str::to_string)
            .collect();

        Ok(StoreFilters {
            categories,
            cities,
            has_website: self.has_website,
            has_phone: self.has_phone,
            min_reviews: self.min_reviews.unwrap_or(0),
        })
    }

    fn sort_order(&self, req_id: &str) -> Result<SortOrder, ApiError> {
        self.sort
            .as_deref()
            .map_or(Ok(SortOrder::default()), str::parse::<SortOrder>)
            .map_err(|e: String| ApiError::new(req_id, "validation_error", e))
    }
}

fn comma_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn to_items(
    state: &AppState,
    stores: &[Arc<StoreRecord>],
    query: &StoreListQuery,
    req_id: &str,
) -> Result<Vec<StoreItem>, ApiError> {
    let filters = query.filters(req_id)?;
    let order = query.sort_order(req_id)?;
    let limit = normalize_limit(query.limit);

    Ok(filter_and_sort(stores, &filters, order)
        .into_iter()
        .take(limit)
        .map(|store| StoreItem {
            categories: store.categories(),
            url: format!(
                "{}#{}",
                state.urls.city_url(&store.state, &store.city),
                anchor_id(&store.business_name)
            ),
            store,
        })
        .collect())
}

/// `GET /api/v1/stores`: every store, optionally narrowed to a state and city.
///
/// An unknown `state` or `city` yields an empty list, like the index lookups.
pub(super) async fn list_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<StoreListQuery>,
) -> Result<Json<ApiResponse<Vec<StoreItem>>>, ApiError> {
    let index = &state.index;
    let stores = match (query.state.as_deref(), query.city.as_deref()) {
        (None, None) => index.all_stores(),
        (None, Some(_)) => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "city filter requires state",
            ));
        }
        (Some(raw_state), None) => resolve_state(index, raw_state)
            .map(|name| index.stores_for_state(name))
            .unwrap_or_default(),
        (Some(raw_state), Some(raw_city)) => resolve_state(index, raw_state)
            .and_then(|state_name| {
                resolve_city(index, state_name, raw_city)
                    .map(|city_name| index.stores_for_city(city_name, state_name))
            })
            .unwrap_or_default(),
    };

    let data = to_items(&state, stores, &query, &req_id.0)?;
    Ok(ApiResponse::new(req_id.0, data))
}

pub(super) async fn list_state_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw_state): Path<String>,
    Query(query): Query<StoreListQuery>,
) -> Result<Json<ApiResponse<Vec<StoreItem>>>, ApiError> {
    let stores = resolve_state(&state.index, &raw_state)
        .map(|name| state.index.stores_for_state(name))
        .unwrap_or_default();
    let data = to_items(&state, stores, &query, &req_id.0)?;
    Ok(ApiResponse::new(req_id.0, data))
}

pub(super) async fn list_city_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((raw_state, raw_city)): Path<(String, String)>,
    Query(query): Query<StoreListQuery>,
) -> Result<Json<ApiResponse<Vec<StoreItem>>>, ApiError> {
    let index = &state.index;
    let stores = resolve_state(index, &raw_state)
        .and_then(|state_name| {
            resolve_city(index, state_name, &raw_city)
                .map(|city_name| index.stores_for_city(city_name, state_name))
        })
        .unwrap_or_default();
    let data = to_items(&state, stores, &query, &req_id.0)?;
    Ok(ApiResponse::new(req_id.0, data))
}
