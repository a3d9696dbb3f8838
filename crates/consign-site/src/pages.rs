//! Render-ready payloads for state and city pages.
//!
//! A page builder resolves URL slugs against the index and returns `None`
//! for an unknown slug; an existing state or city with no stores is never
//! `None`.

use std::sync::Arc;

use consign_core::{slugify, StoreRecord};
use consign_index::ProcessedIndex;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::map::{map_view, MapView};
use crate::schema::{city_page_schema, state_description, state_page_schema, Breadcrumb};
use crate::urls::SiteUrls;

/// Link to a city page, as listed on state pages and under "nearby cities".
#[derive(Debug, Clone, Serialize)]
pub struct CityLink {
    pub name: String,
    pub slug: String,
    /// Canonical absolute URL.
    pub url: String,
    pub store_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatePage {
    pub state: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub store_count: usize,
    pub cities: Vec<CityLink>,
    pub stores: Vec<Arc<StoreRecord>>,
    pub map: MapView,
    /// JSON-LD documents, in document order.
    pub schema: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityPage {
    pub state: String,
    pub state_slug: String,
    pub city: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub stores: Vec<Arc<StoreRecord>>,
    pub nearby_cities: Vec<CityLink>,
    pub map: MapView,
    pub schema: Vec<Value>,
}

/// Link to a state page, as listed on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct StateLink {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub store_count: usize,
    pub city_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub canonical_url: String,
    pub store_count: usize,
    pub city_count: usize,
    pub states: Vec<StateLink>,
}

#[must_use]
pub fn home_page(index: &ProcessedIndex, urls: &SiteUrls) -> HomePage {
    HomePage {
        canonical_url: urls.home_url(),
        store_count: index.store_count(),
        city_count: index.city_count(),
        states: index
            .states()
            .iter()
            .map(|state| StateLink {
                name: state.clone(),
                slug: slugify(state),
                url: urls.state_url(state),
                store_count: index.stores_for_state(state).len(),
                city_count: index.cities_for_state(state).len(),
            })
            .collect(),
    }
}

fn city_link(index: &ProcessedIndex, state: &str, city: &str, urls: &SiteUrls) -> CityLink {
    CityLink {
        name: city.to_string(),
        slug: slugify(city),
        url: urls.city_url(state, city),
        store_count: index.stores_for_city(city, state).len(),
    }
}

#[must_use]
pub fn state_page(index: &ProcessedIndex, slug: &str, urls: &SiteUrls) -> Option<StatePage> {
    state_page_with_rng(index, slug, urls, &mut rand::rng())
}

/// [`state_page`] with an explicit RNG for marker placement.
pub fn state_page_with_rng<R: Rng + ?Sized>(
    index: &ProcessedIndex,
    slug: &str,
    urls: &SiteUrls,
    rng: &mut R,
) -> Option<StatePage> {
    let state = index.state_for_slug(slug)?;
    let stores = index.stores_for_state(state);
    let cities = index.cities_for_state(state);

    Some(StatePage {
        state: state.to_string(),
        slug: slugify(state),
        title: format!("Consignment Stores in {state}"),
        description: state_description(state, stores.len(), cities.len()),
        canonical_url: urls.state_url(state),
        breadcrumbs: vec![
            Breadcrumb::link("Home", urls.home_url()),
            Breadcrumb::current(state),
        ],
        store_count: stores.len(),
        cities: cities
            .iter()
            .map(|city| city_link(index, state, city, urls))
            .collect(),
        stores: stores.to_vec(),
        map: map_view(state, None, stores, rng),
        schema: state_page_schema(state, stores, cities, urls),
    })
}

#[must_use]
pub fn city_page(
    index: &ProcessedIndex,
    state_slug: &str,
    city_slug: &str,
    urls: &SiteUrls,
    nearby_limit: usize,
) -> Option<CityPage> {
    city_page_with_rng(index, state_slug, city_slug, urls, nearby_limit, &mut rand::rng())
}

/// [`city_page`] with an explicit RNG for marker placement.
pub fn city_page_with_rng<R: Rng + ?Sized>(
    index: &ProcessedIndex,
    state_slug: &str,
    city_slug: &str,
    urls: &SiteUrls,
    nearby_limit: usize,
    rng: &mut R,
) -> Option<CityPage> {
    let state = index.state_for_slug(state_slug)?;
    let city = index.city_for_slug(state, city_slug)?;
    let stores = index.stores_for_city(city, state);

    Some(CityPage {
        state: state.to_string(),
        state_slug: slugify(state),
        city: city.to_string(),
        slug: slugify(city),
        title: format!("Consignment Stores in {city}, {state}"),
        description: format!(
            "Explore {} consignment stores in {city}, {state}. Shop for quality second-hand \
             furniture, designer clothing, vintage treasures and unique finds at local resale \
             shops with customer reviews.",
            stores.len()
        ),
        canonical_url: urls.city_url(state, city),
        breadcrumbs: vec![
            Breadcrumb::link("Home", urls.home_url()),
            Breadcrumb::link(state, urls.state_url(state)),
            Breadcrumb::current(city),
        ],
        stores: stores.to_vec(),
        nearby_cities: index
            .nearby_cities(city, state, nearby_limit)
            .into_iter()
            .map(|nearby| city_link(index, state, nearby, urls))
            .collect(),
        map: map_view(state, Some(city), stores, rng),
        schema: city_page_schema(city, state, stores, urls),
    })
}
