//! Map marker placement.
//!
//! Stores carry no coordinates. Markers are scattered around their state's
//! center so they do not stack; the exact position is meaningless.

use std::sync::Arc;

use consign_core::{state_by_name, GeoPoint, StoreRecord, US_CENTER};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rand::Rng;
use serde::Serialize;

pub const STATE_ZOOM: u8 = 7;
pub const CITY_ZOOM: u8 = 11;
pub const FALLBACK_ZOOM: u8 = 4;

/// Full width, in degrees, of the jitter box on a state view.
const STATE_JITTER_DEG: f64 = 0.5;
/// Full width, in degrees, of the jitter box on a city view.
const CITY_JITTER_DEG: f64 = 0.05;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub address: String,
    pub city: String,
    pub review_count: u32,
    pub position: GeoPoint,
    /// Maps search link for the store's text address.
    pub maps_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// Builds the map for a state page, or a city page when `city` is set.
///
/// An unknown `state` centers on the continental US at [`FALLBACK_ZOOM`].
pub fn map_view<R: Rng + ?Sized>(
    state: &str,
    city: Option<&str>,
    stores: &[Arc<StoreRecord>],
    rng: &mut R,
) -> MapView {
    let jitter = if city.is_some() {
        CITY_JITTER_DEG
    } else {
        STATE_JITTER_DEG
    };

    let (center, zoom) = match state_by_name(state) {
        Some(s) if city.is_some() => (s.center, CITY_ZOOM),
        Some(s) => (s.center, STATE_ZOOM),
        None => (US_CENTER, FALLBACK_ZOOM),
    };

    let markers = stores
        .iter()
        .map(|store| MapMarker {
            name: store.business_name.clone(),
            address: store.address.clone(),
            city: store.city.clone(),
            review_count: store.review_count,
            position: marker_position(store, jitter, rng),
            maps_url: geocode_query(store).maps_url,
        })
        .collect();

    MapView {
        center,
        zoom,
        markers,
    }
}

/// The store's state center plus uniform jitter in `[-width/2, width/2)`,
/// or the US center unjittered when the state is unknown.
pub fn marker_position<R: Rng + ?Sized>(store: &StoreRecord, width: f64, rng: &mut R) -> GeoPoint {
    match state_by_name(&store.state) {
        Some(s) => GeoPoint {
            lat: s.center.lat + (rng.random::<f64>() - 0.5) * width,
            lng: s.center.lng + (rng.random::<f64>() - 0.5) * width,
        },
        None => US_CENTER,
    }
}

/// Text address plus a maps search link, for geocoding outside the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeocodeQuery {
    pub query: String,
    pub maps_url: String,
}

#[must_use]
pub fn geocode_query(store: &StoreRecord) -> GeocodeQuery {
    let query = [
        store.address.trim(),
        store.city.trim(),
        store.state.trim(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");
    let maps_url = format!(
        "{MAPS_SEARCH_URL}{}",
        utf8_percent_encode(&query, NON_ALPHANUMERIC)
    );
    GeocodeQuery { query, maps_url }
}
