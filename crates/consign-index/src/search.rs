//! Search-box matching over store names, cities and states.
//!
//! Plain case-insensitive substring matching; no relevance ranking. Hits are
//! grouped stores first, then cities, then states, with a cap per group.

use serde::Serialize;

use consign_core::{anchor_id, slugify};

use crate::index::ProcessedIndex;

/// Queries shorter than this return nothing.
pub const MIN_QUERY_LEN: usize = 2;

const STORE_HITS_CAP: usize = 5;
const CITY_HITS_CAP: usize = 8;
const TOTAL_HITS_CAP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Store,
    City,
    State,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub kind: HitKind,
    pub name: String,
    /// `"City, State"` for stores, the state for cities, absent for states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Site-relative link, e.g. `/texas/austin#joe's-shop`.
    pub href: String,
}

/// `true` for a five-digit US ZIP code.
#[must_use]
pub fn is_zip_code(query: &str) -> bool {
    query.len() == 5 && query.bytes().all(|b| b.is_ascii_digit())
}

/// Runs `query` against the index.
///
/// Store hits match on business name, or on address when the query is a
/// ZIP code. Stores fill up to 5 slots, cities up to 8 in total, states up
/// to 10 in total.
#[must_use]
pub fn search(index: &ProcessedIndex, query: &str) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let zip = is_zip_code(&query);

    let mut hits = Vec::new();

    for store in index.all_stores() {
        if hits.len() >= STORE_HITS_CAP {
            break;
        }
        let name_match = store.business_name.to_lowercase().contains(&query);
        let zip_match = zip && store.address.contains(&query);
        if name_match || zip_match {
            hits.push(SearchHit {
                kind: HitKind::Store,
                name: store.business_name.clone(),
                location: Some(store.city_key()),
                href: format!(
                    "/{}/{}#{}",
                    slugify(&store.state),
                    slugify(&store.city),
                    anchor_id(&store.business_name)
                ),
            });
        }
    }

    'states: for state in index.states() {
        for city in index.cities_for_state(state) {
            if hits.len() >= CITY_HITS_CAP {
                break 'states;
            }
            if city.to_lowercase().contains(&query) {
                hits.push(SearchHit {
                    kind: HitKind::City,
                    name: city.clone(),
                    location: Some(state.clone()),
                    href: format!("/{}/{}", slugify(state), slugify(city)),
                });
            }
        }
    }

    for state in index.states() {
        if hits.len() >= TOTAL_HITS_CAP {
            break;
        }
        if state.to_lowercase().contains(&query) {
            hits.push(SearchHit {
                kind: HitKind::State,
                name: state.clone(),
                location: None,
                href: format!("/{}", slugify(state)),
            });
        }
    }

    hits
}
