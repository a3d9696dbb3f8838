//! The store index: deduplicated listings plus per-state and per-city views.
//!
//! Built once from the raw table and never mutated afterwards. Refreshing
//! means building a new [`ProcessedIndex`] from a fresh snapshot.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use consign_core::{city_key, slugify, StoreRecord};

use crate::normalize::coerce_row;
use crate::raw::RawRow;

/// Immutable lookup structures over the deduplicated store list.
///
/// Every lookup returns an empty slice for unknown keys; absence and
/// "no stores" are the same condition.
#[derive(Debug, Clone, Default)]
pub struct ProcessedIndex {
    stores: Vec<Arc<StoreRecord>>,
    states_list: Vec<String>,
    cities_by_state: BTreeMap<String, Vec<String>>,
    stores_by_state: BTreeMap<String, Vec<Arc<StoreRecord>>>,
    stores_by_city: BTreeMap<String, Vec<Arc<StoreRecord>>>,
}

/// Counters reported by a build, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub input_rows: usize,
    pub duplicates_dropped: usize,
}

/// Coerces, deduplicates and indexes `rows`.
#[must_use]
pub fn build_index(rows: &[RawRow]) -> ProcessedIndex {
    ProcessedIndex::from_records(rows.iter().map(coerce_row)).0
}

impl ProcessedIndex {
    /// An index with every collection empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index from already-coerced records, in source order.
    ///
    /// The first record per [`StoreRecord::identity_key`] wins; later ones are
    /// dropped silently.
    pub fn from_records<I>(records: I) -> (Self, BuildStats)
    where
        I: IntoIterator<Item = StoreRecord>,
    {
        let mut stats = BuildStats::default();
        let mut seen = HashSet::new();
        let mut stores: Vec<Arc<StoreRecord>> = Vec::new();

        for record in records {
            stats.input_rows += 1;
            if seen.insert(record.identity_key()) {
                stores.push(Arc::new(record));
            } else {
                stats.duplicates_dropped += 1;
            }
        }

        sort_by_reviews_desc(&mut stores);

        let mut states = BTreeSet::new();
        let mut cities: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut stores_by_state: BTreeMap<String, Vec<Arc<StoreRecord>>> = BTreeMap::new();
        let mut stores_by_city: BTreeMap<String, Vec<Arc<StoreRecord>>> = BTreeMap::new();

        for store in &stores {
            let state = store.state.trim();
            let city = store.city.trim();

            states.insert(state.to_string());
            cities
                .entry(state.to_string())
                .or_default()
                .insert(city.to_string());
            stores_by_state
                .entry(state.to_string())
                .or_default()
                .push(Arc::clone(store));
            stores_by_city
                .entry(city_key(city, state))
                .or_default()
                .push(Arc::clone(store));
        }

        // Accumulation preserves the global order; re-sorting keeps the
        // per-group contract independent of it.
        for group in stores_by_state.values_mut() {
            sort_by_reviews_desc(group);
        }
        for group in stores_by_city.values_mut() {
            sort_by_reviews_desc(group);
        }

        let index = Self {
            stores,
            states_list: states.into_iter().collect(),
            cities_by_state: cities
                .into_iter()
                .map(|(state, set)| (state, set.into_iter().collect()))
                .collect(),
            stores_by_state,
            stores_by_city,
        };

        tracing::info!(
            input_rows = stats.input_rows,
            duplicates_dropped = stats.duplicates_dropped,
            stores = index.stores.len(),
            states = index.states_list.len(),
            "built store index"
        );

        (index, stats)
    }

    /// Every store, sorted by review count descending (ties keep source order).
    #[must_use]
    pub fn all_stores(&self) -> &[Arc<StoreRecord>] {
        &self.stores
    }

    /// Distinct state names, sorted.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states_list
    }

    /// Distinct city names within `state`, sorted.
    #[must_use]
    pub fn cities_for_state(&self, state: &str) -> &[String] {
        self.cities_by_state
            .get(state.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Stores in `state`, sorted by review count descending.
    #[must_use]
    pub fn stores_for_state(&self, state: &str) -> &[Arc<StoreRecord>] {
        self.stores_by_state
            .get(state.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Stores in `city`, `state`, sorted by review count descending.
    #[must_use]
    pub fn stores_for_city(&self, city: &str, state: &str) -> &[Arc<StoreRecord>] {
        self.stores_by_city
            .get(&city_key(city, state))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Up to `limit` other cities of `state`, in alphabetical order.
    ///
    /// Not distance-based: the data model has no coordinates.
    #[must_use]
    pub fn nearby_cities(&self, current_city: &str, state: &str, limit: usize) -> Vec<&str> {
        let current_city = current_city.trim();
        self.cities_for_state(state)
            .iter()
            .map(String::as_str)
            .filter(|city| *city != current_city)
            .take(limit)
            .collect()
    }

    /// Resolves a state routing slug back to the state name.
    #[must_use]
    pub fn state_for_slug(&self, slug: &str) -> Option<&str> {
        self.states_list
            .iter()
            .find(|state| slugify(state) == slug)
            .map(String::as_str)
    }

    /// Resolves a city routing slug within `state` back to the city name.
    #[must_use]
    pub fn city_for_slug(&self, state: &str, slug: &str) -> Option<&str> {
        self.cities_for_state(state)
            .iter()
            .find(|city| slugify(city) == slug)
            .map(String::as_str)
    }

    #[must_use]
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.stores_by_city.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// Stable sort, most reviewed first.
fn sort_by_reviews_desc(stores: &mut [Arc<StoreRecord>]) {
    stores.sort_by(|a, b| b.review_count.cmp(&a.review_count));
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
