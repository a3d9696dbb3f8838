//! Per-state coverage summaries.

use std::sync::Arc;

use consign_core::{slugify, StoreRecord};
use serde::Serialize;

use crate::index::ProcessedIndex;

#[derive(Debug, Clone, Serialize)]
pub struct StateSummary {
    pub state: String,
    pub slug: String,
    pub store_count: usize,
    pub city_count: usize,
    /// Most reviewed stores in the state, best first.
    pub top_stores: Vec<Arc<StoreRecord>>,
}

/// One summary per state, largest store count first; ties ordered by name.
#[must_use]
pub fn state_summaries(index: &ProcessedIndex, top_n: usize) -> Vec<StateSummary> {
    let mut out: Vec<StateSummary> = index
        .states()
        .iter()
        .map(|state| {
            let stores = index.stores_for_state(state);
            StateSummary {
                state: state.clone(),
                slug: slugify(state),
                store_count: stores.len(),
                city_count: index.cities_for_state(state).len(),
                top_stores: stores.iter().take(top_n).cloned().collect(),
            }
        })
        .collect();
    // `states()` is already name-sorted, so a stable sort settles ties.
    out.sort_by(|a, b| b.store_count.cmp(&a.store_count));
    out
}
