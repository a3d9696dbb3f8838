//! Store index construction and read-side lookups for the consignment
//! directory.
//!
//! The input table is coerced into [`consign_core::StoreRecord`]s,
//! deduplicated, sorted by review count and grouped by state and city.

pub mod cache;
pub mod error;
pub mod index;
pub mod normalize;
pub mod query;
pub mod raw;
pub mod search;
pub mod source;
pub mod stats;

pub use cache::{load_index, IndexCache};
pub use error::SourceError;
pub use index::{build_index, BuildStats, ProcessedIndex};
pub use normalize::{coerce_row, parse_review_count, parse_yes_no};
pub use query::{filter_and_sort, SortOrder, StoreFilters};
pub use raw::RawRow;
pub use search::{search, HitKind, SearchHit};
pub use source::load_rows;
pub use stats::{state_summaries, StateSummary};

/// Routing slug for a state name.
#[must_use]
pub fn slug_for_state(name: &str) -> String {
    consign_core::state_slug(name)
}

/// Routing slug for a city name.
#[must_use]
pub fn slug_for_city(name: &str) -> String {
    consign_core::city_slug(name)
}
