//! Filtering and re-sorting a store list for listing pages.

use std::cmp::Ordering;
use std::sync::Arc;

use consign_core::{Category, StoreRecord};
use serde::{Deserialize, Serialize};

/// Listing filters. The default filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFilters {
    /// A store matches if it carries ANY of these categories.
    pub categories: Vec<Category>,
    /// A store matches if its city equals one of these names.
    pub cities: Vec<String>,
    /// `Some(true)` keeps stores with a website, `Some(false)` those without.
    pub has_website: Option<bool>,
    pub has_phone: Option<bool>,
    pub min_reviews: u32,
}

impl StoreFilters {
    #[must_use]
    pub fn matches(&self, store: &StoreRecord) -> bool {
        if !self.categories.is_empty() && !self.categories.iter().any(|c| c.offered_by(store)) {
            return false;
        }
        if !self.cities.is_empty() && !self.cities.iter().any(|c| *c == store.city) {
            return false;
        }
        if self.has_website.is_some_and(|want| want != store.has_website()) {
            return false;
        }
        if self.has_phone.is_some_and(|want| want != store.has_phone()) {
            return false;
        }
        store.review_count >= self.min_reviews
    }

    /// Number of active filter controls, for "N active" badges.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.categories.len()
            + self.cities.len()
            + usize::from(self.has_website.is_some())
            + usize::from(self.has_phone.is_some())
            + usize::from(self.min_reviews > 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    ReviewsDesc,
    ReviewsAsc,
    NameAsc,
    NameDesc,
    CityAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::ReviewsDesc,
        SortOrder::ReviewsAsc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::CityAsc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::ReviewsDesc => "reviews-desc",
            SortOrder::ReviewsAsc => "reviews-asc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::CityAsc => "city-asc",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::ReviewsDesc => "Most Reviewed",
            SortOrder::ReviewsAsc => "Least Reviewed",
            SortOrder::NameAsc => "Name (A-Z)",
            SortOrder::NameDesc => "Name (Z-A)",
            SortOrder::CityAsc => "City (A-Z)",
        }
    }

    fn compare(self, a: &StoreRecord, b: &StoreRecord) -> Ordering {
        match self {
            SortOrder::ReviewsDesc => b.review_count.cmp(&a.review_count),
            SortOrder::ReviewsAsc => a.review_count.cmp(&b.review_count),
            SortOrder::NameAsc => compare_text(&a.business_name, &b.business_name),
            SortOrder::NameDesc => compare_text(&b.business_name, &a.business_name),
            SortOrder::CityAsc => compare_text(&a.city, &b.city),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort order '{s}'"))
    }
}

/// Case-insensitive comparison, falling back to a byte comparison so the
/// order is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Returns the stores matching `filters`, stably sorted by `order`.
#[must_use]
pub fn filter_and_sort(
    stores: &[Arc<StoreRecord>],
    filters: &StoreFilters,
    order: SortOrder,
) -> Vec<Arc<StoreRecord>> {
    let mut out: Vec<Arc<StoreRecord>> = stores
        .iter()
        .filter(|s| filters.matches(s))
        .cloned()
        .collect();
    out.sort_by(|a, b| order.compare(a, b));
    out
}
