//! Read-only index queries printed as plain-text tables.

use consign_core::{slugify, Category};
use consign_index::{
    filter_and_sort, search, state_summaries, ProcessedIndex, SortOrder, StoreFilters,
};

/// Arguments of the `stores` subcommand.
#[derive(Debug, Clone)]
pub(crate) struct StoreSelection {
    pub state: String,
    pub city: Option<String>,
    pub sort: SortOrder,
    pub categories: Vec<Category>,
    pub filter_cities: Vec<String>,
    pub min_reviews: u32,
}

/// Finds the indexed state named by `raw`, either its exact name
/// (case-insensitive) or its slug.
pub(crate) fn find_state<'a>(index: &'a ProcessedIndex, raw: &str) -> Option<&'a str> {
    let raw = raw.trim();
    index
        .states()
        .iter()
        .find(|s| s.eq_ignore_ascii_case(raw))
        .map(String::as_str)
        .or_else(|| index.state_for_slug(&slugify(raw)))
}

pub(crate) fn find_city<'a>(index: &'a ProcessedIndex, state: &str, raw: &str) -> Option<&'a str> {
    let raw = raw.trim();
    index
        .cities_for_state(state)
        .iter()
        .find(|c| c.eq_ignore_ascii_case(raw))
        .map(String::as_str)
        .or_else(|| index.city_for_slug(state, &slugify(raw)))
}

pub(crate) fn format_stats(index: &ProcessedIndex, top: usize) -> String {
    let summaries = state_summaries(index, top);
    let mut out = format!(
        "{} stores in {} cities across {} states\n\n{:<22}{:>8}{:>8}  TOP STORES\n",
        index.store_count(),
        index.city_count(),
        index.states().len(),
        "STATE",
        "STORES",
        "CITIES"
    );
    for summary in &summaries {
        let top_names = summary
            .top_stores
            .iter()
            .map(|s| s.business_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{:<22}{:>8}{:>8}  {}\n",
            summary.state, summary.store_count, summary.city_count, top_names
        ));
    }
    out
}

pub(crate) fn format_states(index: &ProcessedIndex) -> String {
    let mut out = format!("{:<22}{:<22}{:>8}\n", "STATE", "SLUG", "STORES");
    for state in index.states() {
        out.push_str(&format!(
            "{:<22}{:<22}{:>8}\n",
            state,
            slugify(state),
            index.stores_for_state(state).len()
        ));
    }
    out
}

pub(crate) fn format_cities(index: &ProcessedIndex, state: &str) -> String {
    let mut out = format!("{:<28}{:<28}{:>8}\n", "CITY", "SLUG", "STORES");
    for city in index.cities_for_state(state) {
        out.push_str(&format!(
            "{:<28}{:<28}{:>8}\n",
            city,
            slugify(city),
            index.stores_for_city(city, state).len()
        ));
    }
    out
}

/// Returns `None` when the state or city is not in the index.
pub(crate) fn format_stores(index: &ProcessedIndex, selection: &StoreSelection) -> Option<String> {
    let state = find_state(index, &selection.state)?;
    let stores = match selection.city.as_deref() {
        Some(raw_city) => {
            let city = find_city(index, state, raw_city)?;
            index.stores_for_city(city, state)
        }
        None => index.stores_for_state(state),
    };

    let filters = StoreFilters {
        categories: selection.categories.clone(),
        cities: selection.filter_cities.clone(),
        min_reviews: selection.min_reviews,
        ..StoreFilters::default()
    };
    let listed = filter_and_sort(stores, &filters, selection.sort);

    let mut out = format!("{:<36}{:<22}{:>8}  PHONE\n", "NAME", "CITY", "REVIEWS");
    for store in &listed {
        out.push_str(&format!(
            "{:<36}{:<22}{:>8}  {}\n",
            store.business_name, store.city, store.review_count, store.phone
        ));
    }
    out.push_str(&format!("\n{} of {} stores shown\n", listed.len(), stores.len()));
    Some(out)
}

pub(crate) fn format_search(index: &ProcessedIndex, query: &str) -> String {
    let hits = search(index, query);
    if hits.is_empty() {
        return format!("no matches for \"{}\"\n", query.trim());
    }
    let mut out = String::new();
    for hit in &hits {
        let kind = format!("{:?}", hit.kind).to_lowercase();
        match &hit.location {
            Some(location) => out.push_str(&format!(
                "{kind:<7}{} ({location})  {}\n",
                hit.name, hit.href
            )),
            None => out.push_str(&format!("{kind:<7}{}  {}\n", hit.name, hit.href)),
        }
    }
    out
}

pub(crate) fn run_stats(index: &ProcessedIndex, top: usize) {
    print!("{}", format_stats(index, top));
}

pub(crate) fn run_states(index: &ProcessedIndex) {
    if index.is_empty() {
        println!("no stores indexed; check CONSIGN_DATA_PATH");
        return;
    }
    print!("{}", format_states(index));
}

pub(crate) fn run_cities(index: &ProcessedIndex, raw_state: &str) {
    match find_state(index, raw_state) {
        Some(state) => print!("{}", format_cities(index, state)),
        None => println!("no stores found for state {raw_state}"),
    }
}

pub(crate) fn run_stores(index: &ProcessedIndex, selection: &StoreSelection) {
    match format_stores(index, selection) {
        Some(table) => print!("{table}"),
        None => println!(
            "no stores found for {}{}",
            selection.state,
            selection
                .city
                .as_deref()
                .map(|c| format!(" / {c}"))
                .unwrap_or_default()
        ),
    }
}

pub(crate) fn run_search(index: &ProcessedIndex, query: &str) {
    print!("{}", format_search(index, query));
}
