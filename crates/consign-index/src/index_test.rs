use serde_json::{json, Value};

use super::*;

fn rows(values: Vec<Value>) -> Vec<RawRow> {
    values
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => RawRow::new(map),
            other => panic!("expected object, got {other}"),
        })
        .collect()
}

fn store(name: &str, city: &str, state: &str, reviews: &str) -> Value {
    json!({
        "Business Name": name,
        "Address": format!("{name} address"),
        "City": city,
        "State": state,
        "Number of Reviews": reviews,
    })
}

fn names(stores: &[Arc<StoreRecord>]) -> Vec<&str> {
    stores.iter().map(|s| s.business_name.as_str()).collect()
}

fn sample_index() -> ProcessedIndex {
    build_index(&rows(vec![
        store("Vintage Treasures", "Los Angeles", "California", "45"),
        store("Second Chance", "San Francisco", "California", "32"),
        store("Austin Consignment Co", "Austin", "Texas", "28"),
        store("Bay Finds", "San Francisco", "California", "32"),
        store("Hill Country Resale", "Austin", "Texas", "5"),
        store("Big D Resale", "Dallas", "Texas", "60"),
        store("El Paso Closet", "El Paso", "Texas", "1"),
    ]))
}

// -----------------------------------------------------------------------
// Scenarios
// -----------------------------------------------------------------------

#[test]
fn duplicate_row_keeps_first_occurrence() {
    let index = build_index(&rows(vec![
        json!({
            "Business Name": "A",
            "City": "Austin",
            "State": "Texas",
            "Number of Reviews": "10",
            "sell_books": "yes"
        }),
        json!({
            "Business Name": "A",
            "City": "Austin",
            "State": "Texas",
            "Number of Reviews": "99",
            "sell_books": "no"
        }),
    ]));

    assert_eq!(index.all_stores().len(), 1);
    let survivor = &index.all_stores()[0];
    assert_eq!(survivor.review_count, 10);
    assert!(survivor.sell_books);
    assert_eq!(index.stores_for_state("Texas").len(), 1);
    assert_eq!(crate::slug_for_state("Texas"), "texas");
}

#[test]
fn dedup_folds_case_and_whitespace_variants() {
    let index = build_index(&rows(vec![
        json!({ "Business Name": "Joe's Shop", "Address": "addr", "City": "Austin", "State": "Texas", "Number of Reviews": "3" }),
        json!({ "Business Name": " joe's shop ", "Address": "ADDR", "City": "austin", "State": "Texas", "Number of Reviews": "50" }),
    ]));

    assert_eq!(index.store_count(), 1);
    assert_eq!(index.all_stores()[0].business_name, "Joe's Shop");
    assert_eq!(index.all_stores()[0].review_count, 3);
}

#[test]
fn dedup_keeps_same_name_in_different_cities() {
    let index = build_index(&rows(vec![
        json!({ "Business Name": "Chain Resale", "Address": "1 Main", "City": "Austin", "State": "Texas" }),
        json!({ "Business Name": "Chain Resale", "Address": "1 Main", "City": "Dallas", "State": "Texas" }),
    ]));
    assert_eq!(index.store_count(), 2);
}

#[test]
fn unknown_state_returns_empty_cities() {
    let index = sample_index();
    assert!(index.cities_for_state("Nonexistent State").is_empty());
    assert!(index.stores_for_state("Nonexistent State").is_empty());
    assert!(index.stores_for_city("Nowhere", "Texas").is_empty());
}

#[test]
fn empty_index_is_well_formed() {
    let index = ProcessedIndex::empty();
    assert!(index.is_empty());
    assert!(index.all_stores().is_empty());
    assert!(index.states().is_empty());
    assert!(index.cities_for_state("Texas").is_empty());
    assert!(index.nearby_cities("Austin", "Texas", 5).is_empty());
}

// -----------------------------------------------------------------------
// Ordering
// -----------------------------------------------------------------------

#[test]
fn all_stores_sorted_by_reviews_desc_with_stable_ties() {
    let index = sample_index();
    assert_eq!(
        names(index.all_stores()),
        vec![
            "Big D Resale",
            "Vintage Treasures",
            "Second Chance",
            "Bay Finds",
            "Austin Consignment Co",
            "Hill Country Resale",
            "El Paso Closet",
        ]
    );
}

#[test]
fn group_lists_are_non_increasing_in_reviews() {
    let index = sample_index();
    for state in index.states() {
        let group = index.stores_for_state(state);
        assert!(group
            .windows(2)
            .all(|w| w[0].review_count >= w[1].review_count));
        for city in index.cities_for_state(state) {
            let group = index.stores_for_city(city, state);
            assert!(group
                .windows(2)
                .all(|w| w[0].review_count >= w[1].review_count));
        }
    }
}

#[test]
fn city_group_keeps_source_order_for_ties() {
    let index = sample_index();
    assert_eq!(
        names(index.stores_for_city("San Francisco", "California")),
        vec!["Second Chance", "Bay Finds"]
    );
}

#[test]
fn states_and_cities_are_sorted_and_distinct() {
    let index = sample_index();
    assert_eq!(index.states(), ["California", "Texas"]);
    assert_eq!(
        index.cities_for_state("Texas"),
        ["Austin", "Dallas", "El Paso"]
    );
    assert_eq!(
        index.cities_for_state("California"),
        ["Los Angeles", "San Francisco"]
    );
    assert_eq!(index.city_count(), 5);
}

// -----------------------------------------------------------------------
// Completeness
// -----------------------------------------------------------------------

#[test]
fn every_store_is_reachable_from_its_groups() {
    let index = sample_index();
    for s in index.all_stores() {
        assert!(index
            .stores_for_state(&s.state)
            .iter()
            .any(|g| Arc::ptr_eq(g, s)));
        assert!(index
            .stores_for_city(&s.city, &s.state)
            .iter()
            .any(|g| Arc::ptr_eq(g, s)));
    }
    let grouped: usize = index
        .states()
        .iter()
        .map(|state| index.stores_for_state(state).len())
        .sum();
    assert_eq!(grouped, index.store_count());
}

#[test]
fn padded_state_and_city_are_trimmed_into_groups() {
    let index = build_index(&rows(vec![store("Padded", "  Austin ", " Texas  ", "2")]));
    assert_eq!(index.states(), ["Texas"]);
    let s = &index.all_stores()[0];
    assert_eq!(index.stores_for_city(&s.city, &s.state).len(), 1);
    assert_eq!(index.stores_for_city(" Austin", "Texas ").len(), 1);
}

// -----------------------------------------------------------------------
// Derived lookups
// -----------------------------------------------------------------------

#[test]
fn nearby_cities_excludes_current_in_alphabetical_order() {
    let index = sample_index();
    assert_eq!(
        index.nearby_cities("Dallas", "Texas", 10),
        vec!["Austin", "El Paso"]
    );
    assert_eq!(index.nearby_cities("Austin", "Texas", 1), vec!["Dallas"]);
    assert!(index.nearby_cities("Austin", "Texas", 0).is_empty());
}

#[test]
fn slug_resolution_round_trips() {
    let index = build_index(&rows(vec![store("S", "St. Louis", "Missouri", "1")]));
    assert_eq!(index.state_for_slug("missouri"), Some("Missouri"));
    assert_eq!(index.city_for_slug("Missouri", "st-louis"), Some("St. Louis"));
    assert_eq!(index.state_for_slug("texas"), None);
    assert_eq!(index.city_for_slug("Missouri", "kansas-city"), None);
}

#[test]
fn from_records_reports_build_stats() {
    let records = vec![
        StoreRecord {
            business_name: "One".into(),
            ..StoreRecord::default()
        },
        StoreRecord {
            business_name: "ONE".into(),
            ..StoreRecord::default()
        },
        StoreRecord {
            business_name: "Two".into(),
            ..StoreRecord::default()
        },
    ];
    let (index, stats) = ProcessedIndex::from_records(records);
    assert_eq!(
        stats,
        BuildStats {
            input_rows: 3,
            duplicates_dropped: 1
        }
    );
    assert_eq!(index.store_count(), 2);
}
