use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use consign_core::StoreRecord;
use tower::ServiceExt;

fn record(name: &str, city: &str, state: &str, reviews: u32) -> StoreRecord {
    StoreRecord {
        business_name: name.to_string(),
        address: format!("1 {name} Way"),
        city: city.to_string(),
        state: state.to_string(),
        review_count: reviews,
        ..StoreRecord::default()
    }
}

fn test_state() -> AppState {
    let mut books = record("Bookworm Resale", "Austin", "Texas", 40);
    books.sell_books = true;
    books.site = "https://bookworm.example.com".to_string();

    let (index, _) = ProcessedIndex::from_records(vec![
        books,
        record("Hill Country Closet", "Austin", "Texas", 12),
        record("Big D Finds", "Dallas", "Texas", 55),
        record("Gateway Resale", "St. Louis", "Missouri", 7),
        // Exact duplicate of an earlier row; dropped by the index build.
        record("Big D Finds", "Dallas", "Texas", 99),
    ]);

    AppState {
        index: Arc::new(index),
        urls: Arc::new(SiteUrls::new(
            "https://www.consignmentstores.site",
            "consignmentstores.site",
            true,
        )),
        nearby_limit: 8,
    }
}

fn test_app() -> Router {
    build_app(
        test_state(),
        RateLimitState::new(1_000, Duration::from_secs(60)),
    )
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn names(json: &serde_json::Value) -> Vec<&str> {
    json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|s| s["business_name"].as_str().expect("name"))
        .collect()
}

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None), 50);
    assert_eq!(normalize_limit(Some(0)), 1);
    assert_eq!(normalize_limit(Some(1_000)), 200);
    assert_eq!(normalize_limit(Some(25)), 25);
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_not_found_maps_to_404() {
    let response = ApiError::not_found("req-1", "state").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn resolve_state_accepts_slug_or_name() {
    let state = test_state();
    assert_eq!(resolve_state(&state.index, "Missouri"), Some("Missouri"));
    assert_eq!(resolve_state(&state.index, "missouri"), Some("Missouri"));
    assert_eq!(resolve_state(&state.index, "Ohio"), None);
    assert_eq!(
        resolve_city(&state.index, "Missouri", "st-louis"),
        Some("St. Louis")
    );
}

#[tokio::test]
async fn health_reports_index_size() {
    let (status, json) = get_json("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["stores"], 4);
    assert_eq!(json["data"]["states"], 2);
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn stores_default_to_review_order() {
    let (status, json) = get_json("/api/v1/stores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&json),
        vec![
            "Big D Finds",
            "Bookworm Resale",
            "Hill Country Closet",
            "Gateway Resale"
        ]
    );
    assert_eq!(json["data"][0]["review_count"], 55);
    assert_eq!(
        json["data"][1]["url"],
        "https://texas.consignmentstores.site/austin/#bookworm-resale"
    );
    assert_eq!(json["data"][1]["categories"][0], "books");
}

#[tokio::test]
async fn stores_accept_filters_sort_and_limit() {
    let (_, json) = get_json("/api/v1/stores?state=texas&city=austin&sort=name-asc").await;
    assert_eq!(names(&json), vec!["Bookworm Resale", "Hill Country Closet"]);

    let (_, json) = get_json("/api/v1/stores?category=books&has_website=true").await;
    assert_eq!(names(&json), vec!["Bookworm Resale"]);

    let (_, json) = get_json("/api/v1/stores?min_reviews=10&limit=2").await;
    assert_eq!(names(&json), vec!["Big D Finds", "Bookworm Resale"]);
}

#[tokio::test]
async fn stores_filter_by_city_list() {
    let (status, json) = get_json("/api/v1/stores?cities=Austin,%20St.%20Louis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&json),
        vec!["Bookworm Resale", "Hill Country Closet", "Gateway Resale"]
    );

    let (_, json) = get_json("/api/v1/states/texas/stores?cities=Dallas").await;
    assert_eq!(names(&json), vec!["Big D Finds"]);
}

#[tokio::test]
async fn stores_reject_bad_parameters() {
    let (status, json) = get_json("/api/v1/stores?sort=distance").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");

    let (status, _) = get_json("/api/v1/stores?category=cars").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json("/api/v1/stores?city=Austin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_state_lookups_are_empty_not_errors() {
    let (status, json) = get_json("/api/v1/states/ohio/cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));

    let (status, json) = get_json("/api/v1/states/ohio/stores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));

    let (status, json) = get_json("/api/v1/states/texas/cities/el-paso/stores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn state_and_city_listings() {
    let (_, json) = get_json("/api/v1/states").await;
    let states: Vec<&str> = json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|s| s["name"].as_str().expect("name"))
        .collect();
    assert_eq!(states, vec!["Missouri", "Texas"]);

    let (_, json) = get_json("/api/v1/states/texas/cities").await;
    assert_eq!(json["data"][0]["name"], "Austin");
    assert_eq!(json["data"][0]["store_count"], 2);
    assert_eq!(json["data"][1]["slug"], "dallas");

    let (_, json) = get_json("/api/v1/states/missouri/cities/st-louis/stores").await;
    assert_eq!(names(&json), vec!["Gateway Resale"]);
}

#[tokio::test]
async fn search_and_stats() {
    let (_, json) = get_json("/api/v1/search?q=austin").await;
    assert_eq!(json["data"][0]["kind"], "city");
    assert_eq!(json["data"][0]["href"], "/texas/austin");

    let (_, json) = get_json("/api/v1/search?q=a").await;
    assert_eq!(json["data"], serde_json::json!([]));

    let (_, json) = get_json("/api/v1/stats/states?top=1").await;
    assert_eq!(json["data"][0]["state"], "Texas");
    assert_eq!(json["data"][0]["store_count"], 3);
    assert_eq!(json["data"][0]["top_stores"][0]["business_name"], "Big D Finds");
}

#[tokio::test]
async fn page_payloads_and_not_found() {
    let (status, json) = get_json("/texas/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Consignment Stores in Texas");

    let (status, json) = get_json("/missouri/st-louis/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["city"], "St. Louis");

    let (status, json) = get_json("/ohio/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");

    let (status, _) = get_json("/texas/houston/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn get_json_on_host(uri: &str, host: &str) -> serde_json::Value {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::HOST, host)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[tokio::test]
async fn page_links_follow_serving_host() {
    let json = get_json_on_host("/texas/", "texas.consignmentstores.site").await;
    assert_eq!(json["data"]["cities"][0]["url"], "/austin/");

    let json = get_json_on_host("/texas/", "missouri.consignmentstores.site").await;
    assert_eq!(
        json["data"]["cities"][0]["url"],
        "https://texas.consignmentstores.site/austin/"
    );

    let json = get_json_on_host("/texas/austin/", "www.consignmentstores.site").await;
    assert_eq!(json["data"]["nearby_cities"][0]["url"], "/texas/dallas/");
}

#[tokio::test]
async fn sitemap_is_served_as_xml() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/sitemap.xml")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/xml"
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let xml = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(xml.contains("<loc>https://missouri.consignmentstores.site/st-louis/</loc>"));
}
