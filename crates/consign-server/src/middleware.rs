use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use consign_site::{route, RouteDecision, SiteUrls};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter shared by every API route.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        tracing::debug!(limit = rate_limit.max_requests, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "rate_limited",
                    message: "rate limit exceeded",
                },
            }),
        )
            .into_response();
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

/// Host of the request: the `Host` header, else the URI authority (HTTP/2).
fn request_host(req: &Request) -> String {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(axum::http::uri::Authority::as_str))
        .unwrap_or_default()
        .to_string()
}

/// State-subdomain rewrites and canonical redirects.
///
/// Must wrap the router from the outside: a rewrite only affects routing if
/// it happens before the router matches the path.
pub async fn edge_routing(
    State(urls): State<Arc<SiteUrls>>,
    mut req: Request,
    next: Next,
) -> Response {
    let host = request_host(&req);
    let query = req.uri().query().map(str::to_owned);

    match route(&urls, &host, req.uri().path(), query.as_deref()) {
        RouteDecision::Pass => next.run(req).await,
        RouteDecision::Redirect(location) => {
            tracing::debug!(%host, from = %req.uri(), to = %location, "edge redirect");
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        RouteDecision::Rewrite(path) => {
            let target = match query {
                Some(q) => format!("{path}?{q}"),
                None => path,
            };
            match target.parse::<Uri>() {
                Ok(uri) => {
                    tracing::debug!(%host, from = %req.uri(), to = %uri, "edge rewrite");
                    *req.uri_mut() = uri;
                }
                Err(e) => {
                    tracing::warn!(error = %e, uri = %target, "edge rewrite produced invalid uri");
                }
            }
            next.run(req).await
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, routing::get, Router};
    use tower::{Layer, ServiceExt};

    use super::*;

    /// Sends `req` through edge routing wrapped around a router that echoes
    /// the URI it matched.
    async fn edge_call(subdomains: bool, req: Request) -> Response {
        let router = Router::new()
            .route("/{state}/", get(|uri: Uri| async move { uri.to_string() }))
            .route("/{state}/{city}/", get(|uri: Uri| async move { uri.to_string() }));
        let urls = Arc::new(SiteUrls::new(
            "https://www.consignmentstores.site",
            "consignmentstores.site",
            subdomains,
        ));
        axum::middleware::from_fn_with_state(urls, edge_routing)
            .layer(router)
            .oneshot(req)
            .await
            .expect("response")
    }

    fn get_request(host: &str, uri: &str) -> Request {
        Request::builder()
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .expect("request")
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn subdomain_request_is_rewritten_before_routing() {
        let response = edge_call(
            true,
            get_request("texas.consignmentstores.site", "/austin?sort=name-asc"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "/texas/austin/?sort=name-asc");
    }

    #[tokio::test]
    async fn apex_state_path_redirects_permanently() {
        let response =
            edge_call(true, get_request("www.consignmentstores.site", "/texas/austin/")).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://texas.consignmentstores.site/austin/"
        );
    }

    #[tokio::test]
    async fn path_mode_serves_state_paths_directly() {
        let response = edge_call(false, get_request("localhost:3000", "/texas/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "/texas/");
    }

    #[tokio::test]
    async fn rate_limit_rejects_after_budget() {
        let app = Router::new().route("/", get(|| async { "ok" })).layer(
            axum::middleware::from_fn_with_state(
                RateLimitState::new(1, Duration::from_secs(60)),
                enforce_rate_limit,
            ),
        );

        let first = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(body_text(second).await.contains("rate_limited"));
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(request_id));

        let echoed = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(echoed.headers()["x-request-id"], "req-42");

        let generated = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let id = generated.headers()["x-request-id"].to_str().expect("ascii id");
        assert!(Uuid::parse_str(id).is_ok());
    }
}
