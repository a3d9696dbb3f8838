//! Edge routing: maps an incoming host and path to a rewrite, a permanent
//! redirect, or no change, before the request reaches the page routes.

use consign_core::state_by_slug;

use crate::urls::{state_from_host, SiteUrls};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the request unchanged.
    Pass,
    /// Serve the request as if it had been made for this path.
    Rewrite(String),
    /// Answer with a 301 to this location.
    Redirect(String),
}

/// Assets, API calls and framework paths are never routed.
fn is_passthrough(path: &str) -> bool {
    path.starts_with("/_next")
        || path.starts_with("/api")
        || path.contains('.')
        || path == "/favicon.ico"
}

fn with_query(location: String, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{location}?{q}"),
        _ => location,
    }
}

/// Decides how to route `path` (with optional raw `query`) requested on `host`.
///
/// - A state subdomain is rewritten onto the state's path tree, so
///   `texas.{domain}/austin` serves `/texas/austin/`.
/// - With subdomain routing enabled, legacy `/{state}/...` paths on the apex
///   host redirect to the state subdomain.
/// - Any other path without a trailing slash redirects to the slashed form.
#[must_use]
pub fn route(urls: &SiteUrls, host: &str, path: &str, query: Option<&str>) -> RouteDecision {
    if is_passthrough(path) {
        return RouteDecision::Pass;
    }

    if let Some(state) = state_from_host(host) {
        let rest = path.trim_start_matches('/');
        let mut rewritten = if rest.is_empty() {
            format!("/{}/", state.slug)
        } else {
            format!("/{}/{rest}", state.slug)
        };
        if !rewritten.ends_with('/') {
            rewritten.push('/');
        }
        return RouteDecision::Rewrite(rewritten);
    }

    if urls.subdomains_enabled() {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        if let Some(state) = segments.next().and_then(state_by_slug) {
            let rest: Vec<&str> = segments.collect();
            let location = if rest.is_empty() {
                format!("https://{}.{}/", state.slug, urls.domain())
            } else {
                format!("https://{}.{}/{}/", state.slug, urls.domain(), rest.join("/"))
            };
            return RouteDecision::Redirect(with_query(location, query));
        }
    }

    if !path.is_empty() && !path.ends_with('/') {
        return RouteDecision::Redirect(with_query(format!("{path}/"), query));
    }

    RouteDecision::Pass
}
