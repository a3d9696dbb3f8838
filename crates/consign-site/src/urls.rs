//! Canonical and internal URLs for state and city pages.

use consign_core::{slugify, state_by_slug, AppConfig, UsState};

/// URL builder for one deployment.
///
/// With subdomain routing on, state pages live at `https://{state}.{domain}/`
/// and city pages under them; otherwise both are paths under the base URL.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base_url: String,
    domain: String,
    subdomains: bool,
}

impl SiteUrls {
    #[must_use]
    pub fn new(base_url: impl Into<String>, domain: impl Into<String>, subdomains: bool) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            domain: domain.into(),
            subdomains,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.site_base_url.clone(),
            config.site_domain.clone(),
            config.subdomain_routing,
        )
    }

    /// Canonical origin without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn subdomains_enabled(&self) -> bool {
        self.subdomains
    }

    #[must_use]
    pub fn home_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Absolute URL of a site-level page such as `/about`.
    #[must_use]
    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Canonical URL of a state page, with trailing slash.
    #[must_use]
    pub fn state_url(&self, state: &str) -> String {
        let state = slugify(state);
        if self.subdomains {
            format!("https://{state}.{}/", self.domain)
        } else {
            format!("{}/{state}/", self.base_url)
        }
    }

    /// Canonical URL of a city page, with trailing slash.
    #[must_use]
    pub fn city_url(&self, state: &str, city: &str) -> String {
        format!("{}{}/", self.state_url(state), slugify(city))
    }

    /// Link from a page served on `host` to a state or city page.
    ///
    /// Relative when `host` is already that state's subdomain, the canonical
    /// absolute URL from another state's subdomain, and the path form from
    /// the apex host (edge routing redirects it from there).
    #[must_use]
    pub fn internal_link(&self, state: &str, city: Option<&str>, host: &str) -> String {
        let state_slug = slugify(state);
        match self.state_from_host(host) {
            Some(current) if current.slug == state_slug => match city {
                Some(city) => format!("/{}/", slugify(city)),
                None => "/".to_string(),
            },
            Some(_) => match city {
                Some(city) => self.city_url(state, city),
                None => self.state_url(state),
            },
            None => match city {
                Some(city) => format!("/{state_slug}/{}/", slugify(city)),
                None => format!("/{state_slug}/"),
            },
        }
    }

    /// The state whose subdomain `host` is, if any.
    ///
    /// Only the first DNS label is considered and a port is ignored, so
    /// `texas.localhost:3000` resolves in development. `www` never matches.
    #[must_use]
    pub fn state_from_host(&self, host: &str) -> Option<&'static UsState> {
        state_from_host(host)
    }
}

/// See [`SiteUrls::state_from_host`].
#[must_use]
pub fn state_from_host(host: &str) -> Option<&'static UsState> {
    let host = host.split(':').next().unwrap_or_default();
    let mut labels = host.split('.');
    let first = labels.next()?;
    labels.next()?;
    if first.is_empty() || first.eq_ignore_ascii_case("www") {
        return None;
    }
    state_by_slug(&first.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subdomain_urls() -> SiteUrls {
        SiteUrls::new(
            "https://www.consignmentstores.site/",
            "consignmentstores.site",
            true,
        )
    }

    fn path_urls() -> SiteUrls {
        SiteUrls::new(
            "https://www.consignmentstores.site",
            "consignmentstores.site",
            false,
        )
    }

    #[test]
    fn subdomain_form() {
        let urls = subdomain_urls();
        assert_eq!(urls.state_url("California"), "https://california.consignmentstores.site/");
        assert_eq!(
            urls.city_url("California", "Victorville"),
            "https://california.consignmentstores.site/victorville/"
        );
        assert_eq!(urls.home_url(), "https://www.consignmentstores.site/");
    }

    #[test]
    fn path_form() {
        let urls = path_urls();
        assert_eq!(urls.state_url("New York"), "https://www.consignmentstores.site/new-york/");
        assert_eq!(
            urls.city_url("New York", "New York City"),
            "https://www.consignmentstores.site/new-york/new-york-city/"
        );
        assert_eq!(urls.page_url("/about"), "https://www.consignmentstores.site/about");
    }

    #[test]
    fn internal_links_depend_on_host() {
        let urls = subdomain_urls();
        let host = "texas.consignmentstores.site";
        assert_eq!(urls.internal_link("Texas", Some("El Paso"), host), "/el-paso/");
        assert_eq!(urls.internal_link("Texas", None, host), "/");
        assert_eq!(
            urls.internal_link("Ohio", Some("Akron"), host),
            "https://ohio.consignmentstores.site/akron/"
        );
        assert_eq!(
            urls.internal_link("Ohio", Some("Akron"), "www.consignmentstores.site"),
            "/ohio/akron/"
        );
        assert_eq!(urls.internal_link("Ohio", None, "localhost:3000"), "/ohio/");
    }

    #[test]
    fn host_parsing() {
        assert_eq!(state_from_host("texas.consignmentstores.site").map(|s| s.name), Some("Texas"));
        assert_eq!(state_from_host("new-york.localhost:3000").map(|s| s.slug), Some("new-york"));
        assert_eq!(state_from_host("Texas.consignmentstores.site").map(|s| s.name), Some("Texas"));
        assert!(state_from_host("www.consignmentstores.site").is_none());
        assert!(state_from_host("consignmentstores.site").is_none());
        assert!(state_from_host("texas").is_none());
        assert!(state_from_host("").is_none());
    }
}
