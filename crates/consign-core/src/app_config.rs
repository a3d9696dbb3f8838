use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Input table: a `.json` array of row objects or a `.csv` with a header row.
    pub data_path: PathBuf,
    /// Canonical origin, e.g. `https://www.consignmentstores.site`.
    pub site_base_url: String,
    /// Apex domain that state subdomains hang off, e.g. `consignmentstores.site`.
    pub site_domain: String,
    pub subdomain_routing: bool,
    pub nearby_cities_limit: usize,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}
