pub mod app_config;
pub mod config;
pub mod slug;
pub mod states;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use slug::{anchor_id, city_slug, slugify, state_slug};
pub use states::{state_by_name, state_by_slug, GeoPoint, UsState, US_CENTER, US_STATES};
pub use store::{city_key, Category, StoreRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
