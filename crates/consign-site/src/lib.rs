//! Site-facing consumers of the store index: URLs, edge routing, sitemap,
//! structured data, map markers, page payloads and static export.

pub mod error;
pub mod export;
pub mod map;
pub mod pages;
pub mod routing;
pub mod schema;
pub mod sitemap;
pub mod urls;

pub use error::SiteError;
pub use export::{export_site, ExportSummary};
pub use map::{geocode_query, map_view, GeocodeQuery, MapMarker, MapView};
pub use pages::{city_page, home_page, state_page, CityLink, CityPage, HomePage, StateLink, StatePage};
pub use routing::{route, RouteDecision};
pub use schema::{breadcrumb_schema, city_page_schema, schema_script, state_page_schema, Breadcrumb};
pub use sitemap::{render_sitemap, sitemap_entries, SitemapEntry};
pub use urls::SiteUrls;
