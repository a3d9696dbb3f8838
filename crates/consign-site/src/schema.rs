//! schema.org JSON-LD documents for state and city pages.

use consign_core::{anchor_id, Category, StoreRecord};
use serde_json::{json, Map, Value};

use crate::urls::SiteUrls;

const SCHEMA_CONTEXT: &str = "https://schema.org";
const WEBSITE_NAME: &str = "Consignment Stores Directory";
/// How many stores a state page lists in its `ItemList`.
pub const STATE_ITEM_LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Breadcrumb {
    pub name: String,
    /// Absolute URL; the current page has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Breadcrumb {
    #[must_use]
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    #[must_use]
    pub fn current(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

#[must_use]
pub fn breadcrumb_schema(items: &[Breadcrumb]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut element = json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": item.name,
            });
            if let Some(url) = &item.url {
                element["item"] = Value::String(url.clone());
            }
            element
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

fn website(urls: &SiteUrls) -> Value {
    json!({
        "@type": "WebSite",
        "name": WEBSITE_NAME,
        "url": urls.base_url(),
    })
}

fn postal_address(store: &StoreRecord, with_country: bool) -> Value {
    let mut address = json!({
        "@type": "PostalAddress",
        "streetAddress": store.address,
        "addressLocality": store.city,
        "addressRegion": store.state,
    });
    if with_country {
        address["addressCountry"] = json!("US");
    }
    address
}

/// Inserts the optional contact and rating fields shared by both business
/// shapes.
fn contact_fields(business: &mut Map<String, Value>, store: &StoreRecord) {
    if store.has_phone() {
        business.insert("telephone".into(), json!(store.phone));
    }
    if store.has_website() {
        business.insert("url".into(), json!(store.site));
    }
    if store.review_count > 0 {
        business.insert(
            "aggregateRating".into(),
            json!({
                "@type": "AggregateRating",
                "reviewCount": store.review_count,
            }),
        );
    }
}

/// `[BreadcrumbList, CollectionPage]` for a state page.
#[must_use]
pub fn state_page_schema(
    state: &str,
    stores: &[std::sync::Arc<StoreRecord>],
    cities: &[String],
    urls: &SiteUrls,
) -> Vec<Value> {
    let state_url = urls.state_url(state);
    let breadcrumbs = breadcrumb_schema(&[
        Breadcrumb::link("Home", urls.home_url()),
        Breadcrumb::current(state),
    ]);

    let items: Vec<Value> = stores
        .iter()
        .take(STATE_ITEM_LIST_LIMIT)
        .enumerate()
        .map(|(i, store)| {
            let mut business = Map::new();
            business.insert("@type".into(), json!("LocalBusiness"));
            business.insert("name".into(), json!(store.business_name));
            business.insert("address".into(), postal_address(store, false));
            contact_fields(&mut business, store);
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": Value::Object(business),
            })
        })
        .collect();

    let page = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "CollectionPage",
        "@id": state_url,
        "url": state_url,
        "name": format!("Consignment Stores in {state}"),
        "description": state_description(state, stores.len(), cities.len()),
        "breadcrumb": { "@id": format!("{state_url}#breadcrumb") },
        "mainEntity": {
            "@type": "ItemList",
            "numberOfItems": stores.len(),
            "itemListElement": items,
        },
        "isPartOf": website(urls),
    });

    vec![breadcrumbs, page]
}

/// Meta description for a state page.
#[must_use]
pub fn state_description(state: &str, store_count: usize, city_count: usize) -> String {
    format!(
        "Find the best consignment stores in {state}. Browse {store_count} stores across \
         {city_count} cities. Quality second-hand furniture, clothing, and vintage items."
    )
}

/// `[BreadcrumbList, CollectionPage, LocalBusiness...]` for a city page.
#[must_use]
pub fn city_page_schema(
    city: &str,
    state: &str,
    stores: &[std::sync::Arc<StoreRecord>],
    urls: &SiteUrls,
) -> Vec<Value> {
    let city_url = urls.city_url(state, city);
    let breadcrumbs = breadcrumb_schema(&[
        Breadcrumb::link("Home", urls.home_url()),
        Breadcrumb::link(state, urls.state_url(state)),
        Breadcrumb::current(city),
    ]);

    let page = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "CollectionPage",
        "@id": city_url,
        "url": city_url,
        "name": format!("Consignment Stores in {city}, {state}"),
        "description": format!(
            "Find the best consignment stores in {city}, {state}. Browse {} top-rated stores \
             with reviews. Quality second-hand furniture, clothing, and vintage items.",
            stores.len()
        ),
        "breadcrumb": { "@id": format!("{city_url}#breadcrumb") },
        "isPartOf": website(urls),
    });

    let mut out = vec![breadcrumbs, page];
    out.extend(stores.iter().map(|s| local_business(s, &city_url)));
    out
}

/// Full `LocalBusiness` entry anchored at the store's card on the city page.
#[must_use]
pub fn local_business(store: &StoreRecord, city_url: &str) -> Value {
    let mut business = Map::new();
    business.insert("@context".into(), json!(SCHEMA_CONTEXT));
    business.insert("@type".into(), json!("LocalBusiness"));
    business.insert(
        "@id".into(),
        json!(format!("{city_url}#{}", anchor_id(&store.business_name))),
    );
    business.insert("name".into(), json!(store.business_name));
    business.insert("description".into(), json!(store_description(store)));
    business.insert("address".into(), postal_address(store, true));
    contact_fields(&mut business, store);
    if store.has_website() {
        business.insert("sameAs".into(), json!([store.site]));
    }
    if !store.photo.is_empty() {
        business.insert("image".into(), json!(store.photo));
    }

    let offers: Vec<Value> = store
        .categories()
        .into_iter()
        .map(|c: Category| {
            json!({
                "@type": "Offer",
                "itemOffered": { "@type": "Product", "name": c.label() },
            })
        })
        .collect();
    business.insert("makesOffer".into(), Value::Array(offers));

    if store.pricing {
        business.insert("priceRange".into(), json!("$"));
    }

    let amenities: Vec<Value> = [
        (store.wide_selection, "Wide Selection"),
        (store.clean_organized, "Clean & Organized"),
        (store.friendly_employees, "Friendly Staff"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| json!({ "@type": "LocationFeatureSpecification", "name": name }))
    .collect();
    business.insert("amenityFeature".into(), Value::Array(amenities));

    Value::Object(business)
}

/// The SEO description, or a generated sentence when the table has none.
#[must_use]
pub fn store_description(store: &StoreRecord) -> String {
    if store.seo_description.is_empty() {
        format!(
            "{} is a consignment store located in {}, {} offering quality second-hand items.",
            store.business_name, store.city, store.state
        )
    } else {
        store.seo_description.clone()
    }
}

/// Renders each document as a pretty-printed `ld+json` script tag, one per
/// line.
///
/// # Errors
///
/// Returns an error if a document cannot be serialized.
pub fn schema_script(schemas: &[Value]) -> Result<String, serde_json::Error> {
    let scripts = schemas
        .iter()
        .map(|schema| {
            serde_json::to_string_pretty(schema)
                .map(|body| format!(r#"<script type="application/ld+json">{body}</script>"#))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(scripts.join("\n"))
}
