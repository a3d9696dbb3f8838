//! Static export of every page payload as JSON files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use consign_core::slugify;
use consign_index::ProcessedIndex;
use serde::Serialize;
use serde_json::Value;

use crate::error::SiteError;
use crate::pages::{city_page, home_page, state_page};
use crate::schema::schema_script;
use crate::urls::SiteUrls;

const PAGE_FILE: &str = "index.json";
const SCHEMA_FILE: &str = "schema.html";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub state_pages: usize,
    pub city_pages: usize,
}

/// Writes `index.json`, `{state}/index.json` and `{state}/{city}/index.json`
/// under `out_dir`, creating directories as needed. Each state and city
/// directory also gets a `schema.html` holding the page's JSON-LD script tags.
///
/// States and cities whose names slug to `""` have no URL and are skipped.
/// When two names share a slug only the first (in sorted order) is written.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if a directory or file cannot be written and
/// [`SiteError::Json`] if a payload fails to serialize.
pub fn export_site(
    index: &ProcessedIndex,
    urls: &SiteUrls,
    nearby_limit: usize,
    out_dir: &Path,
) -> Result<ExportSummary, SiteError> {
    let mut summary = ExportSummary::default();
    let mut state_slugs = HashSet::new();

    write_json(out_dir, &home_page(index, urls))?;

    for state in index.states() {
        let state_slug = slugify(state);
        if state_slug.is_empty() {
            tracing::warn!(state = %state, "state has no routable slug; skipping");
            continue;
        }
        if !state_slugs.insert(state_slug.clone()) {
            tracing::warn!(state = %state, slug = %state_slug, "state slug already exported; skipping");
            continue;
        }
        let state_dir = out_dir.join(&state_slug);
        if let Some(page) = state_page(index, &state_slug, urls) {
            write_json(&state_dir, &page)?;
            write_schema(&state_dir, &page.schema)?;
            summary.state_pages += 1;
        }

        let mut city_slugs = HashSet::new();
        for city in index.cities_for_state(state) {
            let city_slug = slugify(city);
            if city_slug.is_empty() {
                tracing::warn!(state = %state, city = %city, "city has no routable slug; skipping");
                continue;
            }
            if !city_slugs.insert(city_slug.clone()) {
                tracing::warn!(
                    state = %state,
                    city = %city,
                    slug = %city_slug,
                    "city slug already exported; skipping"
                );
                continue;
            }
            if let Some(page) = city_page(index, &state_slug, &city_slug, urls, nearby_limit) {
                let city_dir = state_dir.join(&city_slug);
                write_json(&city_dir, &page)?;
                write_schema(&city_dir, &page.schema)?;
                summary.city_pages += 1;
            }
        }
    }

    tracing::info!(
        out_dir = %out_dir.display(),
        state_pages = summary.state_pages,
        city_pages = summary.city_pages,
        "exported site pages"
    );
    Ok(summary)
}

fn create_dir(dir: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(dir).map_err(|e| SiteError::Io {
        path: dir.display().to_string(),
        source: e,
    })
}

fn write_file(path: &Path, body: impl AsRef<[u8]>) -> Result<(), SiteError> {
    fs::write(path, body).map_err(|e| SiteError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn write_json<T: Serialize>(dir: &Path, payload: &T) -> Result<(), SiteError> {
    create_dir(dir)?;
    let body = serde_json::to_vec_pretty(payload)?;
    write_file(&dir.join(PAGE_FILE), body)
}

fn write_schema(dir: &Path, schemas: &[Value]) -> Result<(), SiteError> {
    create_dir(dir)?;
    write_file(&dir.join(SCHEMA_FILE), schema_script(schemas)?)
}
