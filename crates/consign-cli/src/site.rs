//! Sitemap output and static page export.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use consign_index::ProcessedIndex;
use consign_site::{export_site, render_sitemap, SiteUrls};

/// Renders the sitemap to `out`, or stdout when `out` is `None`.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub(crate) fn run_sitemap(
    index: &ProcessedIndex,
    urls: &SiteUrls,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let xml = render_sitemap(index, urls, Utc::now())?;
    match out {
        Some(path) => {
            std::fs::write(path, &xml)
                .with_context(|| format!("failed to write sitemap to {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = xml.len(), "wrote sitemap");
            println!("wrote {}", path.display());
        }
        None => print!("{xml}"),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if any page payload cannot be written.
pub(crate) fn run_export(
    index: &ProcessedIndex,
    urls: &SiteUrls,
    nearby_limit: usize,
    out: &Path,
) -> anyhow::Result<()> {
    let summary = export_site(index, urls, nearby_limit, out)
        .with_context(|| format!("failed to export pages to {}", out.display()))?;
    println!(
        "exported {} state pages, {} city pages to {}",
        summary.state_pages,
        summary.city_pages,
        out.display()
    );
    Ok(())
}
