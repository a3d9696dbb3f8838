//! XML sitemap for every site, state and city page.

use chrono::{DateTime, SecondsFormat, Utc};
use consign_core::slugify;
use consign_index::ProcessedIndex;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::SiteError;
use crate::urls::SiteUrls;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Entries in sitemap order: site pages, then states, then cities by state.
/// Names that slug to `""` have no page and are left out.
#[must_use]
pub fn sitemap_entries(index: &ProcessedIndex, urls: &SiteUrls) -> Vec<SitemapEntry> {
    let entry = |loc: String, changefreq, priority| SitemapEntry {
        loc,
        changefreq,
        priority,
    };

    let mut entries = vec![
        entry(urls.home_url(), ChangeFreq::Daily, 1.0),
        entry(urls.page_url("/about"), ChangeFreq::Monthly, 0.8),
        entry(urls.page_url("/sitemap"), ChangeFreq::Monthly, 0.5),
    ];

    let routable = |name: &&String| !slugify(name).is_empty();

    for state in index.states().iter().filter(routable) {
        entries.push(entry(urls.state_url(state), ChangeFreq::Weekly, 0.9));
    }
    for state in index.states().iter().filter(routable) {
        for city in index.cities_for_state(state).iter().filter(routable) {
            entries.push(entry(urls.city_url(state, city), ChangeFreq::Weekly, 0.8));
        }
    }

    entries
}

/// Renders the sitemap document with `lastmod` on every entry.
///
/// # Errors
///
/// Returns [`SiteError::Xml`] if the XML writer fails.
pub fn render_sitemap(
    index: &ProcessedIndex,
    urls: &SiteUrls,
    lastmod: DateTime<Utc>,
) -> Result<String, SiteError> {
    let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Millis, true);
    let entries = sitemap_entries(index, urls);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write(
        &mut writer,
        Event::Start(BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)])),
    )?;

    for entry in &entries {
        write(&mut writer, Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &entry.loc)?;
        text_element(&mut writer, "lastmod", &lastmod)?;
        text_element(&mut writer, "changefreq", entry.changefreq.as_str())?;
        text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        write(&mut writer, Event::End(BytesEnd::new("url")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    tracing::debug!(entries = entries.len(), "rendered sitemap");
    String::from_utf8(writer.into_inner()).map_err(|e| SiteError::Xml(e.to_string()))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SiteError> {
    writer
        .write_event(event)
        .map_err(|e| SiteError::Xml(e.to_string()))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), SiteError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use consign_core::StoreRecord;

    use super::*;

    fn index() -> ProcessedIndex {
        let record = |city: &str, state: &str| StoreRecord {
            business_name: format!("{city} Resale"),
            city: city.into(),
            state: state.into(),
            ..StoreRecord::default()
        };
        ProcessedIndex::from_records(vec![
            record("Austin", "Texas"),
            record("El Paso", "Texas"),
            record("St. Louis", "Missouri"),
            record("", "Missouri"),
        ])
        .0
    }

    fn urls() -> SiteUrls {
        SiteUrls::new("https://www.consignmentstores.site", "consignmentstores.site", true)
    }

    #[test]
    fn entries_cover_site_state_and_city_pages() {
        let entries = sitemap_entries(&index(), &urls());
        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://www.consignmentstores.site/",
                "https://www.consignmentstores.site/about",
                "https://www.consignmentstores.site/sitemap",
                "https://missouri.consignmentstores.site/",
                "https://texas.consignmentstores.site/",
                "https://missouri.consignmentstores.site/st-louis/",
                "https://texas.consignmentstores.site/austin/",
                "https://texas.consignmentstores.site/el-paso/",
            ]
        );
        assert_eq!(entries[0].changefreq, ChangeFreq::Daily);
        assert!((entries[3].priority - 0.9).abs() < f32::EPSILON);
        assert!((entries[5].priority - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn render_produces_urlset_document() {
        let lastmod = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let xml = render_sitemap(&index(), &urls(), lastmod).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://texas.consignmentstores.site/el-paso/</loc>"));
        assert!(xml.contains("<lastmod>2024-05-01T12:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert_eq!(xml.matches("<url>").count(), 8);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn empty_index_still_lists_site_pages() {
        let entries = sitemap_entries(&ProcessedIndex::empty(), &urls());
        assert_eq!(entries.len(), 3);
    }
}
