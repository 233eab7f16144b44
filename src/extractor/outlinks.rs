use scraper::{Html, Selector};
use url::Url;

use crate::extractor::errors::ExtractError;
use crate::extractor::model::OutlinkSet;

/// Substrings marking an href as a Google Maps location link.
const MAPS_MARKERS: &[&str] = &["maps.google.", "google.com/maps"];

/// Platforms collected into the social map. First hit per platform wins.
const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("instagram", "instagram.com"),
    ("facebook", "facebook.com"),
];

/// Collect maps and social links from the page's anchors. Hrefs are
/// resolved against the base URL before matching, so relative maps links
/// still count; unresolvable hrefs are skipped.
pub fn extract_outlinks(html: &str, base_url: &str) -> Result<OutlinkSet, ExtractError> {
    let base = Url::parse(base_url)?;
    let document = Html::parse_document(html);
    let mut outlinks = OutlinkSet::default();

    if let Ok(selector) = Selector::parse("a[href]") {
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Ok(resolved) = base.join(href) else {
                continue;
            };
            let link = resolved.to_string();

            if MAPS_MARKERS.iter().any(|marker| link.contains(marker)) {
                outlinks.maps_links.insert(link.clone());
            }
            for (platform, marker) in SOCIAL_PLATFORMS {
                if link.contains(marker) && !outlinks.social_links.contains_key(*platform) {
                    outlinks
                        .social_links
                        .insert((*platform).to_string(), link.clone());
                }
            }
        }
    }

    Ok(outlinks)
}
