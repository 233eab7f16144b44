pub mod entity;
pub mod errors;
pub mod model;
pub mod outlinks;
pub mod patterns;
pub mod readable;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::{Extraction, OutlinkSet, ReadableContent, StructuredEntity};

use tracing::warn;

use crate::fetcher::types::RawPage;

/// Run every extractor over a fetched page.
///
/// Individual extractor failures degrade to empty defaults and are recorded
/// in `Extraction::degraded` instead of aborting the page; a page with no
/// usable content simply scores zero downstream.
pub fn extract(page: &RawPage, target_cities: &[String]) -> Extraction {
    let mut degraded = Vec::new();

    let readable = match readable::extract_readable(&page.html, &page.final_url) {
        Ok(readable) => readable,
        Err(err) => {
            warn!(url = %page.final_url, error = %err, "readable extraction degraded");
            degraded.push("readable");
            ReadableContent::default()
        }
    };

    let entity = entity::extract_entity(&page.html);

    let outlinks = match outlinks::extract_outlinks(&page.html, page.final_url.as_str()) {
        Ok(outlinks) => outlinks,
        Err(err) => {
            warn!(url = %page.final_url, error = %err, "outlink extraction degraded");
            degraded.push("outlinks");
            OutlinkSet::default()
        }
    };

    let phones = patterns::extract_phone_numbers(&readable.text);
    let emails = patterns::extract_emails(&readable.text);
    let address_tokens = tokens::find_address_tokens(&readable.text);
    let city_hits = tokens::find_city_hits(&readable.text, target_cities);

    Extraction {
        readable,
        entity,
        outlinks,
        phones,
        emails,
        address_tokens,
        city_hits,
        degraded,
    }
}
