use chrono::{NaiveDate, Utc};
use reqwest::StatusCode;
use std::fs;
use url::Url;

use crate::extractor::model::ReadableContent;
use crate::extractor::{Extraction, extract};
use crate::fetcher::types::RawPage;

fn create_test_page(html: impl Into<String>, url: &str) -> RawPage {
    RawPage {
        url: url.to_string(),
        final_url: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        html: html.into(),
        fetched_at: Utc::now(),
        source_id: "SRC-TEST".to_string(),
        discovery_type: "manual".to_string(),
    }
}

fn target_cities() -> Vec<String> {
    vec!["Lagos".to_string(), "Ibadan".to_string()]
}

fn extract_fixture(name: &str, url: &str) -> Extraction {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    extract(&create_test_page(html, url), &target_cities())
}

#[test]
fn extracts_venue_review_page() {
    let extraction = extract_fixture("venue.html", "https://lagosfoodieguide.com/reviews/mama-put");

    let readable = &extraction.readable;
    assert!(
        readable
            .title
            .as_deref()
            .unwrap()
            .contains("Mama Put Kitchen")
    );
    assert!(readable.text.contains("jollof"));
    assert_eq!(readable.publish_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    assert!(!readable.is_recent);

    let entity = extraction.entity.as_ref().unwrap();
    assert_eq!(entity.name.as_deref(), Some("Mama Put Kitchen"));
    assert_eq!(
        entity.address.as_deref(),
        Some("12 Herbert Macaulay Way Yaba Lagos")
    );

    assert!(extraction.phones.contains(&"080-312-34567".to_string()));
    assert!(
        extraction
            .emails
            .contains(&"bookings@mamaputkitchen.ng".to_string())
    );
    assert!(
        extraction
            .outlinks
            .maps_links
            .iter()
            .any(|link| link.contains("maps.google."))
    );
    assert!(extraction.outlinks.social_links.contains_key("instagram"));
    assert!(extraction.address_tokens.contains(&"way"));
    assert_eq!(extraction.city_hits, vec!["Lagos"]);
    assert!(extraction.degraded.is_empty());
}

#[test]
fn extracts_listicle_page() {
    let extraction = extract_fixture(
        "listicle.html",
        "https://lagosfoodieguide.com/lists/top-10-jollof",
    );

    let title = extraction.readable.title.as_deref().unwrap().to_lowercase();
    assert!(title.contains("list"));
    assert!(extraction.entity.is_none());
    assert!(extraction.outlinks.maps_links.is_empty());
    assert_eq!(extraction.city_hits, vec!["Lagos"]);
    assert!(extraction.degraded.is_empty());
}

#[test]
fn empty_page_yields_empty_extraction() {
    let extraction = extract(
        &create_test_page("", "https://example.com/empty"),
        &target_cities(),
    );

    assert_eq!(extraction.readable, ReadableContent::default());
    assert!(extraction.entity.is_none());
    assert!(extraction.phones.is_empty());
    assert!(extraction.emails.is_empty());
    assert!(extraction.address_tokens.is_empty());
    assert!(extraction.city_hits.is_empty());
    assert!(extraction.degraded.is_empty());
}

#[test]
fn malformed_html_is_handled() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>Call 08031234567 today";
    let extraction = extract(
        &create_test_page(html, "https://example.com/broken"),
        &target_cities(),
    );

    assert!(extraction.degraded.is_empty());
    assert!(extraction.phones.iter().any(|p| p == "080-312-34567"));
}

#[test]
fn runtime_dated_page_is_recent() {
    let today = Utc::now().date_naive();
    let html = format!(
        "<html><head><title>Fresh Buka News</title></head><body><article><p>Published {}. {}</p></article></body></html>",
        today.format("%Y-%m-%d"),
        "A brand new buka opened in Surulere with excellent egusi and pounded yam. ".repeat(5)
    );
    let extraction = extract(
        &create_test_page(html, "https://example.com/fresh"),
        &target_cities(),
    );

    assert_eq!(extraction.readable.publish_date, Some(today));
    assert!(extraction.readable.is_recent);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(html in ".*", path in "[a-z0-9/-]{0,40}") {
            let url = format!("https://example.com/{path}");
            let page = create_test_page(html, &url);
            let _ = extract(&page, &target_cities());
        }

        #[test]
        fn phone_extraction_never_panics(text in ".*") {
            let _ = crate::extractor::patterns::extract_phone_numbers(&text);
        }
    }
}
