use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Main-content view of a page: readable text plus publication recency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadableContent {
    pub title: Option<String>,
    pub text: String,
    pub publish_date: Option<NaiveDate>,
    pub is_recent: bool,
}

/// A venue-shaped entity lifted from an ld+json block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredEntity {
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,
    pub telephone: Option<String>,
}

/// Links pointing off the page that matter for scoring. Both collections
/// carry set semantics: maps links are deduplicated, social links keep the
/// first URL seen per platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlinkSet {
    pub maps_links: BTreeSet<String>,
    pub social_links: BTreeMap<String, String>,
}

/// Everything the extractors produced for one page.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub readable: ReadableContent,
    pub entity: Option<StructuredEntity>,
    pub outlinks: OutlinkSet,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub address_tokens: Vec<&'static str>,
    pub city_hits: Vec<String>,
    /// Stages that failed and fell back to empty defaults.
    pub degraded: Vec<&'static str>,
}

/// Collapse all runs of whitespace to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
