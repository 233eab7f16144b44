use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::extractor::model::{Extraction, StructuredEntity};
use crate::fetcher::types::RawPage;
use crate::scoring::{ScoreResult, SignalSet};

/// Version tag stamped into provenance.
pub const EXTRACTOR_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// How many characters of readable text go into the evidence excerpt.
const EXCERPT_CHARS: usize = 500;

/// The scored, publishable record for one page.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub fields: CandidateFields,
    pub score: f64,
    pub signals: ScoredSignals,
    pub evidence: Evidence,
    pub provenance: Provenance,
    pub candidate_key: String,
}

/// Best-effort venue fields. Members we cannot derive yet stay null and are
/// left for enrichment on the API side.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateFields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: String,
    pub phone: Vec<String>,
    pub hours: Option<String>,
    pub price: Option<String>,
    pub socials: BTreeMap<String, String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub geo_precision: String,
}

/// Signals as published: the boolean set plus the fired rule labels.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSignals {
    #[serde(flatten)]
    pub set: SignalSet,
    pub why: Vec<&'static str>,
}

/// Raw material backing the candidate, kept for review on the API side.
#[derive(Debug, Clone, Serialize)]
pub struct Evidence {
    pub source_url: String,
    pub title: Option<String>,
    pub excerpt: String,
    pub jsonld: Option<StructuredEntity>,
    pub maps_links: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub source_id: String,
    pub discovery_type: String,
    pub fetched_at: DateTime<Utc>,
    pub extractor_version: &'static str,
}

impl Candidate {
    /// Assemble the publishable record from a page and everything the
    /// extractors derived from it.
    pub fn build(
        page: &RawPage,
        extraction: &Extraction,
        signals: SignalSet,
        scored: &ScoreResult,
        country: &str,
    ) -> Self {
        let entity = extraction.entity.as_ref();
        let fields = CandidateFields {
            name: entity.and_then(|e| e.name.clone()),
            address: entity.and_then(|e| e.address.clone()),
            area: None,
            city: extraction.city_hits.first().cloned(),
            state: None,
            country: country.to_string(),
            phone: extraction.phones.clone(),
            hours: entity.and_then(|e| e.opening_hours.clone()),
            price: None,
            socials: extraction.outlinks.social_links.clone(),
            lat: None,
            lng: None,
            geo_precision: "unknown".to_string(),
        };

        let evidence = Evidence {
            source_url: page.final_url.to_string(),
            title: extraction.readable.title.clone(),
            excerpt: excerpt_of(&extraction.readable.text),
            jsonld: extraction.entity.clone(),
            maps_links: extraction.outlinks.maps_links.clone(),
        };

        let provenance = Provenance {
            source_id: page.source_id.clone(),
            discovery_type: page.discovery_type.clone(),
            fetched_at: page.fetched_at,
            extractor_version: EXTRACTOR_VERSION,
        };

        Candidate {
            fields,
            score: scored.score,
            signals: ScoredSignals {
                set: signals,
                why: scored.reasons.clone(),
            },
            evidence,
            provenance,
            candidate_key: candidate_key(page.final_url.as_str()),
        }
    }
}

/// Stable identity of a candidate: hex sha-256 of the final URL. Two
/// fetches of the same final URL always collapse to the same key.
pub fn candidate_key(final_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(final_url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// First `EXCERPT_CHARS` characters of the readable text, trimmed. The cut
/// is by character, so multi-byte text never splits mid-codepoint.
fn excerpt_of(text: &str) -> String {
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    cut.trim().to_string()
}
