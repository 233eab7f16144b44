use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// One fetched HTTP document, decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body_utf8: String,
    /// Canonical name of the encoding the body was decoded from.
    pub charset: String,
    pub fetched_at: DateTime<Utc>,
}

/// An immutable snapshot of a fetched page plus how we came to fetch it.
///
/// This is the unit of work the pipeline consumes. Extraction never mutates
/// it; everything derived from the page lives in downstream records.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL as originally requested.
    pub url: String,
    /// URL after redirects, the identity of the page.
    pub final_url: Url,
    pub status: StatusCode,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
    /// Identifier of the source that surfaced this URL.
    pub source_id: String,
    /// How the URL was discovered (e.g. "manual", "crawl").
    pub discovery_type: String,
}

impl RawPage {
    pub fn from_response(
        requested_url: &str,
        response: PageResponse,
        source_id: impl Into<String>,
        discovery_type: impl Into<String>,
    ) -> Self {
        Self {
            url: requested_url.to_string(),
            final_url: response.url_final,
            status: response.status,
            html: response.body_utf8,
            fetched_at: response.fetched_at,
            source_id: source_id.into(),
            discovery_type: discovery_type.into(),
        }
    }
}
