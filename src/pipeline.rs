//! Orchestration of a single page through extraction, scoring, dedup and
//! publishing.
//!
//! Order matters here: the dedup claim comes before the publish gate, so a
//! page is marked seen the first time we score it, whatever the verdict.
//! Publish failures are recorded in the report rather than failing the run;
//! only the dedup store itself can error out.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::candidate::Candidate;
use crate::config::Config;
use crate::dedup::{DedupStore, StoreError};
use crate::extractor;
use crate::fetcher::RawPage;
use crate::publisher::CandidateSink;
use crate::scoring::{SignalSet, score, should_publish};

/// What happened to one processed page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Accepted and delivered to the ingestion API.
    Published { remote_id: Option<String> },
    /// The candidate key was already claimed by an earlier run.
    Duplicate,
    /// Scored but not publishable. `missing_key_fact` distinguishes "no
    /// hard evidence at all" from "evidence present but score too low".
    Dropped { missing_key_fact: bool },
    /// Accepted but the ingestion API could not be reached or refused it.
    PublishFailed { error: String },
}

/// Per-page processing report, printed by the CLI as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// URL as requested, for correlating with the input.
    pub url: String,
    pub candidate_key: String,
    pub score: f64,
    pub reasons: Vec<&'static str>,
    pub signals: SignalSet,
    /// Extractors that failed and were substituted with empty output.
    pub degraded: Vec<&'static str>,
    pub outcome: Outcome,
}

pub struct Pipeline {
    config: Config,
    store: DedupStore,
    sink: Arc<dyn CandidateSink>,
}

impl Pipeline {
    pub fn new(config: Config, store: DedupStore, sink: Arc<dyn CandidateSink>) -> Self {
        Self {
            config,
            store,
            sink,
        }
    }

    /// Run one page end to end and report the outcome.
    #[instrument(skip_all, fields(url = %page.final_url))]
    pub async fn process(&self, page: &RawPage) -> Result<Report, StoreError> {
        let extraction = extractor::extract(page, self.config.target_cities());
        let signals = SignalSet::build(
            extraction.entity.as_ref(),
            &extraction.outlinks,
            &extraction.readable,
            &extraction.phones,
            &extraction.city_hits,
        );
        let scored = score(&signals, &[]);
        let candidate = Candidate::build(
            page,
            &extraction,
            signals,
            &scored,
            self.config.market_country(),
        );
        info!(
            score = scored.score,
            reasons = ?scored.reasons,
            candidate_key = %candidate.candidate_key,
            "scored page"
        );

        let outcome = if !self.store.claim(&candidate.candidate_key)? {
            Outcome::Duplicate
        } else if !should_publish(&signals, scored.score, self.config.accept_threshold()) {
            Outcome::Dropped {
                missing_key_fact: !signals.has_key_fact(),
            }
        } else {
            match self.sink.publish(&candidate).await {
                Ok(receipt) => Outcome::Published {
                    remote_id: receipt.id,
                },
                Err(err) => {
                    warn!(error = %err, "publish failed");
                    Outcome::PublishFailed {
                        error: err.to_string(),
                    }
                }
            }
        };

        Ok(Report {
            url: page.url.clone(),
            candidate_key: candidate.candidate_key,
            score: scored.score,
            reasons: scored.reasons,
            signals,
            degraded: extraction.degraded,
            outcome,
        })
    }
}
