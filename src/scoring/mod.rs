pub mod rules;
pub mod signals;

pub use rules::{ScoreResult, score};
pub use signals::SignalSet;

/// Publish gate: a candidate goes out only when it carries at least one
/// identifying key fact and clears the configured threshold.
pub fn should_publish(signals: &SignalSet, score: f64, threshold: f64) -> bool {
    signals.has_key_fact() && score >= threshold
}
