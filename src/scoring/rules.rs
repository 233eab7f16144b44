use serde::Serialize;

use crate::scoring::signals::SignalSet;

/// Outcome of scoring: clamped total plus which rules fired, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub reasons: Vec<&'static str>,
}

/// Apply the additive rule table to a set of signals.
///
/// `hint_boost_names` is accepted for callers that already collect venue
/// name hints; no rule consumes it yet.
pub fn score(signals: &SignalSet, _hint_boost_names: &[String]) -> ScoreResult {
    let rules: [(bool, f64, &'static str); 6] = [
        (signals.has_jsonld_restaurant, 0.25, "jsonld_address"),
        (signals.has_maps_link, 0.20, "maps_link"),
        (signals.has_phone, 0.15, "phone_found"),
        (signals.city_hit_near_food_terms, 0.10, "city_hit"),
        (signals.recent_content, 0.05, "recent"),
        (signals.listicle_penalty, -0.10, "listicle_penalty"),
    ];

    let mut total = 0.0_f64;
    let mut reasons = Vec::new();
    for (fired, delta, label) in rules {
        if fired {
            total += delta;
            reasons.push(label);
        }
    }

    ScoreResult {
        score: total.clamp(0.0, 1.0),
        reasons,
    }
}
