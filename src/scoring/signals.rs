use serde::{Deserialize, Serialize};

use crate::extractor::model::{OutlinkSet, ReadableContent, StructuredEntity};

/// The six booleans the score is computed from, in rule-table order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub has_jsonld_restaurant: bool,
    pub has_maps_link: bool,
    pub has_phone: bool,
    pub recent_content: bool,
    pub city_hit_near_food_terms: bool,
    pub listicle_penalty: bool,
}

impl SignalSet {
    /// Derive signals from the extraction pieces.
    pub fn build(
        entity: Option<&StructuredEntity>,
        outlinks: &OutlinkSet,
        readable: &ReadableContent,
        phones: &[String],
        city_hits: &[String],
    ) -> Self {
        // The entity only counts when it names the venue AND places it.
        let has_jsonld_restaurant =
            entity.is_some_and(|entity| entity.name.is_some() && entity.address.is_some());
        let listicle_penalty = readable
            .title
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains("list"));
        Self {
            has_jsonld_restaurant,
            has_maps_link: !outlinks.maps_links.is_empty(),
            has_phone: !phones.is_empty(),
            recent_content: readable.is_recent,
            city_hit_near_food_terms: !city_hits.is_empty(),
            listicle_penalty,
        }
    }

    /// A candidate needs at least one of these before it can be published,
    /// whatever its score.
    pub fn has_key_fact(&self) -> bool {
        self.has_jsonld_restaurant || self.has_phone || self.has_maps_link
    }
}
