use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use crate::extractor::model::StructuredEntity;

/// Schema.org types accepted as a venue entity. Matching is exact.
const ACCEPTED_TYPES: &[&str] = &["Restaurant", "LocalBusiness"];

/// First Restaurant/LocalBusiness entity found in the page's ld+json blocks.
/// Malformed blocks are skipped; later blocks still get a chance.
pub fn extract_entity(html: &str) -> Option<StructuredEntity> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "skipping malformed ld+json block");
                continue;
            }
        };
        if let Some(entity) = find_venue_entity(&value) {
            return Some(entity);
        }
    }
    None
}

/// Walk a decoded ld+json value. Arrays and @graph containers are searched
/// depth-first; anything else non-object is ignored.
fn find_venue_entity(value: &Value) -> Option<StructuredEntity> {
    match value {
        Value::Object(object) => {
            if object.get("@type").is_some_and(is_accepted_type) {
                return Some(entity_from_object(object));
            }
            object.get("@graph").and_then(find_venue_entity)
        }
        Value::Array(items) => items.iter().find_map(find_venue_entity),
        _ => None,
    }
}

fn is_accepted_type(type_value: &Value) -> bool {
    match type_value {
        Value::String(name) => ACCEPTED_TYPES.contains(&name.as_str()),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| ACCEPTED_TYPES.contains(&name)),
        _ => false,
    }
}

fn entity_from_object(object: &Map<String, Value>) -> StructuredEntity {
    StructuredEntity {
        name: text_field(object, "name"),
        address: object.get("address").and_then(flatten_address),
        opening_hours: object.get("openingHours").and_then(flatten_hours),
        telephone: text_field(object, "telephone"),
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// PostalAddress objects flatten to "street locality region" with absent
/// members skipped; plain strings pass through trimmed.
fn flatten_address(value: &Value) -> Option<String> {
    match value {
        Value::String(address) => {
            let trimmed = address.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Object(object) => {
            let parts: Vec<String> = ["streetAddress", "addressLocality", "addressRegion"]
                .iter()
                .filter_map(|key| text_field(object, key))
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

/// openingHours may be a single string or a list of day ranges.
fn flatten_hours(value: &Value) -> Option<String> {
    match value {
        Value::String(hours) => {
            let trimmed = hours.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Array(entries) => {
            let parts: Vec<&str> = entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
