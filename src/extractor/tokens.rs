/// Street-address vocabulary, checked in order against lowercased text.
const ADDRESS_TOKENS: &[&str] = &[
    "street", "st.", "road", "rd", "close", "avenue", "junction", "bus stop", "market", "opposite",
    "beside", "near", "way",
];

/// Which address-vocabulary words appear in the text, in vocabulary order.
pub fn find_address_tokens(text: &str) -> Vec<&'static str> {
    if text.is_empty() {
        return Vec::new();
    }
    let low = text.to_lowercase();
    ADDRESS_TOKENS
        .iter()
        .copied()
        .filter(|token| low.contains(token))
        .collect()
}

/// Which target cities appear in the text, in configured order, matched
/// case-insensitively but returned in their configured casing.
pub fn find_city_hits(text: &str, target_cities: &[String]) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let low = text.to_lowercase();
    target_cities
        .iter()
        .filter(|city| low.contains(&city.to_lowercase()))
        .cloned()
        .collect()
}
