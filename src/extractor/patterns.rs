use linkify::{LinkFinder, LinkKind};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Phone shapes seen in the wild: bracketed area codes, international
/// prefixes, bare 11-digit local numbers, separator-spliced forms. The bare
/// 11-digit alternative must stay ahead of the 3-3-4 split, or a local
/// number loses its trailing digit to the shorter alternative.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:\+\d{1,3}[-.\s]?)?",
        r"(?:",
        r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}[-.\s]?\d?",
        r"|\+\d{10,15}",
        r"|\d{11}",
        r"|\d{3}[-.\s]?\d{3}[-.\s]?\d{4}",
        r"|\(\+\d{1,3}\)[-.\s]?\d{10,12}",
        r")",
    ))
    .unwrap()
});

static PHONE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-.\s()]+").unwrap());

/// All phone-looking matches in the text, in order, normalized.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    PHONE
        .find_iter(text)
        .map(|found| clean_phone_number(found.as_str()))
        .collect()
}

/// Bare 11-digit numbers are reformatted 3-3-5 ("08031234567" becomes
/// "080-312-34567"); everything else is kept as matched, trimmed.
fn clean_phone_number(phone: &str) -> String {
    let trimmed = phone.trim();
    let cleaned = PHONE_SEPARATORS.replace_all(trimmed, "");
    if cleaned.len() == 11 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &cleaned[..3], &cleaned[3..6], &cleaned[6..])
    } else {
        trimmed.to_string()
    }
}

/// Email addresses in the text, lowercased, order-preserving deduplicated.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Email]);
    let mut seen = HashSet::new();
    finder
        .links(text)
        .map(|link| link.as_str().trim().to_lowercase())
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
