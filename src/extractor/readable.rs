use chrono::{NaiveDate, Utc};
use readability::extractor;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::extractor::errors::ExtractError;
use crate::extractor::model::{ReadableContent, normalize_whitespace};

/// ISO-ish (2024-06-01, 2024/6/1) or spelled-out (3 June 2024) dates.
static PUBLISH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b20\d{2}[-/]\d{1,2}[-/]\d{1,2}\b|\b\d{1,2}\s+[A-Za-z]{3,}\s+20\d{2}\b").unwrap()
});

const LOOSE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%d %b %Y"];

/// Days after which content stops counting as recent.
const RECENCY_WINDOW_DAYS: i64 = 365;

/// Reduce a page to its readable core: title, flattened main-content text,
/// and whatever publication date the markup gives away.
///
/// Empty input produces the empty default rather than an error. The error
/// path is reserved for readability failing with nothing salvageable by the
/// selector fallback.
pub fn extract_readable(html: &str, url: &Url) -> Result<ReadableContent, ExtractError> {
    if html.trim().is_empty() {
        return Ok(ReadableContent::default());
    }

    let (title, text) = match extractor::extract(&mut html.as_bytes(), url) {
        Ok(article) if !article.text.trim().is_empty() => (
            non_empty(article.title),
            normalize_whitespace(&article.text),
        ),
        Ok(_) => fallback_extract(html),
        Err(err) => {
            debug!(error = %err, "readability failed, trying fallback extraction");
            let fallback = fallback_extract(html);
            if fallback.1.is_empty() {
                return Err(ExtractError::Readability(err.to_string()));
            }
            fallback
        }
    };

    // The date lives in the raw markup, not the readable text, so dates in
    // bylines and metadata stripped by readability still count.
    let publish_date = find_publish_date(html);
    let is_recent =
        publish_date.is_some_and(|date| is_within_recency_window(date, Utc::now().date_naive()));

    Ok(ReadableContent {
        title,
        text,
        publish_date,
        is_recent,
    })
}

/// First date-looking string in the markup, parsed leniently.
pub fn find_publish_date(html: &str) -> Option<NaiveDate> {
    let matched = PUBLISH_DATE.find(html)?;
    let parsed = parse_lenient_date(matched.as_str());
    if parsed.is_none() {
        debug!(raw = matched.as_str(), "date-like string did not parse");
    }
    parsed
}

fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in LOOSE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    dateparser::parse(raw).ok().map(|dt| dt.date_naive())
}

/// Signed window: dates up to a year old count as recent, and so do
/// future-dated pages.
pub fn is_within_recency_window(date: NaiveDate, today: NaiveDate) -> bool {
    (today - date).num_days() <= RECENCY_WINDOW_DAYS
}

fn fallback_extract(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);
    (extract_title(&document), extract_main_text(&document))
}

fn extract_title(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content")
                && let Some(title) = non_empty(content.to_string())
            {
                return Some(title);
            }
        }
    }

    for selector_str in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let title = element.text().collect::<String>().trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }

    None
}

fn extract_main_text(document: &Html) -> String {
    let content_selectors = [
        "article",
        "main",
        "[role='main']",
        ".content",
        ".post",
        "#content",
        ".entry-content",
    ];

    for selector_str in content_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = normalize_whitespace(&element.text().collect::<String>());
                if text.len() > 100 {
                    return text;
                }
            }
        }
    }

    // Last resort: whole body
    if let Ok(selector) = Selector::parse("body")
        && let Some(body) = document.select(&selector).next()
    {
        return normalize_whitespace(&body.text().collect::<String>());
    }

    String::new()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_url() -> Url {
        Url::parse("https://example.com/post").unwrap()
    }

    #[test]
    fn empty_html_gives_empty_default() {
        let readable = extract_readable("", &test_url()).unwrap();
        assert_eq!(readable, ReadableContent::default());
    }

    #[test]
    fn extracts_title_and_flattened_text() {
        let body = "The jollof here is smoky and the queue moves fast. ".repeat(10);
        let html = format!(
            "<html><head><title>Mama Put Review</title></head><body><article><h1>Mama Put Review</h1><p>{}</p></article></body></html>",
            body
        );
        let readable = extract_readable(&html, &test_url()).unwrap();
        assert!(readable.title.as_deref().unwrap().contains("Mama Put Review"));
        assert!(readable.text.contains("jollof here is smoky"));
        assert!(!readable.text.contains('\n'));
    }

    #[test]
    fn first_date_in_markup_wins() {
        let html = "<p>Reviewed 2024-05-01, updated 12 June 2025</p>";
        assert_eq!(
            find_publish_date(html),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn spelled_out_dates_parse() {
        assert_eq!(
            find_publish_date("<p>Published 3 March 2024</p>"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
    }

    #[test]
    fn slash_dates_parse() {
        assert_eq!(
            find_publish_date("Updated 2024/7/15 by staff"),
            NaiveDate::from_ymd_opt(2024, 7, 15)
        );
    }

    #[test]
    fn unparseable_date_like_string_is_none() {
        assert!(find_publish_date("<p>Build 2024-99-99</p>").is_none());
    }

    #[test]
    fn markup_without_dates_has_none() {
        assert!(find_publish_date("<p>No dates here.</p>").is_none());
    }

    #[test]
    fn recency_window_is_signed() {
        let today = Utc::now().date_naive();
        assert!(is_within_recency_window(today - Duration::days(364), today));
        assert!(!is_within_recency_window(today - Duration::days(366), today));
        // future-dated pages count as recent
        assert!(is_within_recency_window(today + Duration::days(30), today));
    }
}
