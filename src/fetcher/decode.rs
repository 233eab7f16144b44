use crate::fetcher::errors::FetchError;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

// Charset declarations are trusted in priority order: Content-Type header,
// then either form of <meta> tag, then byte-level sniffing.
static HEADER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// How much of the body charset detection is allowed to look at.
const SNIFF_WINDOW: usize = 4096;

/// Decode a fetched body to UTF-8, returning the text and the encoding that
/// was actually applied.
pub fn decode_body(
    content_type: &str,
    body: &[u8],
) -> Result<(String, &'static Encoding), FetchError> {
    let encoding = declared_encoding(content_type, body).unwrap_or_else(|| sniff_encoding(body));
    let (decoded, applied, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "undecodable bytes for declared encoding {}",
            applied.name()
        )));
    }
    Ok((decoded.into_owned(), applied))
}

fn declared_encoding(content_type: &str, body: &[u8]) -> Option<&'static Encoding> {
    if let Some(encoding) = label_capture(&HEADER_CHARSET, content_type) {
        return Some(encoding);
    }
    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_WINDOW)]);
    label_capture(&META_CHARSET, &head).or_else(|| label_capture(&META_HTTP_EQUIV, &head))
}

fn label_capture(re: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = re.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn sniff_encoding(body: &[u8]) -> &'static Encoding {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(&body[..body.len().min(SNIFF_WINDOW)], false);
    detector.guess(None, true)
}
