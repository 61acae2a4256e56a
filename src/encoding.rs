//! Character encoding detection and transcoding.
//!
//! Pages fetched by callers arrive as raw bytes. Before they are parsed the
//! declared charset is sniffed from the document head and the bytes are
//! decoded to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Number of leading bytes inspected for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// Charset declaration patterns, in priority order:
/// `<meta charset="...">` first, then
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static CHARSET_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex"),
        Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
            .expect("valid regex"),
    ]
});

/// Return the first charset label declared in `head`, if any.
fn declared_charset(head: &str) -> Option<&str> {
    CHARSET_PATTERNS
        .iter()
        .find_map(|re| re.captures(head).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

/// Detect the character encoding declared by an HTML document.
///
/// Unknown labels and missing declarations fall back to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
///
/// # Examples
///
/// ```
/// use rs_tagscrape::encoding::transcode_to_utf8;
///
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93hi\x94</body></html>";
/// assert!(transcode_to_utf8(html).contains("\u{201C}hi\u{201D}"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
