//! Canonicalization of task body text.
//!
//! Task bodies have been written by several generations of clients. Older
//! ones base64-encoded the text with the URL-safe alphabet, replaced quotes
//! and newlines with fixed UUID markers so the text survived a `$;`-delimited
//! wire format, or backslash-escaped it. [`normalize_body`] reduces all of
//! these to plain text. The branch order matters: stored historical data
//! decodes differently if it changes.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

/// Legacy marker standing for a double quote.
pub const QUOTE_MARKER: &str = "280d382c-f23e-4631-8551-f43661405497";

/// Legacy marker standing for an apostrophe.
pub const APOSTROPHE_MARKER: &str = "e6f23f57-6cad-451b-8306-7939e25542dc";

/// Legacy marker standing for a newline.
pub const NEWLINE_MARKER: &str = "a7f3d0a1-2b5e-4c6d-8e9f-1a2b3c4d5e6f";

const MARKERS: [(&str, &str); 3] = [
    (QUOTE_MARKER, "\""),
    (APOSTROPHE_MARKER, "'"),
    (NEWLINE_MARKER, "\n"),
];

/// Standard alphabet, tolerant of non-zero trailing bits like the clients
/// that produced the data.
const LEGACY_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Reduces a task body in any supported legacy encoding to plain text.
///
/// This never fails: text that matches no encoding is returned unchanged.
///
/// # Examples
///
/// ```
/// use done::task::domain::normalize_body;
///
/// assert_eq!(normalize_body("QnV5IG1pbGs"), "Buy milk");
/// assert_eq!(normalize_body(r"line one\nline two"), "line one\nline two");
/// assert_eq!(normalize_body("plain text"), "plain text");
/// ```
#[must_use]
pub fn normalize_body(raw: &str) -> String {
    let decoded = decode(raw);
    replace_markers(&decoded)
}

fn decode(raw: &str) -> String {
    if is_url_safe_base64(raw)
        && let Some(text) = decode_url_safe_base64(raw)
    {
        return text;
    }

    if contains_marker(raw) {
        return replace_markers(raw);
    }

    if raw.contains('\\') {
        return unescape_backslashes(raw);
    }

    raw.to_owned()
}

fn is_url_safe_base64(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Decodes URL-safe base64 without padding.
///
/// Returns `None` unless the bytes decode and form valid UTF-8.
fn decode_url_safe_base64(text: &str) -> Option<String> {
    let mut standard: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while !standard.len().is_multiple_of(4) {
        standard.push('=');
    }

    let bytes = LEGACY_BASE64.decode(standard).ok()?;
    String::from_utf8(bytes).ok()
}

fn contains_marker(text: &str) -> bool {
    MARKERS.iter().any(|(marker, _)| text.contains(marker))
}

fn replace_markers(text: &str) -> String {
    MARKERS
        .iter()
        .fold(text.to_owned(), |acc, (marker, literal)| {
            acc.replace(marker, literal)
        })
}

/// Single left-to-right pass; unknown escapes keep their backslash.
fn unescape_backslashes(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(current) = chars.next() {
        if current != '\\' {
            output.push(current);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => Some('\n'),
            Some('r') => Some('\r'),
            Some('t') => Some('\t'),
            Some('\'') => Some('\''),
            Some('"') => Some('"'),
            Some('\\') => Some('\\'),
            _ => None,
        };
        match replacement {
            Some(literal) => {
                output.push(literal);
                chars.next();
            }
            None => output.push('\\'),
        }
    }
    output
}
