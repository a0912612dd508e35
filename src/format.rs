//! Formatting utilities shared by every page generator.
//!
//! All functions here are pure and infallible: bad input produces an empty or
//! `None` result that callers turn into a fallback rendering.
//!
//! ## Escaping
//!
//! Plain-text fields (titles, excerpts, tags, category names) are escaped by
//! maud's interpolation, which replaces `&`, `<`, `>` and `"`. Rich post
//! content is wrapped in `PreEscaped` and never goes through it.
//!
//! Image paths placed in inline `style` attributes go through [`css_url`]
//! first, so a quote or backslash in the path cannot end the CSS string.
//!
//! Data embedded in `<script>` blocks uses [`json_for_script`] instead, which
//! keeps the payload valid JSON while making `</script>` impossible.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// A CSS `url("...")` value for `path`.
///
/// `"` and `\` are backslash-escaped and control characters become CSS hex
/// escapes, so the value always stays one string token. HTML escaping of the
/// surrounding attribute is left to maud.
pub fn css_url(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 7);
    out.push_str("url(\"");
    for c in path.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.push_str(&format!("\\{:x} ", c as u32)),
            _ => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts full RFC 3339 (`2024-03-03T09:15:00.000Z`), a naive date-time
/// (interpreted as UTC), or a bare date.
pub fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `"March 3, 2024"`, or empty when the timestamp does not parse.
pub fn long_date(iso: &str) -> String {
    parse_timestamp(iso)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `"Mar 3, 2024"`, or empty when the timestamp does not parse.
pub fn short_date(iso: &str) -> String {
    parse_timestamp(iso)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

const VIDEO_ID_LEN: usize = 11;
const VIDEO_ID_MARKERS: [&str; 2] = ["v=", "youtu.be/"];

/// Extract an 11-character YouTube video id from a URL.
///
/// Matches the first `v=<id>` query parameter or `youtu.be/<id>` short link.
/// Anything else is `None`, and the caller omits the embed.
pub fn video_id(url: &str) -> Option<&str> {
    let bytes = url.as_bytes();
    for start in 0..bytes.len() {
        for marker in VIDEO_ID_MARKERS {
            if !bytes[start..].starts_with(marker.as_bytes()) {
                continue;
            }
            let id_start = start + marker.len();
            let Some(candidate) = bytes.get(id_start..id_start + VIDEO_ID_LEN) else {
                continue;
            };
            if candidate.iter().all(|b| is_video_id_byte(*b)) {
                return Some(&url[id_start..id_start + VIDEO_ID_LEN]);
            }
        }
    }
    None
}

fn is_video_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Percent-encode `value` for use as a URL query parameter value.
///
/// Only RFC 3986 unreserved characters pass through unchanged.
pub fn query_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Serialize `value` as JSON that is safe to place inside a `<script>` element.
///
/// `<`, `>` and `&` only ever occur inside JSON strings, so replacing them
/// with `\u` escapes keeps the document parseable as the same value.
pub fn json_for_script<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}
