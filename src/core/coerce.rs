// LeadSift - core/coerce.rs
//
// Primitive value coercers shared by the normaliser and the filter engine:
// follower-count shorthand, scalar/list coercion of loosely-typed JSON
// values, URL canonicalisation, and platform detection from a URL host.
//
// None of these functions fail. Unparseable input degrades to a defined
// fallback: 0, an empty string, or the trimmed input.

use crate::core::model::{Platform, RawRecord};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use url::Url;

// =============================================================================
// Truthiness and scalar text
// =============================================================================

/// Whether a JSON value counts as "present" for alias-chain lookups.
///
/// `null`, `false`, numeric zero, blank strings, and empty arrays/objects are
/// all absent; the next alias key is consulted instead.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Return the value of the first key in `keys` whose value is truthy.
pub fn first_truthy<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_truthy(value))
}

/// Render a scalar as trimmed text. Strings and numbers qualify; anything
/// else (bools, arrays, objects, null) has no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Trimmed text of the first alias key holding a non-empty scalar, or "".
pub fn first_text(record: &RawRecord, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(scalar_text)
        .unwrap_or_default()
}

/// Boolean flag from the first truthy alias key; false when none is set.
///
/// Strings are matched against a small affirmative vocabulary rather than
/// treated as truthy, so `"false"` decodes as false.
pub fn first_flag(record: &RawRecord, keys: &[&str]) -> bool {
    first_truthy(record, keys).is_some_and(|value| match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

/// Coerce a contact-field value into candidate strings.
///
/// A string is split on `;` and `,`; an array contributes each scalar
/// element; a bare number becomes one candidate. Blank parts are dropped.
pub fn coerce_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(|c: char| c == ';' || c == ',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        Value::Number(n) => vec![n.to_string()],
        _ => Vec::new(),
    }
}

// =============================================================================
// Follower counts
// =============================================================================

fn shorthand_regex() -> &'static Regex {
    static SHORTHAND: OnceLock<Regex> = OnceLock::new();
    SHORTHAND.get_or_init(|| {
        Regex::new(r"^(?P<number>[0-9.]+)\s*(?P<suffix>[kmb])?$")
            .expect("follower shorthand regex is valid")
    })
}

/// Decode a follower count from a JSON value.
///
/// Integers pass through, floats are truncated, strings go through
/// `parse_follower_text`. Negative, non-finite and non-scalar values yield 0.
pub fn followers_to_int(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(float_to_count))
            .unwrap_or(0),
        Value::String(s) => parse_follower_text(s),
        _ => 0,
    }
}

/// Decode follower text such as `"405.1K"`, `"2.3M"`, `"1,200"` or `"1e3"`.
///
/// Thousands separators and surrounding whitespace are removed and the text
/// is lower-cased. `<number><k|m|b>` is scaled by 1e3/1e6/1e9 using exact
/// decimal arithmetic and truncated; other text falls back to a plain float
/// parse. Anything else is 0.
pub fn parse_follower_text(text: &str) -> u64 {
    let cleaned = text.trim().to_lowercase().replace(',', "");
    if cleaned.is_empty() {
        return 0;
    }

    if let Some(caps) = shorthand_regex().captures(&cleaned) {
        let exponent = match caps.name("suffix").map(|m| m.as_str()) {
            Some("k") => 3,
            Some("m") => 6,
            Some("b") => 9,
            _ => 0,
        };
        return scale_decimal(&caps["number"], exponent).unwrap_or(0);
    }

    cleaned.parse::<f64>().map(float_to_count).unwrap_or(0)
}

/// `digits * 10^exponent`, truncated toward zero, without going through
/// floating point (`405.1` * 1e3 must be exactly 405100).
///
/// Returns `None` when `digits` is not a single decimal number.
fn scale_decimal(digits: &str, exponent: usize) -> Option<u64> {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (digits, ""),
    };
    if (int_part.is_empty() && frac_part.is_empty()) || frac_part.contains('.') {
        return None;
    }

    // Keep exactly `exponent` fractional digits, padding with zeros.
    let mut scaled_frac: String = frac_part.chars().take(exponent).collect();
    while scaled_frac.len() < exponent {
        scaled_frac.push('0');
    }

    let whole: String = format!("{int_part}{scaled_frac}");
    let whole = whole.trim_start_matches('0');
    if whole.is_empty() {
        return Some(0);
    }
    // All digits are ASCII; the only possible failure is overflow.
    Some(whole.parse::<u64>().unwrap_or(u64::MAX))
}

fn float_to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u64::MAX.
        value.trunc() as u64
    } else {
        0
    }
}

// =============================================================================
// URL canonicalisation
// =============================================================================

/// Byte offset just past `scheme://` when `text` starts with a valid scheme.
fn scheme_end(text: &str) -> Option<usize> {
    let idx = text.find("://")?;
    let scheme = &text[..idx];
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(idx + 3)
}

/// Split `text` into (host, path) without a URL parser: drop any scheme,
/// cut the query/fragment, and treat the first path segment as the host.
///
/// Used when `url::Url` rejects the input (spaces or other characters not
/// allowed in a host) so the record still gets a usable identity.
fn split_lexically(text: &str) -> Option<(String, String)> {
    let rest = match scheme_end(text) {
        Some(end) => &text[end..],
        None => text.trim_start_matches('/'),
    };
    let rest = rest.split(|c: char| c == '?' || c == '#').next().unwrap_or("");
    let (host, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if host.is_empty() {
        return None;
    }
    Some((
        host.to_lowercase(),
        path.trim_end_matches('/').to_string(),
    ))
}

/// Parse `text` as an absolute URL with a host, assuming `https://` when no
/// scheme is given (`www.x.com/y`, `instagram.com/user`).
fn parse_with_host(text: &str) -> Option<Url> {
    let parsed = if scheme_end(text).is_some() {
        Url::parse(text)
    } else {
        Url::parse(&format!("https://{}", text.trim_start_matches('/')))
    };
    match parsed {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Some(url),
        Ok(_) => None,
        Err(e) => {
            tracing::trace!(url = text, error = %e, "URL parser rejected input");
            None
        }
    }
}

/// `https://<lower-case host>[:port]<path>` with trailing slashes removed.
fn render_https(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let mut out = format!("https://{host}");
    // Ports 80/443 are implied by the scheme swap; keeping them would
    // break idempotence (http:443 -> https:443 -> https).
    if let Some(port) = url.port().filter(|p| *p != 80 && *p != 443) {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(url.path().trim_end_matches('/'));
    out
}

/// Canonicalise a profile URL to `https://<lower-case host><path>`.
///
/// The scheme is forced to https, query and fragment are dropped, default
/// ports are removed, and trailing slashes are stripped (a bare host has no
/// slash at all). When no scheme is present the first path segment is the
/// host. When no host can be found at all the trimmed input is returned
/// unchanged.
///
/// Idempotent: `canonicalize_url(&canonicalize_url(u)) == canonicalize_url(u)`.
pub fn canonicalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(url) = parse_with_host(trimmed) {
        let first = render_https(&url);
        // Non-special schemes leave the host opaque (percent-encoded only).
        // Reading it back as an https host applies IDNA and IPv4
        // normalisation, so the result is already in its final form.
        return match parse_with_host(&first) {
            Some(again) => render_https(&again),
            None => first,
        };
    }

    match split_lexically(trimmed) {
        Some((host, path)) => format!("https://{host}{path}"),
        None => trimmed.to_string(),
    }
}

/// Lower-case host of a (canonical) URL, when one can be found.
pub fn url_host(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse_with_host(trimmed) {
        Some(parsed) => parsed.host_str().map(str::to_ascii_lowercase),
        None => split_lexically(trimmed).map(|(host, _)| host),
    }
}

/// Path component of a (canonical) URL, "" when there is none.
pub fn url_path(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_with_host(trimmed) {
        Some(parsed) => parsed.path().to_string(),
        None => split_lexically(trimmed)
            .map(|(_, path)| path)
            .unwrap_or_default(),
    }
}

// =============================================================================
// Platform detection
// =============================================================================

/// Infer the platform id for a URL.
///
/// The URL host is looked up in the `Platform` host table; when it is not a
/// known host the declared platform label (trimmed, lower-cased) is used;
/// when neither resolves the result is "".
pub fn detect_platform(url: &str, declared_platform: &str) -> String {
    if let Some(platform) = url_host(url).as_deref().and_then(Platform::from_host) {
        return platform.id().to_string();
    }
    declared_platform.trim().to_lowercase()
}
