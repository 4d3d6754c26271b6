// LeadSift - core/links.rs
//
// Harvests outbound links from free-text biographies.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Characters trimmed from the end of a match: sentence punctuation that
/// the path pattern would otherwise swallow ("see www.x.com.").
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| {
        // Host: unreserved URL characters. Path: anything up to whitespace,
        // angle brackets, quotes, or a closing paren.
        Regex::new(r#"(?i)\b((?:https?://|www\.)[a-z0-9\-._~%]+(?:/[^\s<>"'\)]*)?)"#)
            .expect("bio link regex is valid")
    })
}

/// Extract the links mentioned in `bio`, in first-seen order.
///
/// Accepts `http://`, `https://` and bare `www.` prefixes; bare `www.`
/// links are given an `https://` scheme. Exact duplicates (after that
/// normalisation) are dropped. An empty bio yields an empty list.
pub fn extract_external_links(bio: &str) -> Vec<String> {
    if bio.trim().is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for caps in link_regex().captures_iter(bio) {
        let raw = caps[1].trim_end_matches(TRAILING_PUNCTUATION);
        if raw.is_empty() {
            continue;
        }
        let link = if raw.to_ascii_lowercase().starts_with("www.") {
            format!("https://{raw}")
        } else {
            raw.to_string()
        };
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    if !links.is_empty() {
        tracing::trace!(count = links.len(), "Links extracted from bio");
    }
    links
}
