// LeadSift - core/contact.rs
//
// Contact extraction: email and phone from structured alias fields, plus an
// opt-in heuristic that mines a phone number out of the bio text.
//
// Emails are validated against a strict syntax; phones are not validated at
// all beyond whitespace cleanup. Bio mining is deliberately coarse and will
// accept some false positives.

use crate::core::coerce::{coerce_list, is_truthy};
use crate::core::model::RawRecord;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Email alias fields, in priority order.
pub const EMAIL_FIELDS: &[&str] = &[
    "email",
    "email_id",
    "emails",
    "contact_email",
    "business_email",
    "public_email",
];

/// Phone alias fields, in priority order.
pub const PHONE_FIELDS: &[&str] = &[
    "phone",
    "phone_number",
    "phones",
    "contact_phone",
    "mobile",
    "whatsapp",
    "business_phone",
];

/// Separator characters stripped from both ends of a mined phone match.
const PHONE_EDGE_CHARS: &[char] = &[' ', '-', '(', ')', '.'];

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b$")
            .expect("email regex is valid")
    })
}

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"))
}

/// Bio phone patterns in scan order: India-style mobiles first (optional
/// +91 / 0091 / leading 0, then ten digits starting 6-9), then a generic
/// international pattern of at least eight digits with loose separators.
fn bio_phone_regexes() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("bio phone regex is valid")
        }
        vec![
            re(r"(?:(?:\+|00)?91[\s\-()]*)?0?[6-9][0-9]{9}"),
            re(r"\+?[0-9](?:[\s\-.()]*[0-9]){7,}"),
        ]
    })
}

/// True when `candidate` is a syntactically valid email address.
pub fn is_valid_email(candidate: &str) -> bool {
    email_regex().is_match(candidate)
}

/// Collapse runs of whitespace to one space and trim.
fn collapse_whitespace(text: &str) -> String {
    whitespace_regex().replace_all(text, " ").trim().to_string()
}

/// Gather every candidate for `fields` in alias order. Falsy values
/// (`0`, `false`, blank strings, empty lists) contribute nothing.
fn candidates(record: &RawRecord, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .filter(|value| is_truthy(value))
        .flat_map(coerce_list)
        .collect()
}

/// Order-preserving de-duplication.
fn unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Pick the email for a record: the first candidate across `EMAIL_FIELDS`
/// that passes strict syntax validation, or "".
pub fn extract_email(record: &RawRecord) -> String {
    unique(
        candidates(record, EMAIL_FIELDS)
            .into_iter()
            .filter(|candidate| is_valid_email(candidate)),
    )
    .into_iter()
    .next()
    .unwrap_or_default()
}

/// Pick the phone for a record: the first non-empty, whitespace-collapsed
/// candidate across `PHONE_FIELDS`, or "". No format validation.
pub fn extract_phone(record: &RawRecord) -> String {
    unique(
        candidates(record, PHONE_FIELDS)
            .iter()
            .map(|candidate| collapse_whitespace(candidate))
            .filter(|candidate| !candidate.is_empty()),
    )
    .into_iter()
    .next()
    .unwrap_or_default()
}

/// Scan `bio` for phone-like substrings.
///
/// Matches from the India-style pattern come first, then the generic one.
/// Each match is whitespace-collapsed and stripped of surrounding separator
/// characters; duplicates are dropped.
pub fn mine_phones_from_bio(bio: &str) -> Vec<String> {
    if bio.trim().is_empty() {
        return Vec::new();
    }

    let hits = bio_phone_regexes().iter().flat_map(|pattern| {
        pattern
            .find_iter(bio)
            .map(|m| collapse_whitespace(m.as_str()).trim_matches(PHONE_EDGE_CHARS).to_string())
    });
    unique(hits.filter(|hit| !hit.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ravi.k+trips@mail.example.in"));
        assert!(is_valid_email("A@B.CO"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("contact: a@b.com"));
    }

    #[test]
    fn test_email_first_valid_across_aliases() {
        let rec = record(json!({
            "email": "n/a",
            "emails": ["bad", "hello@trips.in", "other@trips.in"],
            "business_email": "biz@trips.in",
        }));
        assert_eq!(extract_email(&rec), "hello@trips.in");
    }

    #[test]
    fn test_email_split_on_separators() {
        let rec = record(json!({"contact_email": "junk; second@x.com, third@y.com"}));
        assert_eq!(extract_email(&rec), "second@x.com");
    }

    #[test]
    fn test_email_missing() {
        assert_eq!(extract_email(&record(json!({"email": ""}))), "");
        assert_eq!(extract_email(&RawRecord::new()), "");
    }

    #[test]
    fn test_phone_not_validated_but_cleaned() {
        let rec = record(json!({"phone": "", "mobile": "  call   me\tmaybe ", "whatsapp": "+91 98765 43210"}));
        assert_eq!(extract_phone(&rec), "call me maybe");
    }

    #[test]
    fn test_phone_numeric_value() {
        let rec = record(json!({"phone_number": 9876543210u64}));
        assert_eq!(extract_phone(&rec), "9876543210");
    }

    #[test]
    fn test_falsy_alias_values_are_passed_over() {
        let rec = record(json!({"phone": 0, "mobile": "+91 98765 43210"}));
        assert_eq!(extract_phone(&rec), "+91 98765 43210");

        let rec = record(json!({"email": false, "emails": [], "public_email": "a@b.io"}));
        assert_eq!(extract_email(&rec), "a@b.io");
    }

    #[test]
    fn test_mine_india_mobile_first() {
        let hits = mine_phones_from_bio("Office +1 (415) 555-0100, WhatsApp +91 9876543210");
        assert_eq!(hits, vec!["+91 9876543210", "+1 (415) 555-0100"]);
    }

    #[test]
    fn test_mine_plain_indian_number() {
        let hits = mine_phones_from_bio("Bookings: 9876543210 (DM for rates)");
        assert_eq!(hits.first().map(String::as_str), Some("9876543210"));
    }

    #[test]
    fn test_mine_international() {
        let hits = mine_phones_from_bio("Call us at +44 20 7946 0958.");
        assert_eq!(hits, vec!["+44 20 7946 0958"]);
    }

    #[test]
    fn test_mine_nothing() {
        assert!(mine_phones_from_bio("").is_empty());
        assert!(mine_phones_from_bio("Since 2019, 12 countries").is_empty());
    }
}
