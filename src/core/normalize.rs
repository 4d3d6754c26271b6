// LeadSift - core/normalize.rs
//
// Record normaliser: turns one raw scraper record into one canonical Lead.
//
// Scrapers disagree on field names, so every Lead attribute is read through
// an ordered alias chain and the first present, non-empty value wins.
// Missing fields never fail; each attribute has a defined default.

use crate::core::coerce::{
    canonicalize_url, detect_platform, first_flag, first_text, first_truthy, followers_to_int,
    scalar_text,
};
use crate::core::contact::{extract_email, extract_phone, mine_phones_from_bio};
use crate::core::links::extract_external_links;
use crate::core::model::{Lead, RawRecord};
use crate::util::constants;
use serde_json::Value;

// =============================================================================
// Alias chains
// =============================================================================

pub const PLATFORM_KEYS: &[&str] = &["platform"];
pub const HANDLE_KEYS: &[&str] = &["username", "handle"];
pub const DISPLAY_NAME_KEYS: &[&str] = &["display_name", "name"];
pub const URL_KEYS: &[&str] = &["url", "profile_url"];
pub const BIO_KEYS: &[&str] = &["bio", "biography", "description"];
pub const FOLLOWER_KEYS: &[&str] = &["followers", "followers_count", "follower_count"];
pub const VERIFIED_KEYS: &[&str] = &["is_verified", "verified"];
pub const BUSINESS_KEYS: &[&str] = &["is_business_account", "business"];
pub const WEBSITE_KEYS: &[&str] = &["website", "external_url"];

/// Location candidates, most specific first. String values are used as-is;
/// object values (e.g. `{"city": .., "country": ..}`) are flattened.
pub const LOCATION_KEYS: &[&str] = &[
    "location",
    "location_name",
    "city",
    "region",
    "state",
    "country",
    "hometown",
    "place",
    "address",
    "geo",
];

// =============================================================================
// Normalisation
// =============================================================================

/// Build a Lead from one raw record. Pure; never fails.
pub fn normalize_record(record: &RawRecord, source_file: &str) -> Lead {
    let platform_raw = first_text(record, PLATFORM_KEYS).to_lowercase();
    let canonical_url = canonicalize_url(&first_text(record, URL_KEYS));
    let social_media = detect_platform(&canonical_url, &platform_raw);
    let bio = first_text(record, BIO_KEYS);
    let followers_int = first_truthy(record, FOLLOWER_KEYS).map_or(0, followers_to_int);
    let external_links = extract_external_links(&bio);

    let platform = if platform_raw.is_empty() {
        social_media.clone()
    } else {
        platform_raw
    };

    Lead {
        social_media,
        platform,
        handle: first_text(record, HANDLE_KEYS),
        display_name: first_text(record, DISPLAY_NAME_KEYS),
        canonical_url,
        followers_int,
        bio,
        verified_bool: first_flag(record, VERIFIED_KEYS),
        business_bool: first_flag(record, BUSINESS_KEYS),
        location: extract_location(record),
        website: first_text(record, WEBSITE_KEYS),
        email: extract_email(record),
        phone: extract_phone(record),
        external_links,
        linkedin_1: String::new(),
        linkedin_2: String::new(),
        linkedin_3: String::new(),
        source_file: source_file.to_string(),
    }
}

/// Best-effort location: the first `LOCATION_KEYS` entry holding a
/// non-blank string, or a non-empty object whose values flatten to at least
/// one part. Other value types are passed over.
pub fn extract_location(record: &RawRecord) -> String {
    LOCATION_KEYS
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(|value| match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Object(map) => {
                let mut parts = Vec::new();
                flatten_values(map.values(), &mut parts);
                (!parts.is_empty()).then(|| parts.join(constants::LOCATION_PART_SEPARATOR))
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// Collect the non-empty scalar text of every value, descending into nested
/// objects and arrays in document order.
fn flatten_values<'a>(values: impl Iterator<Item = &'a Value>, parts: &mut Vec<String>) {
    for value in values {
        match value {
            Value::Object(map) => flatten_values(map.values(), parts),
            Value::Array(items) => flatten_values(items.iter(), parts),
            other => parts.extend(scalar_text(other)),
        }
    }
}

/// Fill an empty phone from the bio. Returns true when a number was mined.
///
/// A Lead that already has a phone is never touched.
pub fn fill_phone_from_bio(lead: &mut Lead) -> bool {
    if !lead.phone.is_empty() {
        return false;
    }
    match mine_phones_from_bio(&lead.bio).into_iter().next() {
        Some(phone) => {
            tracing::debug!(
                handle = %lead.handle,
                source = %lead.source_file,
                "Phone mined from bio"
            );
            lead.phone = phone;
            true
        }
        None => false,
    }
}
