// LeadSift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;

// =============================================================================
// Raw record (input side)
// =============================================================================

/// One untyped scraper record. Keys are platform-specific and there is no
/// fixed schema; values may be nested (location objects in particular).
///
/// Insertion order is preserved (serde_json `preserve_order`), which keeps
/// flattened nested values in the order the scraper wrote them.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// Lead (normalised output)
// =============================================================================

/// One normalised, filterable social-media profile record.
///
/// Created once per raw record by `core::normalize`, optionally given a
/// mined phone number, then treated as immutable through dedup, filtering
/// and export. Field order here is the JSONL key order and matches the CSV
/// column order in `util::constants::CSV_COLUMNS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lead {
    /// Inferred platform: a `Platform` id, the declared platform label when
    /// the host is unknown, or empty.
    pub social_media: String,

    /// Raw platform label from the source, falling back to `social_media`.
    pub platform: String,

    /// Profile username, trimmed.
    pub handle: String,

    /// Display name, trimmed.
    pub display_name: String,

    /// `https://<host><path>` with no trailing slash, the trimmed original
    /// when the URL could not be parsed, or empty.
    pub canonical_url: String,

    /// Decoded follower count; 0 when unparseable.
    pub followers_int: u64,

    /// Biography text, trimmed.
    pub bio: String,

    pub verified_bool: bool,

    pub business_bool: bool,

    /// Best-effort single-line location.
    pub location: String,

    pub website: String,

    /// First syntactically valid email from the contact fields, or empty.
    pub email: String,

    /// First non-empty phone candidate (or mined from bio), or empty.
    pub phone: String,

    /// Links found inside `bio`, first-seen order, no exact duplicates.
    pub external_links: Vec<String>,

    // Reserved slots kept in the output schema; nothing populates them yet.
    pub linkedin_1: String,
    pub linkedin_2: String,
    pub linkedin_3: String,

    /// File name the record came from.
    pub source_file: String,
}

impl Lead {
    /// Case-insensitive text the keyword filter searches: handle, display
    /// name and bio joined by single spaces.
    pub fn keyword_haystack(&self) -> String {
        format!("{} {} {}", self.handle, self.display_name, self.bio).to_lowercase()
    }
}

// =============================================================================
// Platform
// =============================================================================

/// Platforms recognised from a profile URL's host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Twitter,
    Facebook,
    LinkedIn,
    YouTube,
}

impl Platform {
    /// Returns all variants in lookup order.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Instagram,
            Platform::Twitter,
            Platform::Facebook,
            Platform::LinkedIn,
            Platform::YouTube,
        ]
    }

    /// Lower-case identifier written to `Lead::social_media`.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::LinkedIn => "linkedin",
            Platform::YouTube => "youtube",
        }
    }

    /// Hosts (lower-case, no port) that identify this platform.
    pub fn hosts(&self) -> &'static [&'static str] {
        match self {
            Platform::Instagram => &[
                "instagram.com",
                "www.instagram.com",
                "m.instagram.com",
                "instagr.am",
            ],
            Platform::Twitter => &[
                "twitter.com",
                "www.twitter.com",
                "mobile.twitter.com",
                "x.com",
                "www.x.com",
            ],
            Platform::Facebook => &[
                "facebook.com",
                "www.facebook.com",
                "m.facebook.com",
                "fb.com",
                "www.fb.com",
            ],
            Platform::LinkedIn => &["linkedin.com", "www.linkedin.com"],
            Platform::YouTube => &[
                "youtube.com",
                "www.youtube.com",
                "m.youtube.com",
                "youtu.be",
            ],
        }
    }

    /// Look up the platform owning `host`. Matching is case-insensitive.
    pub fn from_host(host: &str) -> Option<Platform> {
        let host = host.to_ascii_lowercase();
        Platform::all()
            .iter()
            .copied()
            .find(|p| p.hosts().contains(&host.as_str()))
    }
}

// =============================================================================
// Run Summary
// =============================================================================

/// Counters for one pipeline run, logged at the end and used for the
/// summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files matched by discovery.
    pub files_discovered: usize,

    /// Files decoded successfully.
    pub files_loaded: usize,

    /// Files skipped because they could not be read or decoded.
    pub files_skipped: usize,

    /// Object records read across all loaded files.
    pub records_read: usize,

    /// Non-object values skipped inside otherwise valid files.
    pub records_skipped: usize,

    /// Leads whose empty phone was filled from the bio.
    pub phones_mined: usize,

    /// Leads dropped as repeats of an earlier identity key.
    pub duplicates_dropped: usize,

    /// Leads rejected by the filter configuration.
    pub filtered_out: usize,

    /// Leads written to both outputs.
    pub leads_exported: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_host_aliases() {
        assert_eq!(Platform::from_host("x.com"), Some(Platform::Twitter));
        assert_eq!(Platform::from_host("twitter.com"), Some(Platform::Twitter));
        assert_eq!(Platform::from_host("WWW.Instagram.com"), Some(Platform::Instagram));
        assert_eq!(Platform::from_host("youtu.be"), Some(Platform::YouTube));
        assert_eq!(Platform::from_host("tiktok.com"), None);
    }

    #[test]
    fn test_platform_ids_match_host_lookup() {
        for platform in Platform::all() {
            assert_eq!(platform.id(), platform.id().to_lowercase());
            for host in platform.hosts() {
                assert_eq!(Platform::from_host(host), Some(*platform), "host {host}");
            }
        }
    }

    #[test]
    fn test_keyword_haystack_is_lowercase() {
        let lead = Lead {
            handle: "TravelGuy".to_string(),
            display_name: "Ravi".to_string(),
            bio: "Himachal Based".to_string(),
            ..Default::default()
        };
        assert_eq!(lead.keyword_haystack(), "travelguy ravi himachal based");
    }

    #[test]
    fn test_lead_json_keeps_links_as_array() {
        let lead = Lead {
            external_links: vec!["https://a.com".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert!(json["external_links"].is_array());
        assert_eq!(json["linkedin_1"], "");
        assert_eq!(json["followers_int"], 0);
    }
}
