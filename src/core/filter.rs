// LeadSift - core/filter.rs
//
// Rule-based lead filter. All active criteria are AND-combined.
// Core layer: pure logic, no I/O. Also owns the parsers for the
// comma-separated option strings accepted on the command line.

use crate::core::coerce::{parse_follower_text, url_path};
use crate::core::model::Lead;
use std::collections::{HashMap, HashSet};

/// Complete filter configuration. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Reject Leads with no handle whose canonical URL has no path beyond "/".
    pub profiles_only: bool,

    /// Platform ids to include, lower-case (empty = all).
    pub include_platforms: HashSet<String>,

    /// Per-platform follower floors; platforms not listed have floor 0.
    pub min_followers: HashMap<String, u64>,

    /// Reject Leads that are not verified.
    pub verified_only: bool,

    /// Keywords of which at least one must occur (case-insensitive) in the
    /// handle, display name or bio (empty = no keyword filter).
    pub keywords_any: Vec<String>,
}

impl FilterConfig {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        !self.profiles_only
            && self.include_platforms.is_empty()
            && self.min_followers.values().all(|floor| *floor == 0)
            && !self.verified_only
            && self.keywords_any.is_empty()
    }

    /// Follower floor for a platform id.
    pub fn floor_for(&self, platform: &str) -> u64 {
        self.min_followers.get(platform).copied().unwrap_or(0)
    }
}

/// Filter `leads` preserving order, returning the survivors and the number
/// rejected.
pub fn apply_filters(leads: Vec<Lead>, filter: &FilterConfig) -> (Vec<Lead>, usize) {
    if filter.is_empty() {
        return (leads, 0);
    }

    let keywords: Vec<String> = filter
        .keywords_any
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    let total = leads.len();
    let kept: Vec<Lead> = leads
        .into_iter()
        .filter(|lead| matches_all(lead, filter, &keywords))
        .collect();
    let rejected = total - kept.len();

    tracing::debug!(kept = kept.len(), rejected, "Filters applied");
    (kept, rejected)
}

/// Check a single Lead against every active criterion.
///
/// `keywords_lower` is `filter.keywords_any` lower-cased once by the caller.
pub fn matches_all(lead: &Lead, filter: &FilterConfig, keywords_lower: &[String]) -> bool {
    // Profiles only: a handle, or a URL pointing below the site root.
    if filter.profiles_only
        && lead.handle.is_empty()
        && url_path(&lead.canonical_url).trim_matches('/').is_empty()
    {
        return false;
    }

    // Platform allow-list
    if !filter.include_platforms.is_empty()
        && !filter.include_platforms.contains(&lead.social_media)
    {
        return false;
    }

    // Per-platform follower floor
    if lead.followers_int < filter.floor_for(&lead.social_media) {
        return false;
    }

    if filter.verified_only && !lead.verified_bool {
        return false;
    }

    // Any-keyword match (case-insensitive substring)
    if !keywords_lower.is_empty() {
        let haystack = lead.keyword_haystack();
        if !keywords_lower.iter().any(|k| haystack.contains(k.as_str())) {
            return false;
        }
    }

    true
}

// =============================================================================
// Option-string parsers
// =============================================================================

/// Split a comma list, trimming parts and dropping empties.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|part| !part.is_empty())
}

/// `"instagram, Twitter"` -> {"instagram", "twitter"}.
pub fn parse_platform_list(raw: &str) -> HashSet<String> {
    split_list(raw).map(str::to_lowercase).collect()
}

/// `"travel, himachal"` -> ["travel", "himachal"]. Case is preserved;
/// matching lower-cases at filter time.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    split_list(raw).map(str::to_string).collect()
}

/// `"instagram:5000,twitter:2k"` -> {"instagram": 5000, "twitter": 2000}.
///
/// Platform names are lower-cased. Pairs without a `:` are ignored. Values
/// accept follower shorthand; anything unparseable becomes 0.
pub fn parse_min_followers(raw: &str) -> HashMap<String, u64> {
    split_list(raw)
        .filter_map(|pair| {
            let (platform, value) = pair.split_once(':')?;
            let platform = platform.trim().to_lowercase();
            if platform.is_empty() {
                return None;
            }
            Some((platform, parse_follower_text(value)))
        })
        .collect()
}
