// LeadSift - core/dedup.rs
//
// Identity-key deduplication. First occurrence wins; survivor order equals
// first-seen order in the input.

use crate::core::model::Lead;
use std::collections::HashSet;

/// Stable identity of a Lead for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Platform plus canonical URL.
    Url { platform: String, url: String },
    /// Platform plus lower-cased handle, used when there is no URL.
    Handle { platform: String, handle: String },
}

impl IdentityKey {
    /// Derive the key for `lead`.
    ///
    /// Returns `None` when the Lead has neither a canonical URL nor a
    /// handle; such Leads are never treated as duplicates of anything.
    pub fn for_lead(lead: &Lead) -> Option<IdentityKey> {
        if !lead.canonical_url.is_empty() {
            return Some(IdentityKey::Url {
                platform: lead.social_media.clone(),
                url: lead.canonical_url.clone(),
            });
        }
        let handle = lead.handle.trim();
        if !handle.is_empty() {
            return Some(IdentityKey::Handle {
                platform: lead.social_media.clone(),
                handle: handle.to_lowercase(),
            });
        }
        None
    }
}

/// Drop Leads whose identity key was already seen.
///
/// Returns the survivors and the number of Leads dropped.
pub fn dedupe(leads: Vec<Lead>) -> (Vec<Lead>, usize) {
    let total = leads.len();
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity(total);

    let survivors: Vec<Lead> = leads
        .into_iter()
        .filter(|lead| match IdentityKey::for_lead(lead) {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect();

    let dropped = total - survivors.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = survivors.len(), "Duplicate leads removed");
    }
    (survivors, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(social: &str, url: &str, handle: &str, source: &str) -> Lead {
        Lead {
            social_media: social.to_string(),
            canonical_url: url.to_string(),
            handle: handle.to_string(),
            source_file: source.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_same_platform_and_url_collapse_keeping_first() {
        let leads = vec![
            lead("instagram", "https://instagram.com/a", "a", "first.json"),
            lead("instagram", "https://instagram.com/a", "a_again", "second.json"),
        ];
        let (kept, dropped) = dedupe(leads);
        assert_eq!(dropped, 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_file, "first.json");
    }

    #[test]
    fn test_same_url_different_platform_kept() {
        let leads = vec![
            lead("instagram", "https://example.com/a", "", "1.json"),
            lead("tiktok", "https://example.com/a", "", "2.json"),
        ];
        let (kept, dropped) = dedupe(leads);
        assert_eq!(dropped, 0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_handle_fallback_is_case_insensitive() {
        let leads = vec![
            lead("twitter", "", "Ravi", "1.json"),
            lead("twitter", "", "ravi", "2.json"),
            lead("instagram", "", "ravi", "3.json"),
        ];
        let (kept, dropped) = dedupe(leads);
        assert_eq!(dropped, 1);
        let sources: Vec<_> = kept.iter().map(|l| l.source_file.as_str()).collect();
        assert_eq!(sources, vec!["1.json", "3.json"]);
    }

    #[test]
    fn test_keyless_leads_always_kept() {
        let leads = vec![
            lead("instagram", "", "", "1.json"),
            lead("instagram", "", "", "1.json"),
        ];
        let (kept, dropped) = dedupe(leads);
        assert_eq!(dropped, 0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_order_is_first_seen() {
        let leads = vec![
            lead("x", "https://c.com", "", "c"),
            lead("x", "https://a.com", "", "a"),
            lead("x", "https://c.com", "", "c2"),
            lead("x", "https://b.com", "", "b"),
        ];
        let (kept, _) = dedupe(leads);
        let sources: Vec<_> = kept.iter().map(|l| l.source_file.as_str()).collect();
        assert_eq!(sources, vec!["c", "a", "b"]);
    }
}
