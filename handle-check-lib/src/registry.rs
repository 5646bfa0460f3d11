//! Built-in platform registry.
//!
//! This module provides the static table of platform probe rules: the
//! profile URL template for each platform and the classification method
//! that turns an HTTP response into a verdict.
//!
//! The registry is pure data. It performs no network access and is never
//! mutated after construction. Platform response semantics are external,
//! uncontrolled dependencies and can change without notice; the rules
//! here are best-effort heuristics, not a verified oracle.

use crate::error::HandleCheckError;

/// How a platform's HTTP response is classified into a verdict.
///
/// A closed set of two strategies, dispatched by a single classification
/// function in the checker. Kept as a tagged enum on purpose: there is no
/// open-ended hierarchy of classification methods.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyRule {
    /// Compare the HTTP status code against per-platform markers.
    StatusCode {
        /// Status indicating the username is not registered (typically 404)
        available: u16,
        /// Status indicating the username is registered (typically 200)
        taken: u16,
    },

    /// Search the response body for per-platform marker substrings.
    ///
    /// The available marker is checked first. If a body contains both
    /// markers, Available wins.
    ContentMatch {
        /// Substring present when the username is not registered
        available: String,
        /// Substring present when the username is registered
        taken: String,
    },
}

/// One entry in the platform registry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRule {
    /// Unique, case-sensitive platform id (stable across runs)
    pub id: String,

    /// Profile URL template with exactly one `{}` slot for the username
    pub url_template: String,

    /// Classification method and its parameters
    pub classify: ClassifyRule,
}

impl PlatformRule {
    /// Construct a status-code rule.
    pub fn status(
        id: impl Into<String>,
        url_template: impl Into<String>,
        available: u16,
        taken: u16,
    ) -> Self {
        Self {
            id: id.into(),
            url_template: url_template.into(),
            classify: ClassifyRule::StatusCode { available, taken },
        }
    }

    /// Construct a content-match rule.
    pub fn content(
        id: impl Into<String>,
        url_template: impl Into<String>,
        available: impl Into<String>,
        taken: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url_template: url_template.into(),
            classify: ClassifyRule::ContentMatch {
                available: available.into(),
                taken: taken.into(),
            },
        }
    }

    /// Resolve the probe URL by substituting the username into the template.
    ///
    /// No client-side encoding is applied; callers supply a pre-sanitized
    /// username (see `validate_username`).
    pub fn probe_url(&self, username: &str) -> String {
        self.url_template.replacen("{}", username, 1)
    }
}

/// Get the built-in platform probe rules.
///
/// Most platforms respond 404 for unregistered profile pages and 200 for
/// registered ones, so they use status-code classification. Platforms
/// that serve a 200 shell page regardless of profile existence use
/// content-match classification instead.
///
/// # Returns
///
/// An ordered vector of `PlatformRule` entries with unique ids.
pub fn builtin_rules() -> Vec<PlatformRule> {
    vec![
        // Developer platforms
        PlatformRule::status("github", "https://github.com/{}", 404, 200),
        PlatformRule::status("gitlab", "https://gitlab.com/{}", 404, 200),
        PlatformRule::status("devto", "https://dev.to/{}", 404, 200),
        // Social platforms
        PlatformRule::status("reddit", "https://www.reddit.com/user/{}", 404, 200),
        PlatformRule::status("instagram", "https://www.instagram.com/{}/", 404, 200),
        PlatformRule::status("pinterest", "https://www.pinterest.com/{}/", 404, 200),
        PlatformRule::content(
            "twitter",
            "https://x.com/{}",
            "This account doesn't exist",
            "profile_images",
        ),
        PlatformRule::content(
            "telegram",
            "https://t.me/{}",
            "noindex, nofollow",
            "tgme_page_title",
        ),
        // Media and streaming
        PlatformRule::status("youtube", "https://www.youtube.com/@{}", 404, 200),
        PlatformRule::content(
            "twitch",
            "https://www.twitch.tv/{}",
            "Sorry. Unless you've got a time machine, that content is unavailable.",
            "videos",
        ),
        PlatformRule::status("vimeo", "https://vimeo.com/{}", 404, 200),
        PlatformRule::status("soundcloud", "https://soundcloud.com/{}", 404, 200),
        PlatformRule::status("spotify", "https://open.spotify.com/user/{}", 404, 200),
        // Publishing and gaming
        PlatformRule::status("medium", "https://medium.com/@{}", 404, 200),
        PlatformRule::content(
            "steam",
            "https://steamcommunity.com/id/{}",
            "The specified profile could not be found",
            "profile_header",
        ),
    ]
}

/// Platform ids used by quick mode.
///
/// A curated subset of major platforms with reliable response semantics,
/// suitable for a fast first pass before a full check.
pub fn major_platform_ids() -> Vec<&'static str> {
    vec!["github", "instagram", "reddit", "twitter", "youtube"]
}

/// All platform ids in the built-in registry, sorted alphabetically.
///
/// Sorted for consistent user-facing listings.
pub fn all_platform_ids() -> Vec<String> {
    let mut ids: Vec<String> = builtin_rules().into_iter().map(|r| r.id).collect();
    ids.sort();
    ids
}

/// Look up rules for a caller-supplied list of platform ids.
///
/// Preserves the order of `ids`. Ids are case-sensitive, matching the
/// registry keys exactly.
///
/// # Errors
///
/// Returns `HandleCheckError::UnknownPlatform` for the first id not
/// present in the registry.
pub fn rules_for(ids: &[String]) -> Result<Vec<PlatformRule>, HandleCheckError> {
    let all = builtin_rules();
    let mut selected = Vec::with_capacity(ids.len());

    for id in ids {
        match all.iter().find(|r| &r.id == id) {
            Some(rule) => selected.push(rule.clone()),
            None => return Err(HandleCheckError::unknown_platform(id)),
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let rules = builtin_rules();
        let ids: HashSet<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), rules.len(), "registry ids must be unique");
    }

    #[test]
    fn test_templates_have_exactly_one_slot() {
        for rule in builtin_rules() {
            let slots = rule.url_template.matches("{}").count();
            assert_eq!(
                slots, 1,
                "template for '{}' must contain exactly one {{}} slot",
                rule.id
            );
        }
    }

    #[test]
    fn test_markers_are_non_empty() {
        for rule in builtin_rules() {
            match &rule.classify {
                ClassifyRule::StatusCode { available, taken } => {
                    assert_ne!(*available, 0, "status marker for '{}'", rule.id);
                    assert_ne!(*taken, 0, "status marker for '{}'", rule.id);
                }
                ClassifyRule::ContentMatch { available, taken } => {
                    assert!(!available.is_empty(), "content marker for '{}'", rule.id);
                    assert!(!taken.is_empty(), "content marker for '{}'", rule.id);
                }
            }
        }
    }

    #[test]
    fn test_major_ids_are_subset_of_registry() {
        let all: HashSet<String> = builtin_rules().into_iter().map(|r| r.id).collect();
        for id in major_platform_ids() {
            assert!(all.contains(id), "major platform '{}' not in registry", id);
        }
    }

    #[test]
    fn test_all_platform_ids_sorted() {
        let ids = all_platform_ids();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted, "ids should be returned in sorted order");
    }

    #[test]
    fn test_probe_url_substitution() {
        let rule = PlatformRule::status("github", "https://github.com/{}", 404, 200);
        assert_eq!(rule.probe_url("octocat"), "https://github.com/octocat");
    }

    #[test]
    fn test_rules_for_preserves_order() {
        let ids = vec!["reddit".to_string(), "github".to_string()];
        let rules = rules_for(&ids).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "reddit");
        assert_eq!(rules[1].id, "github");
    }

    #[test]
    fn test_rules_for_unknown_id() {
        let ids = vec!["github".to_string(), "myspace".to_string()];
        let err = rules_for(&ids).unwrap_err();
        assert!(matches!(
            err,
            HandleCheckError::UnknownPlatform { ref id } if id == "myspace"
        ));
    }
}
