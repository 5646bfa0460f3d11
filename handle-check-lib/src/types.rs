//! Core data types for username availability probing.
//!
//! This module defines all the main data structures used throughout the library,
//! including probe outcomes, aggregated results, and configuration options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Three-way classification of a single platform probe.
///
/// Every probe yields exactly one verdict. Failures never escape a probe
/// task; they degrade to `Unknown` with a descriptive detail string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The username does not appear to be registered on the platform
    #[serde(rename = "available")]
    Available,

    /// The username appears to be registered on the platform
    #[serde(rename = "taken")]
    Taken,

    /// The probe could not produce a definitive answer
    #[serde(rename = "unknown")]
    Unknown,
}

/// Outcome of probing one platform for one username.
///
/// Created exactly once per probe task and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Registry id of the platform that was probed (e.g. "github")
    pub platform_id: String,

    /// The classification verdict for this probe
    pub verdict: Verdict,

    /// The resolved profile URL on success, or a human-readable
    /// failure description when the verdict is `Unknown` due to an error
    pub detail: String,
}

/// Aggregated result of one full username check.
///
/// The three sets partition the platform ids of the batch that was run:
/// every probed platform appears in exactly one of them. `BTreeSet` keeps
/// the ids lexicographically sorted for display and serialization, so
/// serialized results diff cleanly between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The username that was checked
    pub username: String,

    /// Capture time of the batch start (ISO-8601 in serialized form)
    pub timestamp: DateTime<Utc>,

    /// Platforms where the username appears to be available
    pub available: BTreeSet<String>,

    /// Platforms where the username appears to be registered
    pub taken: BTreeSet<String>,

    /// Platforms that could not be classified
    pub unknown: BTreeSet<String>,
}

impl CheckResult {
    /// Build a result by partitioning probe outcomes by verdict.
    pub fn from_outcomes(
        username: impl Into<String>,
        timestamp: DateTime<Utc>,
        outcomes: &[ProbeOutcome],
    ) -> Self {
        let mut result = Self {
            username: username.into(),
            timestamp,
            available: BTreeSet::new(),
            taken: BTreeSet::new(),
            unknown: BTreeSet::new(),
        };

        for outcome in outcomes {
            let set = match outcome.verdict {
                Verdict::Available => &mut result.available,
                Verdict::Taken => &mut result.taken,
                Verdict::Unknown => &mut result.unknown,
            };
            set.insert(outcome.platform_id.clone());
        }

        result
    }

    /// Total number of platforms covered by this result.
    pub fn total(&self) -> usize {
        self.available.len() + self.taken.len() + self.unknown.len()
    }
}

/// Result of a quick check over the major-platform subset.
///
/// Unknown platforms are reported through logging and streaming output
/// but are intentionally not retained here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCheckResult {
    /// The username that was checked
    pub username: String,

    /// Platforms where the username appears to be available
    pub available: BTreeSet<String>,

    /// Platforms where the username appears to be registered
    pub taken: BTreeSet<String>,
}

/// Configuration options for username probing operations.
///
/// This struct allows fine-tuning of probing behavior, including
/// concurrency, timeouts, and the per-probe courtesy delay.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Maximum number of concurrent platform probes
    /// Default: 5, Range: 1-50
    pub concurrency: usize,

    /// Timeout for each individual platform request
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Fixed delay each probe task waits before issuing its request,
    /// to reduce the chance of platform-side rate limiting.
    /// Per-task, not global. Default: 500ms
    pub courtesy_delay: Duration,

    /// User-Agent header sent with every probe request
    pub user_agent: String,

    /// Restrict checking to this subset of platform ids.
    /// If None, all registry platforms are probed.
    pub platforms: Option<Vec<String>>,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// These defaults are chosen to be polite to the probed platforms
    /// while keeping a full batch under a few seconds of wall time.
    fn default() -> Self {
        Self {
            concurrency: 5,
            request_timeout: Duration::from_secs(10),
            courtesy_delay: Duration::from_millis(500),
            user_agent: format!("handle-check/{}", env!("CARGO_PKG_VERSION")),
            platforms: None,
        }
    }
}

impl CheckConfig {
    /// Create a new configuration with custom concurrency.
    ///
    /// Automatically clamps concurrency to 1-50 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 50);
        self
    }

    /// Set custom timeout for individual platform requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the per-probe courtesy delay.
    pub fn with_courtesy_delay(mut self, delay: Duration) -> Self {
        self.courtesy_delay = delay;
        self
    }

    /// Set a custom User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Restrict checking to the given platform ids.
    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = Some(platforms);
        self
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Available => write!(f, "available"),
            Verdict::Taken => write!(f, "taken"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, verdict: Verdict) -> ProbeOutcome {
        ProbeOutcome {
            platform_id: id.to_string(),
            verdict,
            detail: String::new(),
        }
    }

    #[test]
    fn test_from_outcomes_partitions_by_verdict() {
        let outcomes = vec![
            outcome("github", Verdict::Available),
            outcome("reddit", Verdict::Taken),
            outcome("medium", Verdict::Unknown),
            outcome("devto", Verdict::Available),
        ];

        let result = CheckResult::from_outcomes("octocat", Utc::now(), &outcomes);

        assert_eq!(result.total(), 4);
        assert!(result.available.contains("github"));
        assert!(result.available.contains("devto"));
        assert!(result.taken.contains("reddit"));
        assert!(result.unknown.contains("medium"));
    }

    #[test]
    fn test_sets_are_lexicographically_ordered() {
        let outcomes = vec![
            outcome("zzz", Verdict::Available),
            outcome("aaa", Verdict::Available),
            outcome("mmm", Verdict::Available),
        ];

        let result = CheckResult::from_outcomes("user", Utc::now(), &outcomes);
        let ids: Vec<&String> = result.available.iter().collect();
        assert_eq!(ids, vec!["aaa", "mmm", "zzz"]);
    }

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.courtesy_delay, Duration::from_millis(500));
        assert!(config.user_agent.starts_with("handle-check/"));
        assert!(config.platforms.is_none());
    }

    #[test]
    fn test_concurrency_clamped() {
        assert_eq!(CheckConfig::default().with_concurrency(0).concurrency, 1);
        assert_eq!(CheckConfig::default().with_concurrency(500).concurrency, 50);
    }
}
