//! Main username checker implementation.
//!
//! This module provides the primary `UsernameChecker` struct that
//! orchestrates availability probing: bounded concurrent fan-out over the
//! platform registry, per-platform response classification, and
//! aggregation into a partitioned result.

use crate::error::HandleCheckError;
use crate::registry::{self, ClassifyRule, PlatformRule};
use crate::transport::{HttpTransport, ProbeResponse, ReqwestTransport};
use crate::types::{CheckConfig, CheckResult, ProbeOutcome, QuickCheckResult, Verdict};
use crate::utils::validate_username;
use chrono::Utc;
use futures::stream::{Stream, StreamExt};
use std::collections::BTreeSet;
use std::pin::Pin;
use std::sync::Arc;

/// Main checker that coordinates username availability probing.
///
/// The `UsernameChecker` handles all aspects of a check:
/// - Bounded concurrent fan-out (one probe task per platform)
/// - Per-platform classification (status code or content match)
/// - Failure containment (a failing probe degrades to Unknown,
///   it never aborts sibling probes or the batch)
/// - Deterministic aggregation into a partitioned result
///
/// # Example
///
/// ```rust,no_run
/// use handle_check_lib::UsernameChecker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = UsernameChecker::new();
///     let result = checker.check_username("octocat").await?;
///     println!("available on {} platforms", result.available.len());
///     Ok(())
/// }
/// ```
pub struct UsernameChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Shared transport, reused across all probe tasks
    transport: Arc<dyn HttpTransport>,
}

impl UsernameChecker {
    /// Create a new checker with default configuration.
    ///
    /// Default settings:
    /// - Concurrency: 5
    /// - Request timeout: 10 seconds
    /// - Courtesy delay: 500ms per probe
    /// - All registry platforms
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_check_lib::{UsernameChecker, CheckConfig};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_concurrency(10)
    ///     .with_request_timeout(Duration::from_secs(5));
    ///
    /// let checker = UsernameChecker::with_config(config);
    /// ```
    pub fn with_config(config: CheckConfig) -> Self {
        let transport = ReqwestTransport::new(config.request_timeout, &config.user_agent)
            .expect("Failed to create HTTP transport");

        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Create a checker with an injected transport.
    ///
    /// This is the seam used by tests to substitute a stub transport;
    /// production callers normally use `new` or `with_config`.
    pub fn with_transport(config: CheckConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check one username against every active platform.
    ///
    /// Probes all platforms concurrently (bounded by the configured
    /// concurrency limit), waits for every probe to finish, and
    /// partitions the outcomes into available / taken / unknown sets.
    /// Individual probe failures are local: they surface as Unknown
    /// entries, never as an `Err` from this method.
    ///
    /// # Errors
    ///
    /// Returns `HandleCheckError` only for caller-input problems
    /// (invalid username, unknown platform id in the configured subset).
    pub async fn check_username(&self, username: &str) -> Result<CheckResult, HandleCheckError> {
        let timestamp = Utc::now();
        let outcomes: Vec<ProbeOutcome> = self.check_stream(username)?.collect().await;
        Ok(CheckResult::from_outcomes(
            username.trim(),
            timestamp,
            &outcomes,
        ))
    }

    /// Check a username and yield probe outcomes as they complete.
    ///
    /// Completion order follows the network, not the registry order; it
    /// is only significant for incremental progress display. Collecting
    /// the stream is equivalent to `check_username` minus the final
    /// partitioning.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futures::StreamExt;
    /// use handle_check_lib::UsernameChecker;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let checker = UsernameChecker::new();
    ///     let mut stream = checker.check_stream("octocat")?;
    ///     while let Some(outcome) = stream.next().await {
    ///         println!("{}: {}", outcome.platform_id, outcome.verdict);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn check_stream(
        &self,
        username: &str,
    ) -> Result<Pin<Box<dyn Stream<Item = ProbeOutcome> + Send + '_>>, HandleCheckError> {
        validate_username(username)?;
        let rules = self.active_rules()?;
        Ok(self.stream_rules(username.trim().to_string(), rules))
    }

    /// Run the per-platform algorithm over a caller-specified subset.
    ///
    /// A lighter-weight variant of `check_username` for quick mode:
    /// same probing and classification, but only the available and taken
    /// sets are retained. Unknown outcomes are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns `HandleCheckError` for an invalid username or an id not
    /// present in the registry.
    pub async fn quick_check(
        &self,
        username: &str,
        platform_ids: &[String],
    ) -> Result<QuickCheckResult, HandleCheckError> {
        validate_username(username)?;
        let rules = registry::rules_for(platform_ids)?;

        let outcomes: Vec<ProbeOutcome> = self
            .stream_rules(username.trim().to_string(), rules)
            .collect()
            .await;

        let mut available = BTreeSet::new();
        let mut taken = BTreeSet::new();

        for outcome in outcomes {
            match outcome.verdict {
                Verdict::Available => {
                    available.insert(outcome.platform_id);
                }
                Verdict::Taken => {
                    taken.insert(outcome.platform_id);
                }
                Verdict::Unknown => {
                    tracing::warn!(
                        platform = %outcome.platform_id,
                        detail = %outcome.detail,
                        "quick check could not classify platform"
                    );
                }
            }
        }

        Ok(QuickCheckResult {
            username: username.trim().to_string(),
            available,
            taken,
        })
    }

    /// Resolve the rules this checker probes: the configured subset if
    /// one was set, otherwise the full registry.
    fn active_rules(&self) -> Result<Vec<PlatformRule>, HandleCheckError> {
        match &self.config.platforms {
            Some(ids) => registry::rules_for(ids),
            None => Ok(registry::builtin_rules()),
        }
    }

    /// Fan out one probe task per rule, bounded by the concurrency limit.
    fn stream_rules(
        &self,
        username: String,
        rules: Vec<PlatformRule>,
    ) -> Pin<Box<dyn Stream<Item = ProbeOutcome> + Send + '_>> {
        let concurrency = self.config.concurrency.max(1);

        let stream = futures::stream::iter(rules)
            .map(move |rule| {
                let username = username.clone();
                async move { self.probe_one(&username, rule).await }
            })
            .buffer_unordered(concurrency);

        Box::pin(stream)
    }

    /// Probe a single platform. Never fails: every error is folded
    /// into an Unknown outcome at this boundary.
    async fn probe_one(&self, username: &str, rule: PlatformRule) -> ProbeOutcome {
        let url = rule.probe_url(username);

        // Per-task courtesy delay before touching the platform.
        if !self.config.courtesy_delay.is_zero() {
            tokio::time::sleep(self.config.courtesy_delay).await;
        }

        let fetched = tokio::time::timeout(
            self.config.request_timeout,
            self.transport.fetch(&url),
        )
        .await;

        let (verdict, detail) = match fetched {
            Ok(Ok(response)) => {
                let verdict = classify(&rule.classify, &response);
                tracing::debug!(
                    platform = %rule.id,
                    status = response.status,
                    verdict = %verdict,
                    "probe completed"
                );
                (verdict, url)
            }
            Ok(Err(e)) => {
                tracing::warn!(platform = %rule.id, error = %e, "probe failed");
                (Verdict::Unknown, probe_failure_detail(&rule.id, &e))
            }
            Err(_) => {
                let e = HandleCheckError::timeout(
                    format!("probe of '{}'", rule.id),
                    self.config.request_timeout,
                );
                tracing::warn!(platform = %rule.id, error = %e, "probe timed out");
                (Verdict::Unknown, probe_failure_detail(&rule.id, &e))
            }
        };

        ProbeOutcome {
            platform_id: rule.id,
            verdict,
            detail,
        }
    }
}

impl Default for UsernameChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a response according to a platform's rule.
///
/// For content matching, the available marker is checked first: a body
/// containing both markers classifies as Available. Do not reorder the
/// checks without re-verifying the affected platforms.
fn classify(rule: &ClassifyRule, response: &ProbeResponse) -> Verdict {
    match rule {
        ClassifyRule::StatusCode { available, taken } => {
            if response.status == *available {
                Verdict::Available
            } else if response.status == *taken {
                Verdict::Taken
            } else {
                Verdict::Unknown
            }
        }
        ClassifyRule::ContentMatch { available, taken } => {
            if response.body.contains(available) {
                Verdict::Available
            } else if response.body.contains(taken) {
                Verdict::Taken
            } else {
                Verdict::Unknown
            }
        }
    }
}

/// Build the human-readable detail string for a failed probe.
///
/// Always names the platform so failures remain attributable after
/// aggregation.
fn probe_failure_detail(platform: &str, error: &HandleCheckError) -> String {
    match error {
        HandleCheckError::Timeout { duration, .. } => {
            format!("{}: request timed out after {:?}", platform, duration)
        }
        HandleCheckError::NetworkError { .. } => {
            format!("{}: connection failed ({})", platform, error)
        }
        _ => format!("{}: {}", platform, error),
    }
}
