//! # Handle Check Library
//!
//! A fast, robust library for probing username availability across web platforms.
//!
//! This library issues one HTTP request per platform concurrently, classifies
//! each response with a per-platform rule, tolerates partial failure without
//! aborting the batch, and aggregates outcomes deterministically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use handle_check_lib::{UsernameChecker, CheckConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = UsernameChecker::new();
//!     let result = checker.check_username("octocat").await?;
//!
//!     println!(
//!         "{}: {} available / {} taken / {} unknown",
//!         result.username,
//!         result.available.len(),
//!         result.taken.len(),
//!         result.unknown.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Concurrent Probing**: bounded parallel fan-out over all platforms
//! - **Two Classification Methods**: status-code and content-match rules
//! - **Failure Containment**: a failing probe degrades to Unknown, never
//!   aborting sibling probes
//! - **Injected Transport**: swap the HTTP layer for a stub in tests
//! - **Configurable**: concurrency, timeouts, courtesy delay, platform subsets

// Re-export main public API types and functions
// This makes them available as handle_check_lib::TypeName
pub use checker::UsernameChecker;
pub use config::{load_env_config, ConfigManager, DefaultsConfig, EnvConfig, FileConfig};
pub use error::HandleCheckError;
pub use registry::{
    all_platform_ids, builtin_rules, major_platform_ids, rules_for, ClassifyRule, PlatformRule,
};
pub use suggest::suggest_handles;
pub use transport::{HttpTransport, ProbeResponse, ReqwestTransport};
pub use types::{
    CheckConfig, CheckResult, ProbeOutcome, QuickCheckResult, Verdict,
};
pub use utils::{validate_username, MAX_USERNAME_LEN, MIN_USERNAME_LEN};

// Internal modules - these are not part of the public API surface
// beyond the re-exports above
mod checker;
mod config;
mod error;
mod registry;
mod suggest;
mod transport;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, HandleCheckError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
