//! Handle Check CLI Application
//!
//! A command-line interface for checking username availability across web
//! platforms. This CLI application provides a user-friendly interface to
//! the handle-check-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use futures::StreamExt;
use handle_check_lib::{
    all_platform_ids, builtin_rules, load_env_config, major_platform_ids, suggest_handles,
    validate_username, CheckConfig, CheckResult, ConfigManager, FileConfig, ProbeOutcome,
    UsernameChecker, Verdict,
};
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for handle-check
#[derive(Parser, Debug)]
#[command(name = "handle-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sai Dutt G.V <gvs46@protonmail.com>")]
#[command(about = "Check username availability across web platforms")]
#[command(
    long_about = "Check whether a username is registered on a fixed set of web platforms.\n\nProbes all platforms concurrently, classifies each response, and reports\navailable / taken / unknown per platform."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Username to check (3-30 characters: letters, digits, '_', '.', '-')
    #[arg(value_name = "USERNAME", help_heading = "Selection")]
    pub username: Option<String>,

    /// Quick mode: check only the major platforms
    #[arg(short = 'q', long = "quick", help_heading = "Selection")]
    pub quick: bool,

    /// Platform ids to check (comma-separated or multiple -p flags)
    #[arg(short = 'p', long = "platforms", value_name = "ID", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Selection")]
    pub platforms: Option<Vec<String>>,

    /// List all known platform ids and exit
    #[arg(long = "list-platforms", help_heading = "Selection")]
    pub list_platforms: bool,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Enable grouped, structured output with section headers
    #[arg(long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Save the result as JSON to this file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output Format"
    )]
    pub output: Option<String>,

    /// Suggest alternative handles when the username is taken
    #[arg(long = "suggest", help_heading = "Output Format")]
    pub suggest: bool,

    /// Max concurrent platform probes (default: 5, max: 50)
    #[arg(
        short = 'c',
        long = "concurrency",
        default_value = "5",
        help_heading = "Performance"
    )]
    pub concurrency: usize,

    /// Per-request timeout (e.g. "10s", "30s")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show per-probe detail lines
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Error statistics for aggregated reporting
#[derive(Debug, Default)]
pub(crate) struct ErrorStats {
    pub(crate) timeouts: Vec<String>,
    pub(crate) network_errors: Vec<String>,
    pub(crate) ambiguous: Vec<String>,
    pub(crate) other_errors: Vec<String>,
}

impl ErrorStats {
    /// Categorize an Unknown outcome from its detail string.
    fn add_outcome(&mut self, outcome: &ProbeOutcome) {
        let detail = outcome.detail.to_lowercase();
        if detail.contains("timed out") || detail.contains("timeout") {
            self.timeouts.push(outcome.platform_id.clone());
        } else if detail.contains("connection")
            || detail.contains("network")
            || detail.contains("dns")
        {
            self.network_errors.push(outcome.platform_id.clone());
        } else if outcome.detail.starts_with("http") {
            // Probe succeeded but the response matched no marker
            self.ambiguous.push(outcome.platform_id.clone());
        } else {
            self.other_errors.push(outcome.platform_id.clone());
        }
    }

    fn has_errors(&self) -> bool {
        !self.timeouts.is_empty()
            || !self.network_errors.is_empty()
            || !self.ambiguous.is_empty()
            || !self.other_errors.is_empty()
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(&args);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Handle --list-platforms early
    if args.list_platforms {
        print_platforms();
        return;
    }

    // Run the check
    if let Err(e) = run_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize the tracing subscriber.
///
/// RUST_LOG wins when set; otherwise --verbose maps to debug-level
/// library logs and the default stays quiet.
fn init_tracing(args: &Args) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if args.verbose {
        "handle_check=debug,handle_check_lib=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // --list-platforms is self-contained, skip other validation
    if args.list_platforms {
        return Ok(());
    }

    // A username is required for everything else
    let username = match &args.username {
        Some(u) => u,
        None => return Err("You must specify a username to check".to_string()),
    };

    validate_username(username).map_err(|e| e.to_string())?;

    // Quick mode has a fixed platform set
    if args.quick && args.platforms.is_some() {
        return Err(
            "Cannot specify both --quick and --platforms. Quick mode always uses the major platforms"
                .to_string(),
        );
    }

    // Quick mode results are not persisted (only full results carry
    // the complete partition)
    if args.quick && args.output.is_some() {
        return Err("Cannot use --output with --quick. Run a full check to save results".to_string());
    }

    // JSON is a machine format; pretty decoration doesn't apply
    if args.json && args.pretty {
        return Err("Cannot specify both --json and --pretty".to_string());
    }

    // Validate concurrency
    if args.concurrency == 0 || args.concurrency > 50 {
        return Err("Concurrency must be between 1 and 50".to_string());
    }

    Ok(())
}

/// Print all known platform ids, then exit.
fn print_platforms() {
    use console::Style;

    let heading = Style::new().yellow().bold();
    let quick_style = Style::new().cyan();

    let major: Vec<&str> = major_platform_ids();

    println!();
    println!("{}", heading.apply_to("Known platforms:"));
    println!();

    for id in all_platform_ids() {
        if major.contains(&id.as_str()) {
            println!("  {} {}", id, quick_style.apply_to("(quick)"));
        } else {
            println!("  {}", id);
        }
    }

    println!();
    println!("Use: handle-check <username> -p <id>[,<id>...]");
}

/// Main checking logic
async fn run_check(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration from config files, environment, and CLI args
    let config = build_config(&args)?;

    tracing::debug!(
        concurrency = config.concurrency,
        timeout_secs = config.request_timeout.as_secs(),
        "resolved configuration"
    );

    let username = args
        .username
        .clone()
        .expect("validated: username is present");

    // Create the checker once; the transport pool is shared by all probes
    let checker = UsernameChecker::with_config(config);

    if args.quick {
        run_quick_check(&checker, &username).await
    } else {
        run_full_check(&checker, &username, &args).await
    }
}

/// Run quick mode over the major platforms.
async fn run_quick_check(
    checker: &UsernameChecker,
    username: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids: Vec<String> = major_platform_ids().into_iter().map(String::from).collect();

    let spinner = ui::Spinner::start(format!("Quick-checking '{}'...", username));
    let start_time = std::time::Instant::now();

    let result = checker.quick_check(username, &ids).await?;

    let duration = start_time.elapsed();
    if let Some(s) = spinner {
        s.stop().await;
    }

    for id in &result.available {
        println!(
            "  {}  {}",
            console::style(format!("{:<14}", id)).white(),
            console::style("AVAILABLE").green().bold()
        );
    }
    for id in &result.taken {
        println!(
            "  {}  {}",
            console::style(format!("{:<14}", id)).white(),
            console::style("TAKEN").red().bold()
        );
    }

    println!();
    ui::print_quick_summary(&result, duration);

    Ok(())
}

/// Run a full check with streaming progress output.
async fn run_full_check(
    checker: &UsernameChecker,
    username: &str,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let rule_count = match &checker.config().platforms {
        Some(ids) => ids.len(),
        None => builtin_rules().len(),
    };

    if args.pretty && !args.json {
        ui::print_header(username, rule_count, checker.config().concurrency);
    }

    // Spinner only in JSON mode, where no per-probe lines are printed
    let spinner = if args.json {
        ui::Spinner::start(format!("Checking '{}'...", username))
    } else {
        None
    };

    let timestamp = chrono::Utc::now();
    let start_time = std::time::Instant::now();

    // Stream outcomes so the user sees progress as probes complete
    let mut outcomes: Vec<ProbeOutcome> = Vec::with_capacity(rule_count);
    let mut error_stats = ErrorStats::default();

    {
        let mut stream = checker.check_stream(username)?;
        let mut completed = 0usize;

        while let Some(outcome) = stream.next().await {
            completed += 1;

            if outcome.verdict == Verdict::Unknown {
                error_stats.add_outcome(&outcome);
            }

            if !args.json {
                ui::print_outcome(&outcome, args.debug, Some((completed, rule_count)));
            }

            outcomes.push(outcome);
        }
    }

    let duration = start_time.elapsed();
    if let Some(s) = spinner {
        s.stop().await;
    }

    let result = CheckResult::from_outcomes(username, timestamp, &outcomes);

    // Display
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if args.pretty {
            println!();
            ui::print_grouped_results(&result, &outcomes);
        }

        println!();
        ui::print_summary(&result, duration);

        if error_stats.has_errors() {
            println!();
            ui::print_error_summary(&error_stats);
        }
    }

    // Persist
    if let Some(path) = &args.output {
        save_result(&result, path)?;
        if !args.json {
            eprintln!("Saved result to {}", path);
        }
    }

    // Suggestions for taken handles (human-readable output only)
    if args.suggest && !args.json && !result.taken.is_empty() {
        let suggestions = suggest_handles(username, 8);
        ui::print_suggestions(&suggestions);
    }

    Ok(())
}

/// Serialize a CheckResult to a JSON file.
///
/// Pretty-printed with a trailing newline; struct field order plus the
/// sorted sets make the output reproducible between runs.
fn save_result(result: &CheckResult, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, format!("{}\n", json))
        .map_err(|e| format!("cannot write '{}': {}", path, e))?;
    Ok(())
}

/// Build CheckConfig from CLI arguments with config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (HC_*)
/// 3. Local config file (./.handle-check.toml)
/// 4. Global config file (~/.handle-check.toml)
/// 5. XDG config file (~/.config/handle-check/config.toml)
/// 6. Built-in defaults
fn build_config(args: &Args) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();

    // Create config manager for file discovery
    let config_manager = ConfigManager::new(args.verbose);

    // Step 1: Determine config file path and load config files
    let file_config = if let Some(explicit_config_path) = &args.config {
        config_manager
            .load_file(explicit_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_config_path, e))?
    } else if let Ok(env_config_path) = std::env::var("HC_CONFIG") {
        config_manager
            .load_file(&env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?
    } else {
        // Automatic discovery; silently fall back to defaults when no
        // config file exists
        config_manager.discover_and_load().unwrap_or_default()
    };

    config = merge_file_config(config, file_config);

    // Step 2: Apply environment variables (HC_*)
    config = apply_environment_config(config, args.verbose);

    // Step 3: Apply CLI arguments (highest precedence)
    config = apply_cli_args_to_config(config, args)?;

    Ok(config)
}

/// Merge FileConfig into CheckConfig
fn merge_file_config(mut config: CheckConfig, file_config: FileConfig) -> CheckConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            config.concurrency = concurrency.clamp(1, 50);
        }
        if let Some(timeout_str) = defaults.timeout {
            if let Ok(timeout_secs) = parse_timeout_string(&timeout_str) {
                config.request_timeout = Duration::from_secs(timeout_secs);
            }
        }
        if let Some(delay_ms) = defaults.courtesy_delay_ms {
            config.courtesy_delay = Duration::from_millis(delay_ms);
        }
        if let Some(platforms) = defaults.platforms {
            config.platforms = Some(platforms);
        }
    }

    config
}

/// Apply HC_* environment variables to config.
fn apply_environment_config(mut config: CheckConfig, verbose: bool) -> CheckConfig {
    let env_config = load_env_config(verbose);

    if let Some(concurrency) = env_config.concurrency {
        config.concurrency = concurrency.clamp(1, 50);
    }

    if let Some(timeout_str) = &env_config.timeout {
        if let Ok(timeout_secs) = parse_timeout_string(timeout_str) {
            config.request_timeout = Duration::from_secs(timeout_secs);
        }
    }

    if let Some(platforms) = env_config.platforms {
        config.platforms = Some(platforms);
    }

    config
}

/// Apply CLI arguments to config (highest precedence).
///
/// CLI args override both environment variables and config file settings.
fn apply_cli_args_to_config(
    mut config: CheckConfig,
    args: &Args,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    // Only override concurrency if explicitly provided by user.
    // We can't easily detect if the clap default was used, so we check
    // against the default value; explicit same-as-default still counts
    // as explicit.
    if args.concurrency != 5 {
        config.concurrency = args.concurrency;
    }

    if let Some(timeout_str) = &args.timeout {
        let timeout_secs = parse_timeout_string(timeout_str)
            .map_err(|_| format!("Invalid --timeout value '{}'", timeout_str))?;
        config.request_timeout = Duration::from_secs(timeout_secs);
    }

    // Platform subset: CLI explicit > env > config file (already applied)
    if args.platforms.is_some() {
        config.platforms = args.platforms.clone();
    }

    Ok(config)
}

/// Parse timeout string like "5s", "30s", "2m" into seconds
fn parse_timeout_string(timeout_str: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if timeout_str.ends_with('s') {
        timeout_str
            .strip_suffix('s')
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| "Invalid timeout format".into())
    } else if timeout_str.ends_with('m') {
        timeout_str
            .strip_suffix('m')
            .and_then(|s| s.parse::<u64>().ok())
            .map(|m| m * 60)
            .ok_or_else(|| "Invalid timeout format".into())
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().map_err(|e| e.into())
    }
}

// handle-check/src/main.rs tests module

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function with all required fields
    fn create_test_args() -> Args {
        Args {
            username: Some("octocat".to_string()),
            quick: false,
            platforms: None,
            list_platforms: false,
            json: false,
            pretty: false,
            output: None,
            suggest: false,
            concurrency: 5,
            timeout: None,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_args_requires_username() {
        let mut args = create_test_args();
        args.username = None;

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("username"));
    }

    #[test]
    fn test_validate_args_rejects_invalid_username() {
        let mut args = create_test_args();
        args.username = Some("ab".to_string());
        assert!(validate_args(&args).is_err());

        args.username = Some("has spaces".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_quick_and_platforms_conflict() {
        let mut args = create_test_args();
        args.quick = true;
        args.platforms = Some(vec!["github".to_string()]);

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--quick"));
    }

    #[test]
    fn test_validate_args_quick_and_output_conflict() {
        let mut args = create_test_args();
        args.quick = true;
        args.output = Some("out.json".to_string());

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--output"));
    }

    #[test]
    fn test_validate_args_json_and_pretty_conflict() {
        let mut args = create_test_args();
        args.json = true;
        args.pretty = true;

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_concurrency_bounds() {
        let mut args = create_test_args();
        args.concurrency = 0;
        assert!(validate_args(&args).is_err());

        args.concurrency = 51;
        assert!(validate_args(&args).is_err());

        args.concurrency = 50;
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_list_platforms_skips_username_check() {
        let mut args = create_test_args();
        args.username = None;
        args.list_platforms = true;

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("5s").unwrap(), 5);
        assert_eq!(parse_timeout_string("30s").unwrap(), 30);
        assert_eq!(parse_timeout_string("2m").unwrap(), 120);
        assert_eq!(parse_timeout_string("10").unwrap(), 10);
        assert!(parse_timeout_string("abc").is_err());
        assert!(parse_timeout_string("s").is_err());
    }

    #[test]
    fn test_cli_concurrency_overrides_config() {
        let mut args = create_test_args();
        args.concurrency = 12;

        let config = apply_cli_args_to_config(CheckConfig::default(), &args).unwrap();
        assert_eq!(config.concurrency, 12);
    }

    #[test]
    fn test_cli_default_concurrency_preserves_config() {
        // When the CLI value equals the clap default, a config-file or
        // env setting must survive.
        let args = create_test_args(); // concurrency: 5 (default)
        let base = CheckConfig::default().with_concurrency(20);

        let config = apply_cli_args_to_config(base, &args).unwrap();
        assert_eq!(config.concurrency, 20);
    }

    #[test]
    fn test_cli_platforms_override() {
        let mut args = create_test_args();
        args.platforms = Some(vec!["github".to_string(), "reddit".to_string()]);

        let config = apply_cli_args_to_config(CheckConfig::default(), &args).unwrap();
        assert_eq!(
            config.platforms,
            Some(vec!["github".to_string(), "reddit".to_string()])
        );
    }

    #[test]
    fn test_cli_invalid_timeout_is_an_error() {
        let mut args = create_test_args();
        args.timeout = Some("soon".to_string());

        assert!(apply_cli_args_to_config(CheckConfig::default(), &args).is_err());
    }

    #[test]
    fn test_merge_file_config_defaults() {
        use handle_check_lib::DefaultsConfig;

        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(8),
                timeout: Some("5s".to_string()),
                courtesy_delay_ms: Some(100),
                platforms: Some(vec!["github".to_string()]),
                pretty: None,
            }),
        };

        let config = merge_file_config(CheckConfig::default(), file_config);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.courtesy_delay, Duration::from_millis(100));
        assert_eq!(config.platforms, Some(vec!["github".to_string()]));
    }

    #[test]
    fn test_merge_file_config_empty_keeps_defaults() {
        let config = merge_file_config(CheckConfig::default(), FileConfig::default());
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_error_stats_categorization() {
        let mut stats = ErrorStats::default();

        stats.add_outcome(&ProbeOutcome {
            platform_id: "github".to_string(),
            verdict: Verdict::Unknown,
            detail: "github: request timed out after 10s".to_string(),
        });
        stats.add_outcome(&ProbeOutcome {
            platform_id: "reddit".to_string(),
            verdict: Verdict::Unknown,
            detail: "reddit: connection failed (Network error: refused)".to_string(),
        });
        stats.add_outcome(&ProbeOutcome {
            platform_id: "twitch".to_string(),
            verdict: Verdict::Unknown,
            detail: "https://www.twitch.tv/someuser".to_string(),
        });

        assert_eq!(stats.timeouts, vec!["github".to_string()]);
        assert_eq!(stats.network_errors, vec!["reddit".to_string()]);
        assert_eq!(stats.ambiguous, vec!["twitch".to_string()]);
        assert!(stats.has_errors());
    }

    #[test]
    fn test_error_stats_empty() {
        let stats = ErrorStats::default();
        assert!(!stats.has_errors());
    }
}
