//! Display logic for the handle-check CLI.
//!
//! This module handles all console output: colored result lines,
//! grouped `--pretty` output, spinner animation, progress counters,
//! headers, and summaries. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use handle_check_lib::{CheckResult, ProbeOutcome, QuickCheckResult, Verdict};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::ErrorStats;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message.
    ///
    /// Returns None when stderr is not a terminal.
    pub fn start(message: String) -> Option<Self> {
        if !Term::stderr().is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(username: &str, platform_count: usize, concurrency: usize) {
    println!(
        "{} {} {}",
        style("handle-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking '{}' on {} platform{}",
            username,
            platform_count,
            if platform_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!("{}", style(format!("Concurrency: {}", concurrency)).dim());
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Format and print a single probe outcome with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/15]`
/// is shown.
pub fn print_outcome(outcome: &ProbeOutcome, debug: bool, counter: Option<(usize, usize)>) {
    let platform_width = 14;
    let padded = pad_str(&outcome.platform_id, platform_width, Alignment::Left, None);

    let prefix = match counter {
        Some((cur, total)) => {
            format!("{} ", style(format!("[{}/{}]", cur, total)).dim())
        }
        None => String::new(),
    };

    match outcome.verdict {
        Verdict::Available => {
            println!(
                "  {}{}  {}",
                prefix,
                style(&padded).white(),
                style("AVAILABLE").green().bold(),
            );
        }
        Verdict::Taken => {
            println!(
                "  {}{}  {}      {}",
                prefix,
                style(&padded).white(),
                style("TAKEN").red().bold(),
                style(&outcome.detail).dim(),
            );
        }
        Verdict::Unknown => {
            println!(
                "  {}{}  {}    {}",
                prefix,
                style(&padded).white(),
                style("UNKNOWN").yellow(),
                style(brief_reason(outcome)).dim(),
            );
        }
    }

    if debug && outcome.verdict != Verdict::Unknown {
        println!("    {} {}", style("└─").dim(), style(&outcome.detail).dim());
    }
}

// ── Grouped batch output ─────────────────────────────────────────────────────

/// Print a full result grouped by verdict: Available, Taken, Unknown.
/// Empty sections are omitted entirely. Sets iterate in lexicographic
/// order, so output is stable across runs.
pub fn print_grouped_results(result: &CheckResult, outcomes: &[ProbeOutcome]) {
    if !result.available.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Available ({}) ", result.available.len()))
                .green()
                .bold(),
            style("─".repeat(40)).green().dim(),
        );
        for id in &result.available {
            println!("    {}", style(id).white());
        }
        println!();
    }

    if !result.taken.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Taken ({}) ", result.taken.len())).red().bold(),
            style("─".repeat(44)).red().dim(),
        );
        for id in &result.taken {
            let url = outcomes
                .iter()
                .find(|o| &o.platform_id == id)
                .map(|o| o.detail.as_str())
                .unwrap_or("");
            println!("    {}  {}", style(id).white(), style(url).dim());
        }
        println!();
    }

    if !result.unknown.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Unknown ({}) ", result.unknown.len()))
                .yellow()
                .bold(),
            style("─".repeat(40)).yellow().dim(),
        );
        for id in &result.unknown {
            let reason = outcomes
                .iter()
                .find(|o| &o.platform_id == id)
                .map(brief_reason)
                .unwrap_or("(unknown status)");
            println!("    {}  {}", style(id).white(), style(reason).dim());
        }
        println!();
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(result: &CheckResult, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} platform{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(result.total()).bold(),
        if result.total() == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", result.available.len())).green(),
        style("|").dim(),
        style(format!("{} taken", result.taken.len())).red(),
        style("|").dim(),
        style(format!("{} unknown", result.unknown.len())).yellow(),
    );
}

/// Print the summary for a quick check.
pub fn print_quick_summary(result: &QuickCheckResult, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  quick check in {:.1}s  {}  {}  {}  {}",
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", result.available.len())).green(),
        style("|").dim(),
        style(format!("{} taken", result.taken.len())).red(),
    );
}

// ── Error summary ────────────────────────────────────────────────────────────

/// Print a categorized error summary using colors.
pub fn print_error_summary(error_stats: &ErrorStats) {
    if !error_stats.has_errors() {
        return;
    }

    println!(
        "  {}",
        style("Some platforms could not be checked:").yellow()
    );

    let format_list = |platforms: &[String], max_show: usize| -> String {
        if platforms.len() <= max_show {
            platforms.join(", ")
        } else {
            let shown = &platforms[..max_show];
            let remaining = platforms.len() - max_show;
            format!("{}, ... and {} more", shown.join(", "), remaining)
        }
    };

    if !error_stats.timeouts.is_empty() {
        println!(
            "  {} {} timeout{}: {}",
            style("•").dim(),
            error_stats.timeouts.len(),
            if error_stats.timeouts.len() == 1 { "" } else { "s" },
            format_list(&error_stats.timeouts, 5),
        );
    }
    if !error_stats.network_errors.is_empty() {
        println!(
            "  {} {} network error{}: {}",
            style("•").dim(),
            error_stats.network_errors.len(),
            if error_stats.network_errors.len() == 1 { "" } else { "s" },
            format_list(&error_stats.network_errors, 5),
        );
    }
    if !error_stats.ambiguous.is_empty() {
        println!(
            "  {} {} ambiguous response{}: {}",
            style("•").dim(),
            error_stats.ambiguous.len(),
            if error_stats.ambiguous.len() == 1 { "" } else { "s" },
            format_list(&error_stats.ambiguous, 5),
        );
    }
    if !error_stats.other_errors.is_empty() {
        println!(
            "  {} {} other error{}: {}",
            style("•").dim(),
            error_stats.other_errors.len(),
            if error_stats.other_errors.len() == 1 { "" } else { "s" },
            format_list(&error_stats.other_errors, 5),
        );
    }
}

// ── Suggestions ──────────────────────────────────────────────────────────────

/// Print alternative handle suggestions.
pub fn print_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }

    println!();
    println!("  {}", style("Alternative handles to try:").bold());
    for suggestion in suggestions {
        println!("    {}", style(suggestion).cyan());
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Extract a brief reason from an Unknown outcome's detail string.
fn brief_reason(outcome: &ProbeOutcome) -> &'static str {
    let detail = outcome.detail.to_lowercase();
    if detail.contains("timed out") || detail.contains("timeout") {
        "(timeout)"
    } else if detail.contains("connection") || detail.contains("network") || detail.contains("dns")
    {
        "(network error)"
    } else if detail.starts_with("http") {
        // A resolved URL as detail means the response itself was ambiguous
        "(ambiguous response)"
    } else {
        "(error)"
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
