//! Alternative handle generation.
//!
//! When a username turns out to be taken on the platforms that matter,
//! this module produces nearby alternatives: affix permutations,
//! separator variants, and digit suffixes. Generation is deterministic
//! so repeated runs suggest the same names.
//!
//! This is a presentation-layer helper consumed by the CLI. It has no
//! coupling into the probing engine; suggested names are plain strings
//! a caller can feed back into a checker if desired.

use crate::utils::validate_username;

/// Prefixes tried when building suggestions.
const PREFIXES: &[&str] = &["the", "real", "its"];

/// Suffixes tried when building suggestions.
const SUFFIXES: &[&str] = &["hq", "io", "dev", "app", "official"];

/// Generate up to `limit` alternative handles for a base username.
///
/// Variants are produced in a fixed order: separator variants first
/// (they stay closest to the original), then suffix and prefix
/// permutations, then digit suffixes. Every candidate is filtered
/// through `validate_username`, so suggestions never exceed platform
/// length limits or introduce rejected characters. The original
/// username is never suggested back.
pub fn suggest_handles(username: &str, limit: usize) -> Vec<String> {
    let base = username.trim();
    let mut suggestions = Vec::new();

    let push = |candidate: String, suggestions: &mut Vec<String>| {
        if suggestions.len() >= limit {
            return;
        }
        if candidate == base {
            return;
        }
        if validate_username(&candidate).is_err() {
            return;
        }
        if suggestions.contains(&candidate) {
            return;
        }
        suggestions.push(candidate);
    };

    // Separator variants
    push(format!("{}_", base), &mut suggestions);
    push(format!("_{}", base), &mut suggestions);
    push(base.replace('_', "."), &mut suggestions);
    push(base.replace('.', "_"), &mut suggestions);

    // Affix permutations
    for suffix in SUFFIXES {
        push(format!("{}{}", base, suffix), &mut suggestions);
        push(format!("{}_{}", base, suffix), &mut suggestions);
    }
    for prefix in PREFIXES {
        push(format!("{}{}", prefix, base), &mut suggestions);
    }

    // Digit suffixes
    for n in 1..=9 {
        push(format!("{}{}", base, n), &mut suggestions);
    }

    suggestions
}
