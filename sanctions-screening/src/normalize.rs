//! Name normalization and variant generation

use std::collections::BTreeSet;

/// Normalize a name for comparison.
///
/// Lowercases, turns commas and periods into spaces and collapses all
/// whitespace runs into single spaces. Idempotent.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace([',', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate the comparison variants of a name.
///
/// Single-character tokens (initials) are dropped first. From the remaining
/// tokens: original order, reversed order (2+ tokens), first+last and
/// last+first (3+ tokens). A name that normalizes to nothing has no variants;
/// a name made only of initials yields the single empty variant.
pub fn name_variants(name: &str) -> BTreeSet<String> {
    let normalized = normalize(name);
    let mut variants = BTreeSet::new();
    if normalized.is_empty() {
        return variants;
    }

    let parts: Vec<&str> = normalized
        .split(' ')
        .filter(|part| part.chars().count() > 1)
        .collect();

    variants.insert(parts.join(" "));

    if parts.len() > 1 {
        let reversed: Vec<&str> = parts.iter().rev().copied().collect();
        variants.insert(reversed.join(" "));
    }

    if parts.len() > 2 {
        let first = parts[0];
        let last = parts[parts.len() - 1];
        variants.insert(format!("{} {}", first, last));
        variants.insert(format!("{} {}", last, first));
    }

    variants
}
