//! Edge and line label resolution.
//!
//! The labels present in the store are authoritative. A requested label is
//! matched exactly, then case-insensitively, then through the store's alias
//! table, and (for shell labels) after rewriting Roman-numeral subshells
//! (`LIII`, `L_III`) into the `L3` form.

use std::collections::HashMap;

/// Match `requested` against `known` without any shell-specific rewriting.
pub(crate) fn find_label<'k>(
    requested: &str,
    known: &[&'k str],
    aliases: &HashMap<String, String>,
) -> Option<&'k str> {
    let requested = requested.trim();
    if let Some(&hit) = known.iter().find(|&&k| k == requested) {
        return Some(hit);
    }
    if let Some(hit) = find_ignore_case(requested, known) {
        return Some(hit);
    }
    aliases
        .get(&requested.to_lowercase())
        .and_then(|canonical| find_ignore_case(canonical, known))
}

/// Match a shell or subshell label (`K`, `L3`, `M5`, ...).
pub(crate) fn find_edge_label<'k>(
    requested: &str,
    known: &[&'k str],
    aliases: &HashMap<String, String>,
) -> Option<&'k str> {
    find_label(requested, known, aliases).or_else(|| {
        normalize_subshell(requested).and_then(|label| find_ignore_case(&label, known))
    })
}

/// Lowercase with separators removed, so `K-L3`, `k l3` and `KL3` compare equal.
pub(crate) fn squash(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_ignore_case<'k>(requested: &str, known: &[&'k str]) -> Option<&'k str> {
    known
        .iter()
        .find(|k| k.eq_ignore_ascii_case(requested))
        .copied()
}

fn normalize_subshell(label: &str) -> Option<String> {
    let mut chars = label.trim().chars();
    let shell = chars.next()?.to_ascii_uppercase();
    if !matches!(shell, 'K' | 'L' | 'M' | 'N' | 'O' | 'P' | 'Q') {
        return None;
    }
    let rest: String = chars
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if rest.is_empty() {
        return Some(shell.to_string());
    }
    if rest.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("{shell}{rest}"));
    }
    roman_value(&rest).map(|n| format!("{shell}{n}"))
}

fn roman_value(numeral: &str) -> Option<usize> {
    const NUMERALS: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];
    NUMERALS.iter().position(|&n| n == numeral).map(|i| i + 1)
}
