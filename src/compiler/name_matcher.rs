// ABOUTME: Comparison keys for fuzzy exercise-name matching
// ABOUTME: Lowercases, keeps ASCII alphanumerics, and strips one trailing "s"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session-embedded exercise ids are frequently regenerated, so the library
//! lookup falls back to comparing names. Two display names match if and only
//! if their keys are equal.
//!
//! The trailing-"s" strip is a naive singularization and is kept as-is for
//! compatibility with existing authored data: `"Press"` and `"Pres"` share a key.

/// Normalize a free-text label into its comparison key
///
/// Total over all inputs: the empty string yields the empty string.
#[must_use]
pub fn normalize_key(text: &str) -> String {
    let mut key: String = text
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if key.ends_with('s') {
        key.pop();
    }
    key
}

/// Whether two display names resolve to the same key
#[must_use]
pub fn names_match(left: &str, right: &str) -> bool {
    normalize_key(left) == normalize_key(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_punctuation_and_plural_insensitive() {
        let key = normalize_key("Press Banca");
        assert_eq!(key, "pressbanca");
        assert_eq!(normalize_key("press-banca"), key);
        assert_eq!(normalize_key("PRESS BANCAS"), key);
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("  --  "), "");
        assert_eq!(normalize_key("s"), "");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(normalize_key("Zancada búlgara"), "zancadablgara");
    }

    #[test]
    fn test_only_one_trailing_s_is_stripped() {
        assert_eq!(normalize_key("Press"), "pres");
        assert_eq!(normalize_key("Glass"), "glas");
    }
}
