//! Text Primitives
//!
//! Shared tokenization and sentence-splitting helpers used by every
//! analyzer in the workspace. Tokenization is deliberately naive:
//! lower-case, whitespace-split, unique tokens. All downstream metrics
//! are defined over these token sets, so the exact splitting rules are
//! part of the measurement contract.

use std::collections::HashSet;

/// Sentence delimiter used by the resonance analyzer.
pub const SENTENCE_DELIMITER: char = '.';

/// Lower-case and whitespace-split `text` into a set of unique tokens.
///
/// An empty or whitespace-only input yields an empty set.
pub fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of unique tokens shared between two texts.
pub fn shared_token_count(a: &str, b: &str) -> usize {
    token_set(a).intersection(&token_set(b)).count()
}

/// Split `text` into raw sentence units on [`SENTENCE_DELIMITER`].
///
/// Units are not trimmed and may be blank; callers decide how to treat
/// empty units.
pub fn sentence_units(text: &str) -> Vec<&str> {
    text.split(SENTENCE_DELIMITER).collect()
}
