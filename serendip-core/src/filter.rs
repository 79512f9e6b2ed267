//! Word Filter - what counts as a "concept"
//!
//! Embedding vocabularies are full of junk for our purposes: phrases glued
//! together with underscores, proper nouns, numbers, stray symbols.
//! The filter keeps plain lowercase alphabetic words of three letters or more.

/// Character the provider uses to join multi-word phrases ("New_York")
pub const WORD_JOINER: char = '_';

/// Shortest acceptable concept, in characters
pub const MIN_WORD_LEN: usize = 3;

/// Concept acceptance predicate
///
/// Zero-sized so it can be handed around wherever a filter is expected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordFilter;

impl WordFilter {
    /// Is this word an acceptable concept?
    pub fn is_acceptable(&self, word: &str) -> bool {
        is_acceptable(word)
    }

    /// Keep only acceptable items, preserving order
    pub fn retain<'a, T, F>(&self, items: &'a [T], word_of: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        items.iter().filter(|item| is_acceptable(word_of(item))).collect()
    }
}

/// Reject phrases, capitalized words, short tokens and anything non-alphabetic
pub fn is_acceptable(word: &str) -> bool {
    if word.contains(WORD_JOINER) {
        return false;
    }

    // Proper-noun heuristic
    match word.chars().next() {
        Some(first) if first.is_uppercase() => return false,
        None => return false,
        _ => {}
    }

    if word.chars().count() < MIN_WORD_LEN {
        return false;
    }

    word.chars().all(char::is_alphabetic)
}
