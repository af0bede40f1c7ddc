//! Word completion for interactive phrase entry.
//!
//! Every keystroke may trigger a lookup, so sorted lists answer with a
//! binary-searched range instead of a full scan.

use crate::wordlist::{WordList, english};

/// Suggestions shown per lookup unless configured otherwise.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Up to `max_results` words starting with `prefix`, in wordlist order.
pub fn find_candidates<'w>(
    words: &'w dyn WordList,
    prefix: &str,
    max_results: usize,
) -> Vec<&'w str> {
    if max_results == 0 {
        return Vec::new();
    }
    words.candidates(prefix, max_results)
}

/// Resolve a typed prefix to a single word.
///
/// Returns the word itself when `prefix` is a full list word, or the only
/// candidate when the prefix is unambiguous.
pub fn complete_word<'w>(words: &'w dyn WordList, prefix: &str) -> Option<&'w str> {
    if prefix.is_empty() {
        return None;
    }
    if let Some(index) = words.index_of(prefix) {
        return Some(words.word_at(index));
    }
    match words.candidates(prefix, 2).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Prefix lookup bound to a wordlist and a result limit.
#[derive(Clone, Copy)]
pub struct CandidateFinder<'w> {
    words: &'w dyn WordList,
    max_results: usize,
}

impl std::fmt::Debug for CandidateFinder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFinder")
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl Default for CandidateFinder<'static> {
    fn default() -> Self {
        Self::new(english())
    }
}

impl<'w> CandidateFinder<'w> {
    pub const fn new(words: &'w dyn WordList) -> Self {
        Self {
            words,
            max_results: DEFAULT_MAX_CANDIDATES,
        }
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn find(&self, prefix: &str) -> Vec<&'w str> {
        find_candidates(self.words, prefix, self.max_results)
    }

    pub fn complete(&self, prefix: &str) -> Option<&'w str> {
        complete_word(self.words, prefix)
    }

    /// Whether any word starts with `prefix`, ignoring the result limit.
    pub fn has_candidates(&self, prefix: &str) -> bool {
        !self.words.candidates(prefix, 1).is_empty()
    }
}
