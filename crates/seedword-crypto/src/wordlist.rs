//! BIP-39 wordlists.
//!
//! A wordlist maps every 11-bit index (0..2048) to a word and back. Two
//! providers implement [`WordList`]:
//!
//! - [`SortedWordList`]: binary search over an alphabetically sorted list
//!   (the canonical English list is sorted).
//! - [`IndexedWordList`]: a precomputed hash index, usable for any ordering.
//!
//! Which one is used is a configuration choice ([`WordListBackend`]). The
//! embedded English list is parsed once per process and never mutated.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::MnemonicError;

/// Number of entries in every BIP-39 wordlist (2^11).
pub const WORDLIST_SIZE: usize = 2048;

/// Canonical BIP-39 English wordlist, one word per line.
const ENGLISH_TXT: &str = include_str!("../wordlists/english.txt");

static ENGLISH: LazyLock<SortedWordList> = LazyLock::new(|| SortedWordList {
    words: parse_lines(ENGLISH_TXT),
});

static ENGLISH_INDEXED: LazyLock<IndexedWordList> =
    LazyLock::new(|| IndexedWordList::build(parse_lines(ENGLISH_TXT)));

/// Read-only bidirectional mapping between 11-bit indices and words.
pub trait WordList: Send + Sync {
    /// Index of `word`, or `None` if it is not in the list.
    fn index_of(&self, word: &str) -> Option<u16>;

    /// Word stored at `index`.
    ///
    /// Callers pass 11-bit values, which are always in range for a
    /// validated list.
    fn word_at(&self, index: u16) -> &str;

    /// All words in index order.
    fn words(&self) -> &[String];

    fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    /// Up to `max_results` words starting with `prefix`, in index order.
    fn candidates(&self, prefix: &str, max_results: usize) -> Vec<&str> {
        self.words()
            .iter()
            .filter(|w| w.starts_with(prefix))
            .take(max_results)
            .map(String::as_str)
            .collect()
    }
}

impl<T: WordList + ?Sized> WordList for &T {
    fn index_of(&self, word: &str) -> Option<u16> {
        (**self).index_of(word)
    }

    fn word_at(&self, index: u16) -> &str {
        (**self).word_at(index)
    }

    fn words(&self) -> &[String] {
        (**self).words()
    }

    fn candidates(&self, prefix: &str, max_results: usize) -> Vec<&str> {
        (**self).candidates(prefix, max_results)
    }
}

/// Wordlist backed by a sorted slice; lookups are binary searches.
#[derive(Debug, Clone)]
pub struct SortedWordList {
    words: Vec<String>,
}

impl SortedWordList {
    /// Build from words in index order. The words must be strictly
    /// ascending in byte order.
    pub fn from_words(words: Vec<String>) -> Result<Self, MnemonicError> {
        validate_words(&words)?;
        if let Some(pos) = words.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(MnemonicError::UnsortedWordList { index: pos + 1 });
        }
        Ok(Self { words })
    }

    /// Parse a newline-separated list.
    pub fn from_text(text: &str) -> Result<Self, MnemonicError> {
        Self::from_words(parse_lines(text))
    }

    /// Load a newline-separated list from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, MnemonicError> {
        let list = Self::from_text(&std::fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), backend = "sorted", "loaded wordlist");
        Ok(list)
    }
}

impl WordList for SortedWordList {
    fn index_of(&self, word: &str) -> Option<u16> {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .ok()
            .and_then(|i| u16::try_from(i).ok())
    }

    fn word_at(&self, index: u16) -> &str {
        &self.words[usize::from(index)]
    }

    fn words(&self) -> &[String] {
        &self.words
    }

    fn candidates(&self, prefix: &str, max_results: usize) -> Vec<&str> {
        // Words sharing a prefix form one contiguous run in a sorted list.
        let start = self.words.partition_point(|w| w.as_str() < prefix);
        self.words[start..]
            .iter()
            .take_while(|w| w.starts_with(prefix))
            .take(max_results)
            .map(String::as_str)
            .collect()
    }
}

/// Wordlist with a precomputed word → index map.
#[derive(Debug, Clone)]
pub struct IndexedWordList {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl IndexedWordList {
    /// Build from words in index order. Any ordering is accepted.
    pub fn from_words(words: Vec<String>) -> Result<Self, MnemonicError> {
        validate_words(&words)?;
        Ok(Self::build(words))
    }

    /// Parse a newline-separated list.
    pub fn from_text(text: &str) -> Result<Self, MnemonicError> {
        Self::from_words(parse_lines(text))
    }

    /// Load a newline-separated list from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, MnemonicError> {
        let list = Self::from_text(&std::fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), backend = "indexed", "loaded wordlist");
        Ok(list)
    }

    fn build(words: Vec<String>) -> Self {
        let index = (0u16..).zip(&words).map(|(i, w)| (w.clone(), i)).collect();
        Self { words, index }
    }
}

impl WordList for IndexedWordList {
    fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    fn word_at(&self, index: u16) -> &str {
        &self.words[usize::from(index)]
    }

    fn words(&self) -> &[String] {
        &self.words
    }
}

/// Selects which [`WordList`] implementation serves lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordListBackend {
    /// Binary search; requires an alphabetically sorted list.
    #[default]
    Sorted,
    /// Hash index; works with any ordering.
    Indexed,
}

impl fmt::Display for WordListBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sorted => f.write_str("sorted"),
            Self::Indexed => f.write_str("indexed"),
        }
    }
}

impl FromStr for WordListBackend {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sorted" => Ok(Self::Sorted),
            "indexed" => Ok(Self::Indexed),
            other => Err(MnemonicError::UnknownBackend(other.to_string())),
        }
    }
}

/// The embedded English list behind binary search.
pub fn english() -> &'static SortedWordList {
    &ENGLISH
}

/// The embedded English list behind a hash index.
pub fn english_indexed() -> &'static IndexedWordList {
    &ENGLISH_INDEXED
}

/// The embedded English list served by `backend`.
pub fn english_for(backend: WordListBackend) -> &'static dyn WordList {
    match backend {
        WordListBackend::Sorted => english(),
        WordListBackend::Indexed => english_indexed(),
    }
}

/// Open a wordlist: the embedded English list, or the file at `path` when
/// one is given.
pub fn open_wordlist(
    backend: WordListBackend,
    path: Option<&Path>,
) -> Result<Box<dyn WordList>, MnemonicError> {
    let Some(path) = path else {
        return Ok(Box::new(english_for(backend)));
    };
    Ok(match backend {
        WordListBackend::Sorted => Box::new(SortedWordList::load_from_file(path)?),
        WordListBackend::Indexed => Box::new(IndexedWordList::load_from_file(path)?),
    })
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn validate_words(words: &[String]) -> Result<(), MnemonicError> {
    if words.len() != WORDLIST_SIZE {
        return Err(MnemonicError::InvalidWordList(format!(
            "expected {WORDLIST_SIZE} words, got {}",
            words.len()
        )));
    }
    if let Some(pos) = words.iter().position(|w| w.chars().any(char::is_whitespace)) {
        return Err(MnemonicError::InvalidWordList(format!(
            "entry {pos} contains whitespace"
        )));
    }
    let mut seen = HashSet::with_capacity(words.len());
    if let Some(dup) = words.iter().find(|w| !seen.insert(w.as_str())) {
        return Err(MnemonicError::InvalidWordList(format!(
            "duplicate word '{dup}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn synthetic_words() -> Vec<String> {
        (0..WORDLIST_SIZE).map(|i| format!("w{i:04}")).collect()
    }

    #[test]
    fn embedded_english_is_canonical() {
        let words = english().words();
        assert_eq!(words.len(), WORDLIST_SIZE);
        assert_eq!(words[0], "abandon");
        assert_eq!(words[3], "about");
        assert_eq!(words[WORDLIST_SIZE - 1], "zoo");
        // The embedded list must pass the same checks as an external one.
        SortedWordList::from_words(words.to_vec()).unwrap();
    }

    #[test]
    fn index_and_word_are_inverse() {
        for backend in [WordListBackend::Sorted, WordListBackend::Indexed] {
            let list = english_for(backend);
            for i in [0u16, 1, 3, 1019, 2047] {
                let word = list.word_at(i);
                assert_eq!(list.index_of(word), Some(i), "{backend}: {word}");
            }
        }
    }

    #[test]
    fn backends_agree_on_every_word() {
        let sorted = english();
        let indexed = english_indexed();
        assert_eq!(sorted.words(), indexed.words());
        for word in sorted.words() {
            assert_eq!(sorted.index_of(word), indexed.index_of(word));
        }
    }

    #[test]
    fn unknown_words_are_not_found() {
        for backend in [WordListBackend::Sorted, WordListBackend::Indexed] {
            let list = english_for(backend);
            assert_eq!(list.index_of("bitcoin"), None);
            assert_eq!(list.index_of("zzzz"), None);
            assert_eq!(list.index_of("satoshi"), Some(1531));
            assert_eq!(list.index_of(""), None);
            assert_eq!(list.index_of("Abandon"), None);
            assert!(!list.contains("aban"));
            assert!(list.contains("abandon"));
        }
    }

    #[test]
    fn sorted_candidates_match_linear_scan() {
        let sorted = english();
        let indexed = english_indexed();
        for prefix in ["", "a", "ab", "aban", "ca", "zo", "zzz", "q"] {
            assert_eq!(
                sorted.candidates(prefix, 50),
                indexed.candidates(prefix, 50),
                "prefix {prefix:?}"
            );
        }
    }

    #[test]
    fn rejects_wrong_size() {
        let mut words = synthetic_words();
        words.pop();
        let err = SortedWordList::from_words(words).unwrap_err();
        assert!(matches!(err, MnemonicError::InvalidWordList(_)));
    }

    #[test]
    fn rejects_duplicates() {
        let mut words = synthetic_words();
        words[10] = words[9].clone();
        let err = IndexedWordList::from_words(words).unwrap_err();
        match err {
            MnemonicError::InvalidWordList(msg) => assert!(msg.contains("w0009"), "{msg}"),
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn rejects_inner_whitespace() {
        let mut words = synthetic_words();
        words[5] = "two words".into();
        assert!(matches!(
            IndexedWordList::from_words(words),
            Err(MnemonicError::InvalidWordList(_))
        ));
    }

    #[test]
    fn sorted_backend_rejects_unsorted_input() {
        let mut words = synthetic_words();
        words.swap(100, 101);
        let err = SortedWordList::from_words(words.clone()).unwrap_err();
        assert!(matches!(err, MnemonicError::UnsortedWordList { index: 101 }));

        // The indexed backend has no ordering requirement.
        let list = IndexedWordList::from_words(words).unwrap();
        assert_eq!(list.index_of("w0101"), Some(100));
        assert_eq!(list.word_at(101), "w0100");
    }

    #[test]
    fn from_text_ignores_blank_lines_and_padding() {
        let text = synthetic_words()
            .iter()
            .map(|w| format!("  {w}\r\n\n"))
            .collect::<String>();
        let list = SortedWordList::from_text(&text).unwrap();
        assert_eq!(list.word_at(7), "w0007");
    }

    #[test]
    fn open_wordlist_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for w in synthetic_words() {
            writeln!(file, "{w}").unwrap();
        }

        for backend in [WordListBackend::Sorted, WordListBackend::Indexed] {
            let list = open_wordlist(backend, Some(file.path())).unwrap();
            assert_eq!(list.index_of("w2047"), Some(2047));
        }
    }

    #[test]
    fn open_wordlist_missing_file_is_io_error() {
        let result = open_wordlist(
            WordListBackend::Sorted,
            Some(Path::new("/nonexistent/seedword/english.txt")),
        );
        assert!(matches!(result, Err(MnemonicError::IoError(_))));
    }

    #[test]
    fn open_wordlist_defaults_to_embedded_english() {
        let list = open_wordlist(WordListBackend::Indexed, None).unwrap();
        assert_eq!(list.word_at(0), "abandon");
    }

    #[test]
    fn backend_parses_and_serializes() {
        assert_eq!("sorted".parse::<WordListBackend>().unwrap(), WordListBackend::Sorted);
        assert_eq!(" Indexed ".parse::<WordListBackend>().unwrap(), WordListBackend::Indexed);
        assert!(matches!(
            "trie".parse::<WordListBackend>(),
            Err(MnemonicError::UnknownBackend(name)) if name == "trie"
        ));
        assert_eq!(
            serde_json::to_string(&WordListBackend::Indexed).unwrap(),
            "\"indexed\""
        );
        assert_eq!(WordListBackend::default(), WordListBackend::Sorted);
    }
}
