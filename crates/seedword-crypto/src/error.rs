//! Mnemonic error types.

/// Errors from wordlist, mnemonic and seed operations.
///
/// The first four variants are validation failures on user input; the rest
/// come from constructing a wordlist.
#[derive(Debug, thiserror::Error)]
pub enum MnemonicError {
    #[error("Invalid entropy length: {actual} bytes (expected a multiple of 4 between 16 and 1024)")]
    InvalidEntropyLength { actual: usize },

    #[error("Invalid recovery phrase: {words} words (expected a multiple of 3 between 12 and 768)")]
    InvalidPhraseLength { words: usize },

    #[error("Word '{0}' is not in the wordlist")]
    UnknownWord(String),

    #[error("Checksum verification failed")]
    ChecksumMismatch,

    #[error("Invalid wordlist: {0}")]
    InvalidWordList(String),

    #[error("Wordlist is not sorted at entry {index}")]
    UnsortedWordList { index: usize },

    #[error("Unknown wordlist backend '{0}' (expected 'sorted' or 'indexed')")]
    UnknownBackend(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
