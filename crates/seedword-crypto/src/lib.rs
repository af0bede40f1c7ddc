//! `seedword` BIP-39 library
//!
//! Converts between binary entropy and human-memorable mnemonic phrases,
//! derives wallet seeds from phrases and assists interactive word entry.
//!
//! ## Primitives
//!
//! - **Wordlist**: 2048 words, one per 11-bit index
//! - **Codec**: entropy || SHA-256 checksum → 11-bit groups → words
//! - **Seed**: PBKDF2-HMAC-SHA512, 2048 rounds, salt `"mnemonic" + passphrase`

pub mod candidates;
pub mod error;
pub mod mnemonic;
pub mod seed;
pub mod wordlist;

pub use candidates::{CandidateFinder, DEFAULT_MAX_CANDIDATES, complete_word, find_candidates};
pub use error::MnemonicError;
pub use mnemonic::{
    Entropy, Mnemonic, MnemonicCodec, WordCount, mnemonic_from_entropy, mnemonic_is_valid,
    mnemonic_to_entropy,
};
pub use seed::{PBKDF2_ROUNDS, SEED_LEN, Seed, SeedDeriver, mnemonic_to_seed};
pub use wordlist::{
    IndexedWordList, SortedWordList, WORDLIST_SIZE, WordList, WordListBackend, english,
    english_for, english_indexed, open_wordlist,
};
