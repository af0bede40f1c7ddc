//! Mnemonic encoding and decoding.
//!
//! Entropy is turned into words by appending its SHA-256 digest, reading the
//! result as a big-endian bitstream and mapping each 11-bit group to a word.
//! Only the first `entropy_bits / 32` bits of the digest end up in the
//! phrase; they act as a checksum when decoding.
//!
//! | words | entropy bits | checksum bits |
//! |-------|--------------|---------------|
//! | 12    | 128          | 4             |
//! | 15    | 160          | 5             |
//! | 18    | 192          | 6             |
//! | 21    | 224          | 7             |
//! | 24    | 256          | 8             |

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::MnemonicError;
use crate::wordlist::{WordList, english};

/// Bits encoded by a single word.
const BITS_PER_WORD: usize = 11;

const MIN_ENTROPY_BYTES: usize = 16;
/// 1024 bytes need 256 checksum bits, the full SHA-256 digest.
const MAX_ENTROPY_BYTES: usize = 1024;
const MIN_WORDS: usize = 12;
const MAX_WORDS: usize = 768;

/// Decoded entropy. Wiped from memory on drop.
pub type Entropy = Zeroizing<Vec<u8>>;

/// A mnemonic phrase: words joined by single spaces.
///
/// The phrase is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl Mnemonic {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

/// Standard phrase lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordCount {
    #[default]
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl WordCount {
    pub const fn words(self) -> usize {
        match self {
            Self::Words12 => 12,
            Self::Words15 => 15,
            Self::Words18 => 18,
            Self::Words21 => 21,
            Self::Words24 => 24,
        }
    }

    /// Bytes of entropy carried by a phrase of this length.
    pub const fn entropy_bytes(self) -> usize {
        self.words() * BITS_PER_WORD * 32 / 33 / 8
    }

    pub const fn checksum_bits(self) -> usize {
        self.words() * BITS_PER_WORD / 33
    }
}

impl TryFrom<usize> for WordCount {
    type Error = MnemonicError;

    fn try_from(words: usize) -> Result<Self, Self::Error> {
        match words {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            _ => Err(MnemonicError::InvalidPhraseLength { words }),
        }
    }
}

/// Converts between entropy and phrases over a given wordlist.
#[derive(Clone, Copy)]
pub struct MnemonicCodec<'w> {
    words: &'w dyn WordList,
}

impl fmt::Debug for MnemonicCodec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicCodec").finish_non_exhaustive()
    }
}

impl Default for MnemonicCodec<'static> {
    fn default() -> Self {
        Self::new(english())
    }
}

impl<'w> MnemonicCodec<'w> {
    pub const fn new(words: &'w dyn WordList) -> Self {
        Self { words }
    }

    pub const fn wordlist(&self) -> &'w dyn WordList {
        self.words
    }

    /// Encode entropy as a phrase.
    ///
    /// The entropy length must be a multiple of 4 bytes, between 16 and
    /// 1024. Encoding is deterministic.
    pub fn encode(&self, entropy: &[u8]) -> Result<Mnemonic, MnemonicError> {
        let len = entropy.len();
        if len % 4 != 0 || !(MIN_ENTROPY_BYTES..=MAX_ENTROPY_BYTES).contains(&len) {
            return Err(MnemonicError::InvalidEntropyLength { actual: len });
        }

        let checksum_bits = len * 8 / 32;
        let word_count = (len * 8 + checksum_bits) / BITS_PER_WORD;

        let mut stream = Zeroizing::new(Vec::with_capacity(len + 32));
        stream.extend_from_slice(entropy);
        stream.extend_from_slice(&Sha256::digest(entropy));

        let mut phrase = String::with_capacity(word_count * 9);
        for i in 0..word_count {
            if i > 0 {
                phrase.push(' ');
            }
            phrase.push_str(self.words.word_at(read_index(&stream, i * BITS_PER_WORD)));
        }
        Ok(Mnemonic(phrase))
    }

    /// Decode a phrase back into entropy.
    ///
    /// Words may be separated by any whitespace. With `verify_checksum`
    /// set, the embedded checksum must match the entropy.
    pub fn decode(&self, phrase: &str, verify_checksum: bool) -> Result<Entropy, MnemonicError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let count = words.len();
        if count % 3 != 0 || !(MIN_WORDS..=MAX_WORDS).contains(&count) {
            return Err(MnemonicError::InvalidPhraseLength { words: count });
        }

        let total_bits = count * BITS_PER_WORD;
        let checksum_bits = total_bits / 33;
        let entropy_len = (total_bits - checksum_bits) / 8;

        let mut packed = Zeroizing::new(vec![0u8; total_bits.div_ceil(8)]);
        for (i, word) in words.iter().enumerate() {
            let index = self
                .words
                .index_of(word)
                .ok_or_else(|| MnemonicError::UnknownWord((*word).to_string()))?;
            write_index(&mut packed, i * BITS_PER_WORD, index);
        }

        // Padding bits after the checksum are never written, so the embedded
        // checksum already has its unused low bits cleared.
        let (data, embedded) = packed.split_at(entropy_len);
        if verify_checksum {
            let expected = checksum_prefix(data, checksum_bits);
            if !bool::from(expected.as_slice().ct_eq(embedded)) {
                return Err(MnemonicError::ChecksumMismatch);
            }
        }
        Ok(Zeroizing::new(data.to_vec()))
    }

    /// Whether `phrase` decodes with a valid checksum.
    pub fn is_valid(&self, phrase: &str) -> bool {
        self.decode(phrase, true).is_ok()
    }

    /// Generate a phrase from fresh OS randomness.
    pub fn generate(&self, count: WordCount) -> Result<Mnemonic, MnemonicError> {
        let mut entropy = Zeroizing::new(vec![0u8; count.entropy_bytes()]);
        OsRng.fill_bytes(&mut entropy);
        let mnemonic = self.encode(&entropy)?;
        tracing::debug!(words = count.words(), "generated mnemonic");
        Ok(mnemonic)
    }
}

/// Encode entropy with the English wordlist.
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Mnemonic, MnemonicError> {
    MnemonicCodec::default().encode(entropy)
}

/// Decode an English phrase, verifying its checksum.
pub fn mnemonic_to_entropy(phrase: &str) -> Result<Entropy, MnemonicError> {
    MnemonicCodec::default().decode(phrase, true)
}

/// Check an English phrase. Never fails; any error yields `false`.
pub fn mnemonic_is_valid(phrase: &str) -> bool {
    MnemonicCodec::default().is_valid(phrase)
}

/// First `checksum_bits` bits of SHA-256(`data`), with the unused low bits
/// of the final byte cleared.
fn checksum_prefix(data: &[u8], checksum_bits: usize) -> Vec<u8> {
    let digest = Sha256::digest(data);
    let mut checksum = digest[..checksum_bits.div_ceil(8)].to_vec();
    let used = checksum_bits % 8;
    if used != 0 {
        if let Some(last) = checksum.last_mut() {
            *last &= 0xFF_u8 << (8 - used);
        }
    }
    checksum
}

/// Read the 11-bit group starting at `bit_offset`, most significant bit first.
fn read_index(bytes: &[u8], bit_offset: usize) -> u16 {
    (bit_offset..bit_offset + BITS_PER_WORD).fold(0u16, |acc, pos| {
        let bit = (bytes[pos / 8] >> (7 - pos % 8)) & 1;
        (acc << 1) | u16::from(bit)
    })
}

/// OR the 11-bit `index` into `bytes` starting at `bit_offset`.
fn write_index(bytes: &mut [u8], bit_offset: usize, index: u16) {
    for i in 0..BITS_PER_WORD {
        if (index >> (BITS_PER_WORD - 1 - i)) & 1 == 1 {
            let pos = bit_offset + i;
            bytes[pos / 8] |= 0x80 >> (pos % 8);
        }
    }
}
