//! Seed derivation.
//!
//! A seed is PBKDF2-HMAC-SHA512 over the phrase text, salted with
//! `"mnemonic"` followed by an optional passphrase. The phrase is validated
//! first so callers get the same errors as from decoding.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::MnemonicError;
use crate::mnemonic::MnemonicCodec;

/// Seed length in bytes.
pub const SEED_LEN: usize = 64;

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 2048;

const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte seed. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Seed").field(&"[REDACTED]").finish()
    }
}

impl Seed {
    pub const fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hex encoding. The caller owns the secret copy.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }
}

/// Derives seeds from phrases validated against a wordlist.
#[derive(Debug, Clone, Copy)]
pub struct SeedDeriver<'w> {
    codec: MnemonicCodec<'w>,
}

impl Default for SeedDeriver<'static> {
    fn default() -> Self {
        Self::new(MnemonicCodec::default())
    }
}

impl<'w> SeedDeriver<'w> {
    pub const fn new(codec: MnemonicCodec<'w>) -> Self {
        Self { codec }
    }

    /// Derive the seed for `phrase` and `passphrase` (empty for none).
    ///
    /// The phrase bytes are used exactly as given, not the decoded entropy.
    pub fn derive_seed(&self, phrase: &str, passphrase: &str) -> Result<Seed, MnemonicError> {
        self.codec.decode(phrase, true)?;

        let mut salt = Zeroizing::new(String::with_capacity(SALT_PREFIX.len() + passphrase.len()));
        salt.push_str(SALT_PREFIX);
        salt.push_str(passphrase);

        let mut out = [0u8; SEED_LEN];
        pbkdf2_hmac::<Sha512>(phrase.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut out);
        let seed = Seed(out);
        out.zeroize();
        Ok(seed)
    }
}

/// Derive a seed from an English phrase.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<Seed, MnemonicError> {
    SeedDeriver::default().derive_seed(phrase, passphrase)
}
