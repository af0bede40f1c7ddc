//! Error types for `seedword` core library.

use seedword_crypto::MnemonicError;
use thiserror::Error;

/// Result type alias using `seedword` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `seedword` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wordlist, phrase or seed error
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
