//! Phrase subcommands: encode, decode, validate, seed, complete, generate, enter.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::{self, BufRead, Write};

use anyhow::Context;
use zeroize::Zeroizing;

use seedword_crypto::{CandidateFinder, MnemonicCodec, SeedDeriver, WordCount, WordList};

use crate::entry;

/// Phrase subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum PhraseAction {
    /// Encode hex entropy as a recovery phrase.
    Encode {
        /// Entropy as hex: 16, 20, 24, 28 or 32 bytes.
        entropy: String,
    },
    /// Decode a recovery phrase into hex entropy.
    Decode {
        /// Phrase words. Read from stdin when omitted.
        words: Vec<String>,
        /// Return the entropy even if the checksum does not match.
        #[arg(long)]
        skip_checksum: bool,
    },
    /// Check a recovery phrase. Exits with status 1 when it is invalid.
    Validate {
        /// Phrase words. Read from stdin when omitted.
        words: Vec<String>,
    },
    /// Derive the 64-byte wallet seed from a recovery phrase.
    Seed {
        /// Phrase words. Read from stdin when omitted.
        words: Vec<String>,
        /// Optional passphrase ("25th word").
        #[arg(long, env = "SEEDWORD_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
        /// Prompt for the passphrase without echoing it.
        #[arg(long, conflicts_with = "passphrase")]
        ask_passphrase: bool,
    },
    /// List wordlist entries starting with a prefix.
    Complete {
        prefix: String,
        /// Maximum number of suggestions (defaults to the configured value).
        #[arg(long)]
        max: Option<usize>,
    },
    /// Generate a new random recovery phrase.
    Generate {
        /// Phrase length: 12, 15, 18, 21 or 24.
        #[arg(long, default_value_t = 12)]
        words: usize,
    },
    /// Type a recovery phrase word by word with completion, then check it.
    Enter {
        /// Phrase length: 12, 15, 18, 21 or 24.
        #[arg(long, default_value_t = 12)]
        words: usize,
        /// Also prompt for a passphrase and print the derived seed.
        #[arg(long)]
        seed: bool,
    },
}

/// Execute a phrase subcommand against `list`.
///
/// Returns `false` when the command ran but the phrase was rejected.
pub fn run(
    action: PhraseAction,
    list: &dyn WordList,
    max_candidates: usize,
) -> anyhow::Result<bool> {
    let codec = MnemonicCodec::new(list);
    let mut out = io::stdout().lock();

    match action {
        PhraseAction::Encode { entropy } => encode(&codec, &entropy, &mut out)?,
        PhraseAction::Decode {
            words,
            skip_checksum,
        } => {
            let phrase = read_phrase(words, &mut io::stdin().lock())?;
            decode(&codec, &phrase, !skip_checksum, &mut out)?;
        }
        PhraseAction::Validate { words } => {
            let phrase = read_phrase(words, &mut io::stdin().lock())?;
            return validate(&codec, &phrase, &mut out);
        }
        PhraseAction::Seed {
            words,
            passphrase,
            ask_passphrase,
        } => {
            let phrase = read_phrase(words, &mut io::stdin().lock())?;
            let passphrase = if ask_passphrase {
                entry::prompt_passphrase()?
            } else {
                Zeroizing::new(passphrase.unwrap_or_default())
            };
            seed(&SeedDeriver::new(codec), &phrase, &passphrase, &mut out)?;
        }
        PhraseAction::Complete { prefix, max } => {
            let finder =
                CandidateFinder::new(list).with_max_results(max.unwrap_or(max_candidates));
            complete(&finder, &prefix, &mut out)?;
        }
        PhraseAction::Generate { words } => generate(&codec, words, &mut out)?,
        PhraseAction::Enter { words, seed } => {
            let count = WordCount::try_from(words)?;
            let finder = CandidateFinder::new(list).with_max_results(max_candidates);
            let phrase = entry::prompt_phrase(&finder, count)?;
            if !validate(&codec, &phrase, &mut out)? {
                return Ok(false);
            }
            if seed {
                let passphrase = entry::prompt_passphrase()?;
                self::seed(&SeedDeriver::new(codec), &phrase, &passphrase, &mut out)?;
            }
        }
    }

    Ok(true)
}

/// Join argument words, or read a single line from `input` when none were given.
pub fn read_phrase(
    words: Vec<String>,
    input: &mut impl BufRead,
) -> anyhow::Result<Zeroizing<String>> {
    if !words.is_empty() {
        let words = Zeroizing::new(words);
        return Ok(Zeroizing::new(words.join(" ")));
    }
    let mut line = Zeroizing::new(String::new());
    input
        .read_line(&mut line)
        .context("Failed to read phrase from stdin")?;
    Ok(Zeroizing::new(line.trim().to_string()))
}

pub fn encode(
    codec: &MnemonicCodec<'_>,
    entropy_hex: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let entropy_hex = entropy_hex.trim();
    let entropy = Zeroizing::new(hex::decode(entropy_hex).context("Invalid hex entropy")?);
    let mnemonic = codec.encode(&entropy)?;
    tracing::debug!(words = mnemonic.word_count(), "encoded entropy");
    writeln!(out, "{}", mnemonic.as_str())?;
    Ok(())
}

pub fn decode(
    codec: &MnemonicCodec<'_>,
    phrase: &str,
    verify_checksum: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let entropy = codec.decode(phrase, verify_checksum)?;
    if !verify_checksum {
        tracing::warn!("checksum verification skipped");
    }
    let encoded = Zeroizing::new(hex::encode(entropy.as_slice()));
    writeln!(out, "{}", encoded.as_str())?;
    Ok(())
}

/// Print whether `phrase` is valid; the error kind is printed when it is not.
pub fn validate(
    codec: &MnemonicCodec<'_>,
    phrase: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match codec.decode(phrase, true) {
        Ok(_) => {
            writeln!(out, "valid ({} words)", phrase.split_whitespace().count())?;
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(error = %e, "phrase rejected");
            writeln!(out, "invalid: {e}")?;
            Ok(false)
        }
    }
}

pub fn seed(
    deriver: &SeedDeriver<'_>,
    phrase: &str,
    passphrase: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let seed = deriver.derive_seed(phrase, passphrase)?;
    writeln!(out, "{}", seed.to_hex().as_str())?;
    Ok(())
}

pub fn complete(
    finder: &CandidateFinder<'_>,
    prefix: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for word in finder.find(prefix) {
        writeln!(out, "{word}")?;
    }
    Ok(())
}

pub fn generate(
    codec: &MnemonicCodec<'_>,
    words: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mnemonic = codec.generate(WordCount::try_from(words)?)?;
    writeln!(out, "{}", mnemonic.as_str())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use seedword_crypto::{english, english_indexed};

    use super::*;

    const ZERO_12: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn encode_prints_phrase() {
        let mut out = Vec::new();
        encode(
            &MnemonicCodec::new(english()),
            "00000000000000000000000000000000\n",
            &mut out,
        )
        .unwrap();
        assert_eq!(output(out), format!("{ZERO_12}\n"));
    }

    #[test]
    fn encode_rejects_non_hex_and_bad_lengths() {
        let codec = MnemonicCodec::new(english());
        assert!(encode(&codec, "not hex", &mut Vec::new()).is_err());
        let err = encode(&codec, "0011", &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("entropy length"), "{err}");
    }

    #[test]
    fn decode_prints_hex_entropy() {
        let codec = MnemonicCodec::new(english_indexed());
        let mut out = Vec::new();
        decode(&codec, ZERO_12, true, &mut out).unwrap();
        assert_eq!(output(out), "00000000000000000000000000000000\n");
    }

    #[test]
    fn decode_can_skip_checksum() {
        let phrase = vec!["zoo"; 12].join(" ");
        let codec = MnemonicCodec::new(english());
        assert!(decode(&codec, &phrase, true, &mut Vec::new()).is_err());

        let mut out = Vec::new();
        decode(&codec, &phrase, false, &mut out).unwrap();
        assert_eq!(output(out), format!("{}\n", "ff".repeat(16)));
    }

    #[test]
    fn validate_reports_reason() {
        let codec = MnemonicCodec::new(english());

        let mut out = Vec::new();
        assert!(validate(&codec, ZERO_12, &mut out).unwrap());
        assert_eq!(output(out), "valid (12 words)\n");

        let mut out = Vec::new();
        assert!(!validate(&codec, "abandon abandon", &mut out).unwrap());
        assert!(output(out).starts_with("invalid: Invalid recovery phrase: 2 words"));

        let mut out = Vec::new();
        let unknown = ZERO_12.replace("about", "bitcoin");
        assert!(!validate(&codec, &unknown, &mut out).unwrap());
        assert!(output(out).contains("'bitcoin'"));
    }

    #[test]
    fn seed_prints_hex() {
        let mut out = Vec::new();
        seed(&SeedDeriver::default(), ZERO_12, "TREZOR", &mut out).unwrap();
        assert_eq!(
            output(out),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04\n"
        );
    }

    #[test]
    fn complete_lists_one_word_per_line() {
        let finder = CandidateFinder::new(english()).with_max_results(3);
        let mut out = Vec::new();
        complete(&finder, "ab", &mut out).unwrap();
        assert_eq!(output(out), "abandon\nability\nable\n");

        let mut out = Vec::new();
        complete(&CandidateFinder::default(), "aban", &mut out).unwrap();
        assert_eq!(output(out), "abandon\n");
    }

    #[test]
    fn generate_prints_valid_phrase() {
        let codec = MnemonicCodec::new(english());
        let mut out = Vec::new();
        generate(&codec, 24, &mut out).unwrap();
        let phrase = output(out);
        assert_eq!(phrase.split_whitespace().count(), 24);
        assert!(codec.is_valid(&phrase));

        assert!(generate(&codec, 13, &mut Vec::new()).is_err());
    }

    #[test]
    fn read_phrase_prefers_arguments() {
        let mut input = Cursor::new("ignored input\n");
        let phrase = read_phrase(vec!["abandon".into(), "about".into()], &mut input).unwrap();
        assert_eq!(phrase.as_str(), "abandon about");
    }

    #[test]
    fn read_phrase_falls_back_to_stdin() {
        let mut input = Cursor::new(format!("  {ZERO_12}  \n"));
        let phrase = read_phrase(Vec::new(), &mut input).unwrap();
        assert_eq!(phrase.as_str(), ZERO_12);
    }
}
