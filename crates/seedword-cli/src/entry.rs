//! Interactive phrase entry.
//!
//! Each word is typed at its own prompt. A prefix is accepted as soon as it
//! names exactly one wordlist entry, so "aban" is stored as "abandon".

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use seedword_crypto::{CandidateFinder, WordCount};

/// Resolve typed input to a wordlist entry, or explain why it cannot be.
pub fn resolve_word<'w>(finder: &CandidateFinder<'w>, typed: &str) -> Result<&'w str, String> {
    let typed = typed.trim().to_lowercase();
    if typed.is_empty() {
        return Err("Enter a word".to_string());
    }
    if let Some(word) = finder.complete(&typed) {
        return Ok(word);
    }
    if !finder.has_candidates(&typed) {
        return Err(format!("No word starts with '{typed}'"));
    }
    let suggestions = finder.find(&typed);
    if suggestions.is_empty() {
        return Err(format!("'{typed}' matches more than one word"));
    }
    let suggestions = suggestions.join(", ");
    Err(format!("Ambiguous, did you mean: {suggestions}"))
}

/// Prompt for `count` words, completing each one against the finder's list.
pub fn prompt_phrase(
    finder: &CandidateFinder<'_>,
    count: WordCount,
) -> anyhow::Result<Zeroizing<String>> {
    let total = count.words();
    let mut words = Vec::with_capacity(total);

    for i in 1..=total {
        let typed: Zeroizing<String> = Zeroizing::new(
            Input::new()
                .with_prompt(format!("Word {i}/{total}"))
                .validate_with(|input: &String| resolve_word(finder, input).map(|_| ()))
                .interact_text()?,
        );
        words.push(resolve_word(finder, &typed).map_err(anyhow::Error::msg)?);
    }

    tracing::debug!(words = total, "phrase entered");
    Ok(Zeroizing::new(words.join(" ")))
}

/// Prompt for an optional passphrase without echo, asking twice.
pub fn prompt_passphrase() -> anyhow::Result<Zeroizing<String>> {
    let passphrase = Password::new()
        .with_prompt("Passphrase (leave empty for none)")
        .with_confirmation("Repeat passphrase", "Passphrases do not match")
        .allow_empty_password(true)
        .interact()?;
    Ok(Zeroizing::new(passphrase))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use seedword_crypto::english_indexed;

    use super::*;

    #[test]
    fn unique_prefix_resolves() {
        let finder = CandidateFinder::default();
        assert_eq!(resolve_word(&finder, "aban"), Ok("abandon"));
        assert_eq!(resolve_word(&finder, "  Zoo "), Ok("zoo"));
    }

    #[test]
    fn full_word_wins_over_longer_matches() {
        let finder = CandidateFinder::new(english_indexed());
        assert_eq!(resolve_word(&finder, "act"), Ok("act"));
    }

    #[test]
    fn ambiguous_prefix_lists_candidates() {
        let finder = CandidateFinder::default().with_max_results(3);
        let err = resolve_word(&finder, "ab").unwrap_err();
        assert_eq!(err, "Ambiguous, did you mean: abandon, ability, able");
    }

    #[test]
    fn unknown_and_empty_input_are_rejected() {
        let finder = CandidateFinder::default();
        assert_eq!(
            resolve_word(&finder, "xyz").unwrap_err(),
            "No word starts with 'xyz'"
        );
        assert!(resolve_word(&finder, "   ").is_err());
    }

    #[test]
    fn ambiguous_prefix_without_suggestions() {
        let finder = CandidateFinder::default().with_max_results(0);
        assert_eq!(
            resolve_word(&finder, "ab").unwrap_err(),
            "'ab' matches more than one word"
        );
        assert_eq!(resolve_word(&finder, "aban"), Ok("abandon"));
        assert_eq!(
            resolve_word(&finder, "xyz").unwrap_err(),
            "No word starts with 'xyz'"
        );
    }
}
