use crate::{Candidate, GeneratorError, Secret};
use regex::Regex;
use std::sync::LazyLock;

static PUBKEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pubkey: ([a-zA-Z0-9]+)").expect("valid pubkey regex")
});

static SEED_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Save this seed phrase and your BIP39 passphrase to recover your new keypair:\r?\n([a-zA-Z ]+)",
    )
    .expect("valid seed phrase regex")
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+$").expect("valid identifier regex")
});

/// Extracts the seed phrase and public key from `solana-keygen new` output.
///
/// # Errors
///
/// Returns [`GeneratorError::MalformedOutput`] if either one is missing.
pub fn parse_new_keypair(program: &str, output: &str) -> Result<Candidate, GeneratorError> {
    let raw_identifier = PUBKEY
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| malformed(program, "a `pubkey: <key>` line"))?;

    let phrase = SEED_PHRASE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|phrase| !phrase.is_empty())
        .ok_or_else(|| malformed(program, "a seed phrase"))?;

    Ok(Candidate {
        secret: Secret::new(phrase),
        raw_identifier,
    })
}

/// Extracts the derived public key from `solana-keygen pubkey` output.
///
/// The key is the last non-empty line; anything before it is prompt noise.
/// It must be purely alphanumeric, so a stray prompt or warning line is
/// reported as malformed rather than matched as a key.
///
/// # Errors
///
/// Returns [`GeneratorError::MalformedOutput`] if there is no such line or it
/// does not look like a key.
pub fn parse_pubkey(program: &str, output: &str) -> Result<String, GeneratorError> {
    output
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .filter(|line| IDENTIFIER.is_match(line))
        .map(ToString::to_string)
        .ok_or_else(|| malformed(program, "a derived public key"))
}

fn malformed(program: &str, expected: &'static str) -> GeneratorError {
    GeneratorError::MalformedOutput {
        program: program.to_string(),
        expected,
    }
}
