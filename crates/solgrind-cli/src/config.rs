//! Command-line arguments and the search settings derived from them.

use clap::Parser;
use core::time::Duration;
use solgrind::{
    DEFAULT_DERIVATION_PATH, DEFAULT_PROGRAM, DEFAULT_WORD_COUNT, DEFAULT_WORKER_COUNT, Error,
    SearchConfig, SolanaKeygen,
};
use std::path::PathBuf;

/// Seed phrase lengths accepted by `solana-keygen new --word-count`.
const WORD_COUNTS: [u8; 5] = [12, 15, 18, 21, 24];

/// Grind for Solana vanity pubkeys.
#[derive(Parser, Debug, Clone)]
#[command(name = "solgrind", version)]
pub struct CliArgs {
    /// What the public key should start with.
    #[arg(short = 's', long = "starts-with", env = "SOLGRIND_STARTS_WITH")]
    pub starts_with: String,

    /// How many async tasks to grind with. It may be useful to set this
    /// higher than your number of CPU cores, since each task mostly waits on
    /// `solana-keygen` processes.
    #[arg(short = 't', long, env = "SOLGRIND_TASKS", default_value_t = DEFAULT_WORKER_COUNT)]
    pub tasks: usize,

    /// How many words to have in the seed phrase (12, 15, 18, 21 or 24).
    #[arg(
        short = 'w',
        long,
        env = "SOLGRIND_WORDS",
        default_value_t = DEFAULT_WORD_COUNT,
        value_parser = parse_word_count
    )]
    pub words: u8,

    /// Match the prefix case-insensitively.
    #[arg(short = 'i', long, env = "SOLGRIND_CASE_INSENSITIVE")]
    pub case_insensitive: bool,

    /// Path to the `solana-keygen` executable.
    #[arg(long, env = "SOLGRIND_KEYGEN", default_value = DEFAULT_PROGRAM)]
    pub keygen: PathBuf,

    /// Derivation path of the account whose public key is matched.
    #[arg(long, env = "SOLGRIND_DERIVATION_PATH", default_value = DEFAULT_DERIVATION_PATH)]
    pub derivation_path: String,

    /// Give up after this many seconds. Grinds forever when unset.
    #[arg(long = "timeout", env = "SOLGRIND_TIMEOUT", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

fn parse_word_count(raw: &str) -> Result<u8, String> {
    let words: u8 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if WORD_COUNTS.contains(&words) {
        Ok(words)
    } else {
        Err(format!("word count must be one of {WORD_COUNTS:?}"))
    }
}

/// Everything needed to run one grind.
#[derive(Debug, Clone)]
pub struct GrindSettings {
    pub search: SearchConfig,
    pub keygen: SolanaKeygen,
}

impl TryFrom<CliArgs> for GrindSettings {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let search = SearchConfig::new(args.starts_with)
            .with_case_insensitive(args.case_insensitive)
            .with_worker_count(args.tasks)
            .with_word_count(args.words)
            .with_deadline(args.timeout_secs.map(Duration::from_secs));
        search.validate()?;

        let keygen = SolanaKeygen::new(args.keygen).with_derivation_path(args.derivation_path);

        Ok(Self { search, keygen })
    }
}
