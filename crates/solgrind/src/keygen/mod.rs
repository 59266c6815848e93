//! Candidate generation through the `solana-keygen` executable.
//!
//! Each call to [`SolanaKeygen`] spawns a fresh `solana-keygen` process, so the
//! cost of one attempt is dominated by process startup. The grind amortizes
//! that cost by running many attempts concurrently.

mod command;
mod parser;

pub use command::*;
pub use parser::*;
