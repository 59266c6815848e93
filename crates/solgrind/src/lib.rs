//! Speculative concurrent search for vanity keypairs.
//!
//! A search runs a fixed number of workers, each repeating a
//! generate-then-test loop, and returns the first key whose public
//! identifier starts with the requested prefix. The first worker to finish,
//! whether with a match or with a fatal generator error, decides the search;
//! the others stop before their next attempt.
//!
//! ```no_run
//! # async fn run() -> solgrind::Result<()> {
//! use solgrind::{Grinder, SearchConfig, SolanaKeygen};
//!
//! let config = SearchConfig::new("sol")
//!     .with_case_insensitive(true)
//!     .with_worker_count(8);
//! let grinder = Grinder::new(SolanaKeygen::default(), SolanaKeygen::default());
//! let key = grinder.search(&config).await?;
//! println!("{} {}", key.identifier(), key.secret().expose());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `keygen` (default): [`SolanaKeygen`], a generator and deriver backed by
//!   the `solana-keygen` executable.
//! - `tracing`: emit `tracing` spans and events. Secrets are never logged.

mod config;
mod error;
mod grind;
mod key;
#[cfg(feature = "keygen")]
mod keygen;
mod predicate;
mod source;

#[cfg(test)]
mod test_helpers;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::grind::*;
pub use crate::key::*;
#[cfg(feature = "keygen")]
pub use crate::keygen::*;
pub use crate::predicate::*;
pub use crate::source::*;

/// Runs a search with [`SolanaKeygen`] as both generator and deriver.
///
/// # Errors
///
/// See [`Grinder::search`].
#[cfg(feature = "keygen")]
pub async fn search(config: &SearchConfig) -> Result<Key> {
    let keygen = std::sync::Arc::new(SolanaKeygen::default());
    Grinder::from_shared(std::sync::Arc::clone(&keygen), keygen)
        .search(config)
        .await
}
