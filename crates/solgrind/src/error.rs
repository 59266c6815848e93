//! Error types for the grind search.
//!
//! Two layers of failure exist:
//!
//! - [`GeneratorError`]: a single generation or derivation call could not
//!   produce a well-formed result (the external program failed to start,
//!   exited abnormally, or printed something we could not parse).
//! - [`Error`]: the search as a whole failed. A generator error observed by
//!   any worker before a winner is found becomes [`Error::Generator`].

use core::time::Duration;

pub type Result<T> = core::result::Result<T, Error>;

/// Failure of one call to a candidate generator or identifier deriver.
///
/// This is never retried by the attempt that produced it. Workers treat it as
/// fatal to the whole search, since retrying on malformed output would hide a
/// broken external dependency forever.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum GeneratorError {
    /// The external program could not be started.
    #[error("Failed to spawn `{program}`: {reason}")]
    Spawn { program: String, reason: String },

    /// Writing to or reading from the external program failed.
    #[error("I/O error while {context}: {reason}")]
    Io { context: String, reason: String },

    /// The external program exited with a non-zero status.
    #[error("`{program}` exited with status {}", exit_status(.code))]
    Exited { program: String, code: Option<i32> },

    /// The external program's output did not have the expected shape.
    #[error("Malformed output from `{program}`: expected {expected}")]
    MalformedOutput {
        program: String,
        expected: &'static str,
    },
}

fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
}

/// Unified error type for a grind search.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The search configuration was rejected before any worker started.
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// A worker hit a fatal generator error before any worker found a match.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// The optional overall deadline elapsed before a match was found.
    #[error("No match found within {0:?}")]
    DeadlineExceeded(Duration),

    /// Every worker exited without reporting a match or an error.
    #[error("All workers exited without a result")]
    WorkersExited,
}

impl Error {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
