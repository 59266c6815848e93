use crate::{Error, Result};
use core::time::Duration;

/// Worker count used when none is specified.
pub const DEFAULT_WORKER_COUNT: usize = 6;

/// Seed phrase length used when none is specified.
pub const DEFAULT_WORD_COUNT: u8 = 12;

/// Parameters forwarded verbatim to the candidate generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    /// Number of words in the generated seed phrase.
    pub word_count: u8,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}

/// Immutable input to a search.
///
/// Build one with [`SearchConfig::new`] and the `with_*` methods. The config
/// is shared read-only between all workers of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub target_prefix: String,
    pub case_insensitive: bool,
    pub worker_count: usize,
    pub generator: GeneratorParams,
    /// Optional overall time limit. `None` grinds until a match or a fatal
    /// error.
    pub deadline: Option<Duration>,
}

impl SearchConfig {
    pub fn new(target_prefix: impl Into<String>) -> Self {
        Self {
            target_prefix: target_prefix.into(),
            case_insensitive: false,
            worker_count: DEFAULT_WORKER_COUNT,
            generator: GeneratorParams::default(),
            deadline: None,
        }
    }

    #[must_use]
    pub const fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    #[must_use]
    pub const fn with_word_count(mut self, word_count: u8) -> Self {
        self.generator.word_count = word_count;
        self
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Checks the config before any worker is started.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `worker_count` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(Error::config("worker count must be at least 1"));
        }
        Ok(())
    }
}
