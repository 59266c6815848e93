//! Prefix matching for generated identifiers.

use crate::SearchConfig;

/// A compiled prefix test.
///
/// In case-insensitive mode the target prefix is lowercased once here, and
/// each identifier is lowercased before it is compared, so both sides go
/// through the same fold exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    prefix: String,
    case_insensitive: bool,
}

impl Matcher {
    pub fn new(prefix: &str, case_insensitive: bool) -> Self {
        let prefix = if case_insensitive {
            prefix.to_lowercase()
        } else {
            prefix.to_owned()
        };
        Self {
            prefix,
            case_insensitive,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.target_prefix, config.case_insensitive)
    }

    /// Returns `true` if `identifier` starts with the target prefix. An empty
    /// prefix matches everything.
    pub fn matches(&self, identifier: &str) -> bool {
        if self.prefix.is_empty() {
            return true;
        }
        if self.case_insensitive {
            identifier.to_lowercase().starts_with(&self.prefix)
        } else {
            identifier.starts_with(&self.prefix)
        }
    }
}

/// One-shot form of [`Matcher::matches`].
pub fn matches(identifier: &str, config: &SearchConfig) -> bool {
    Matcher::from_config(config).matches(identifier)
}
