use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private material from which an identifier is derived (a BIP39 seed phrase
/// for the Solana generator).
///
/// The contents never appear in `Debug` output, and this value's buffer is
/// wiped from memory on drop. Strings borrowed through [`Secret::expose`] and
/// copied elsewhere are not covered.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret in the clear.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Raw output of a candidate generator.
///
/// `raw_identifier` is whatever the generator printed for the fresh keypair.
/// It is not the identifier that gets matched: that one is re-derived from the
/// secret along a fixed derivation path.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub secret: Secret,
    pub raw_identifier: String,
}

/// The result of a successful search: a secret and its derived public
/// identifier.
///
/// A `Key` is handed to the caller of [`crate::Grinder::search`] and nothing
/// else keeps a copy, so the type is deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct Key {
    secret: Secret,
    identifier: String,
}

impl Key {
    pub fn new(secret: Secret, identifier: impl Into<String>) -> Self {
        Self {
            secret,
            identifier: identifier.into(),
        }
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn into_parts(self) -> (Secret, String) {
        (self.secret, self.identifier)
    }
}
