use crate::{Candidate, GeneratorError, GeneratorParams, Secret};

/// Produces fresh `(secret, identifier)` candidates.
///
/// Every call is an independent draw. Implementations are shared between all
/// workers of a search, so they must be `Send + Sync` and must not rely on
/// being called sequentially.
pub trait CandidateGenerator: Send + Sync + 'static {
    /// Generates one candidate.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`] if no well-formed candidate could be
    /// produced.
    fn generate(
        &self,
        params: &GeneratorParams,
    ) -> impl Future<Output = Result<Candidate, GeneratorError>> + Send;
}

/// Derives the canonical public identifier for a secret.
pub trait IdentifierDeriver: Send + Sync + 'static {
    /// Derives the identifier that the search matches against.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`] if the derivation failed or produced no
    /// identifier.
    fn derive(&self, secret: &Secret) -> impl Future<Output = Result<String, GeneratorError>> + Send;
}
