use super::{CandidateGenerator, IdentifierDeriver};
use crate::{GeneratorError, GeneratorParams, Key};

/// Runs one generate-then-derive cycle.
///
/// The generator's own identifier is dropped: the returned [`Key`] carries the
/// identifier derived from the secret, which is the one callers match on.
///
/// # Errors
///
/// Any [`GeneratorError`] from either step is returned as-is. Nothing is
/// retried here.
pub async fn run_attempt<G, D>(
    generator: &G,
    deriver: &D,
    params: &GeneratorParams,
) -> Result<Key, GeneratorError>
where
    G: CandidateGenerator,
    D: IdentifierDeriver,
{
    let candidate = generator.generate(params).await?;
    let identifier = deriver.derive(&candidate.secret).await?;

    #[cfg(feature = "tracing")]
    tracing::trace!(
        raw = %candidate.raw_identifier,
        derived = %identifier,
        "Derived primary identifier"
    );

    Ok(Key::new(candidate.secret, identifier))
}
