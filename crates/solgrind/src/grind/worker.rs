use crate::{
    CandidateGenerator, GeneratorError, GeneratorParams, IdentifierDeriver, Key, Matcher,
    run_attempt,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// How a [`Worker`] loop ended.
#[derive(Debug)]
pub enum WorkerExit {
    /// An attempt produced a key whose identifier satisfies the matcher.
    Matched { key: Key, attempts: u64 },
    /// An attempt failed. The worker does not retry.
    Failed {
        error: GeneratorError,
        attempts: u64,
    },
    /// The stop token was cancelled before a match was found.
    Stopped { attempts: u64 },
}

impl WorkerExit {
    /// Number of attempts this worker completed or failed.
    pub const fn attempts(&self) -> u64 {
        match self {
            Self::Matched { attempts, .. }
            | Self::Failed { attempts, .. }
            | Self::Stopped { attempts } => *attempts,
        }
    }
}

/// A sequential generate-test loop.
///
/// The worker knows nothing about its siblings. It repeats attempts until one
/// matches, one fails, or `stop` is cancelled. The token is checked only
/// between attempts: an attempt that has already started always runs to
/// completion, so an external generator call is never abandoned halfway.
pub struct Worker<G, D> {
    id: usize,
    generator: Arc<G>,
    deriver: Arc<D>,
    matcher: Arc<Matcher>,
    params: GeneratorParams,
    stop: CancellationToken,
}

impl<G, D> Worker<G, D>
where
    G: CandidateGenerator,
    D: IdentifierDeriver,
{
    pub const fn new(
        id: usize,
        generator: Arc<G>,
        deriver: Arc<D>,
        matcher: Arc<Matcher>,
        params: GeneratorParams,
        stop: CancellationToken,
    ) -> Self {
        Self {
            id,
            generator,
            deriver,
            matcher,
            params,
            stop,
        }
    }

    pub const fn id(&self) -> usize {
        self.id
    }

    /// Runs the loop to completion.
    ///
    /// There is no backoff between attempts; each attempt is already paced by
    /// the cost of the external calls it makes.
    pub async fn run(self) -> WorkerExit {
        #[cfg(feature = "tracing")]
        tracing::trace!("Worker {} started", self.id);

        let mut attempts: u64 = 0;

        let exit = loop {
            if self.stop.is_cancelled() {
                break WorkerExit::Stopped { attempts };
            }

            let result = run_attempt(&*self.generator, &*self.deriver, &self.params).await;
            attempts += 1;

            match result {
                Ok(key) if self.matcher.matches(key.identifier()) => {
                    break WorkerExit::Matched { key, attempts };
                }
                Ok(_key) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("Worker {} miss: {}", self.id, _key.identifier());
                }
                Err(error) => break WorkerExit::Failed { error, attempts },
            }
        };

        #[cfg(feature = "tracing")]
        match &exit {
            WorkerExit::Matched { attempts, .. } => {
                tracing::debug!("Worker {} matched after {attempts} attempts", self.id);
            }
            WorkerExit::Failed { error, attempts } => {
                tracing::debug!(
                    "Worker {} failed after {attempts} attempts: {error}",
                    self.id
                );
            }
            WorkerExit::Stopped { attempts } => {
                tracing::trace!("Worker {} stopped after {attempts} attempts", self.id);
            }
        }

        exit
    }
}
