//! Race-to-first-match scheduling over a pool of workers.
//!
//! [`Grinder::search`] spawns one Tokio task per worker and waits on a single
//! bounded channel. Whatever arrives first (a matching key or a fatal
//! generator error) decides the search. The channel is then dropped and the
//! shared [`CancellationToken`] is cancelled, so the remaining workers stop
//! before their next attempt and any late result has nowhere to go.
//!
//! The scheduler does not join the losing tasks. An attempt that is already
//! talking to the external generator finishes in the background and its
//! result is discarded.

use super::worker::{Worker, WorkerExit};
use crate::{
    CandidateGenerator, Error, GeneratorError, IdentifierDeriver, Key, Matcher, Result,
    SearchConfig,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// The first decisive report from a worker.
enum Outcome {
    Found { worker_id: usize, key: Key, attempts: u64 },
    Failed { worker_id: usize, error: GeneratorError },
}

/// Runs grind searches over a shared generator and deriver.
///
/// Both collaborators are shared by every worker of every search started from
/// this `Grinder`.
pub struct Grinder<G, D> {
    generator: Arc<G>,
    deriver: Arc<D>,
}

impl<G, D> Clone for Grinder<G, D> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            deriver: Arc::clone(&self.deriver),
        }
    }
}

impl<G, D> Grinder<G, D>
where
    G: CandidateGenerator,
    D: IdentifierDeriver,
{
    pub fn new(generator: G, deriver: D) -> Self {
        Self::from_shared(Arc::new(generator), Arc::new(deriver))
    }

    pub const fn from_shared(generator: Arc<G>, deriver: Arc<D>) -> Self {
        Self { generator, deriver }
    }

    /// Grinds until some worker finds a key whose identifier matches
    /// `config`, and returns that key.
    ///
    /// Exactly one key is ever returned per search: the first one reported
    /// in wall-clock order. Dropping the returned future cancels the workers
    /// as well.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `config.worker_count` is zero. Nothing is
    ///   spawned and the generator is never called.
    /// - [`Error::Generator`] if a worker hit a generator error before any
    ///   worker found a match.
    /// - [`Error::DeadlineExceeded`] if `config.deadline` elapsed first.
    /// - [`Error::WorkersExited`] if every worker exited without reporting.
    #[cfg_attr(feature = "tracing", tracing::instrument(
        name = "grind",
        skip_all,
        fields(prefix = %config.target_prefix, workers = config.worker_count)
    ))]
    pub async fn search(&self, config: &SearchConfig) -> Result<Key> {
        config.validate()?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Grinding for identifiers starting with {:?} (case-insensitive: {}) on {} workers",
            config.target_prefix,
            config.case_insensitive,
            config.worker_count
        );

        let stop = CancellationToken::new();
        // Cancels the workers on every exit path, including this future being
        // dropped mid-search.
        let _stop_guard = stop.clone().drop_guard();

        // Capacity 1: the first report is all the scheduler ever reads.
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(1);
        let matcher = Arc::new(Matcher::from_config(config));

        for worker_id in 0..config.worker_count {
            let worker = Worker::new(
                worker_id,
                Arc::clone(&self.generator),
                Arc::clone(&self.deriver),
                Arc::clone(&matcher),
                config.generator,
                stop.clone(),
            );
            tokio::spawn(report(worker, outcome_tx.clone(), stop.clone()));
        }
        // Only the workers hold senders now, so the channel closes if they
        // all exit silently.
        drop(outcome_tx);

        let first = match config.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, outcome_rx.recv()).await {
                Ok(first) => first,
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("No match found within {deadline:?}");
                    return Err(Error::DeadlineExceeded(deadline));
                }
            },
            None => outcome_rx.recv().await,
        };

        stop.cancel();

        match first {
            Some(Outcome::Found {
                worker_id: _worker_id,
                key,
                attempts: _attempts,
            }) => {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    "Worker {_worker_id} found {} after {_attempts} attempts",
                    key.identifier()
                );
                Ok(key)
            }
            Some(Outcome::Failed {
                worker_id: _worker_id,
                error,
            }) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Worker {_worker_id} failed, aborting search: {error}");
                Err(error.into())
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::error!("All workers exited without reporting a result");
                Err(Error::WorkersExited)
            }
        }
    }
}

/// Runs `worker` and forwards a decisive exit to the scheduler.
///
/// A send that loses the race either fails because the receiver is gone, or
/// is abandoned when `stop` fires while waiting for channel capacity. Both are
/// no-ops.
async fn report<G, D>(worker: Worker<G, D>, outcome_tx: mpsc::Sender<Outcome>, stop: CancellationToken)
where
    G: CandidateGenerator,
    D: IdentifierDeriver,
{
    let worker_id = worker.id();
    let outcome = match worker.run().await {
        WorkerExit::Matched { key, attempts } => Outcome::Found {
            worker_id,
            key,
            attempts,
        },
        WorkerExit::Failed { error, .. } => Outcome::Failed { worker_id, error },
        WorkerExit::Stopped { .. } => return,
    };

    tokio::select! {
        sent = outcome_tx.send(outcome) => {
            if sent.is_err() {
                #[cfg(feature = "tracing")]
                tracing::trace!("Worker {worker_id} result discarded, search already decided");
            }
        }
        () = stop.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::trace!("Worker {worker_id} result discarded, search already decided");
        }
    }
}
