//! Stub collaborators shared by the unit tests.
//!
//! Stub generators put the identifier they want matched into the secret as
//! `secret-<call>:<identifier>`, and the stub derivers read it back out, so
//! tests control the derived identifier through the generator alone.

use crate::{Candidate, CandidateGenerator, GeneratorError, GeneratorParams, IdentifierDeriver, Secret};
use core::time::Duration;
use rand::Rng;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn candidate(call: usize, identifier: &str) -> Candidate {
    Candidate {
        secret: Secret::new(format!("secret-{call}:{identifier}")),
        raw_identifier: identifier.to_string(),
    }
}

fn embedded_identifier(secret: &Secret) -> Result<&str, GeneratorError> {
    secret
        .expose()
        .split_once(':')
        .map(|(_, id)| id)
        .ok_or(GeneratorError::MalformedOutput {
            program: "stub".to_string(),
            expected: "an embedded identifier",
        })
}

/// Returns the scripted identifiers in call order, then repeats the last one.
pub struct ScriptedGenerator {
    script: Vec<String>,
    calls: AtomicUsize,
    last_word_count: Mutex<Option<u8>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: Vec<String> = script.into_iter().map(Into::into).collect();
        assert!(!script.is_empty(), "script must not be empty");
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_word_count: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_word_count(&self) -> Option<u8> {
        *self.last_word_count.lock().unwrap()
    }
}

impl CandidateGenerator for ScriptedGenerator {
    async fn generate(&self, params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        *self.last_word_count.lock().unwrap() = Some(params.word_count);
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let identifier = &self.script[call.min(self.script.len() - 1)];
        // Give other workers a chance to interleave.
        tokio::task::yield_now().await;
        Ok(candidate(call, identifier))
    }
}

/// Gives every call a distinct identifier: `<prefix><call>`.
pub struct UniqueGenerator {
    prefix: &'static str,
    calls: AtomicUsize,
}

impl UniqueGenerator {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            calls: AtomicUsize::new(0),
        }
    }
}

impl CandidateGenerator for UniqueGenerator {
    async fn generate(&self, _params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(candidate(call, &format!("{}{call}", self.prefix)))
    }
}

/// Always fails with [`GeneratorError::MalformedOutput`].
#[derive(Default)]
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CandidateGenerator for FailingGenerator {
    async fn generate(&self, _params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Err(GeneratorError::MalformedOutput {
            program: "stub".to_string(),
            expected: "a seed phrase",
        })
    }
}

/// Panics on every call, taking its worker task down with it.
pub struct PanickingGenerator;

impl CandidateGenerator for PanickingGenerator {
    async fn generate(&self, _params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        tokio::task::yield_now().await;
        panic!("stub generator panicked");
    }
}

/// Produces `hit` with probability `q`, otherwise `miss`.
pub struct RandomGenerator {
    q: f64,
    calls: AtomicUsize,
}

impl RandomGenerator {
    pub const fn new(q: f64) -> Self {
        Self {
            q,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CandidateGenerator for RandomGenerator {
    async fn generate(&self, _params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let hit = rand::rng().random_bool(self.q);
        tokio::task::yield_now().await;
        Ok(candidate(call, if hit { "hit" } else { "miss" }))
    }
}

/// Sleeps for `delay` before returning `identifier`, counting how many calls
/// were started and how many ran to completion.
pub struct SlowGenerator {
    delay: Duration,
    identifier: String,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl SlowGenerator {
    pub fn new(delay: Duration, identifier: impl Into<String>) -> Self {
        Self {
            delay,
            identifier: identifier.into(),
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl CandidateGenerator for SlowGenerator {
    async fn generate(&self, _params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        let call = self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(candidate(call, &self.identifier))
    }
}

/// What one [`StagedGenerator`] call does once its delay has passed.
#[derive(Clone, Copy)]
pub enum Stage {
    Yield(Duration, &'static str),
    Fail(Duration),
}

/// Plays `first` on call 0 and `rest` on every later call, counting started
/// and completed calls like [`SlowGenerator`].
pub struct StagedGenerator {
    first: Stage,
    rest: Stage,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl StagedGenerator {
    pub const fn new(first: Stage, rest: Stage) -> Self {
        Self {
            first,
            rest,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl CandidateGenerator for StagedGenerator {
    async fn generate(&self, _params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        let call = self.started.fetch_add(1, Ordering::SeqCst);
        let stage = if call == 0 { self.first } else { self.rest };
        let result = match stage {
            Stage::Yield(delay, identifier) => {
                tokio::time::sleep(delay).await;
                Ok(candidate(call, identifier))
            }
            Stage::Fail(delay) => {
                tokio::time::sleep(delay).await;
                Err(GeneratorError::MalformedOutput {
                    program: "stub".to_string(),
                    expected: "a seed phrase",
                })
            }
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// Returns the identifier embedded in the secret unchanged.
pub struct PassthroughDeriver;

impl IdentifierDeriver for PassthroughDeriver {
    async fn derive(&self, secret: &Secret) -> Result<String, GeneratorError> {
        embedded_identifier(secret).map(ToString::to_string)
    }
}

/// Appends a fixed suffix to the embedded identifier.
pub struct SuffixDeriver(pub &'static str);

impl IdentifierDeriver for SuffixDeriver {
    async fn derive(&self, secret: &Secret) -> Result<String, GeneratorError> {
        embedded_identifier(secret).map(|id| format!("{id}{}", self.0))
    }
}

/// Fails every derivation.
pub struct FailingDeriver;

impl IdentifierDeriver for FailingDeriver {
    async fn derive(&self, _secret: &Secret) -> Result<String, GeneratorError> {
        Err(GeneratorError::Exited {
            program: "stub".to_string(),
            code: Some(1),
        })
    }
}
