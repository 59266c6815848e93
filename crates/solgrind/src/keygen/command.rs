use super::{parse_new_keypair, parse_pubkey};
use crate::{Candidate, CandidateGenerator, GeneratorError, GeneratorParams, IdentifierDeriver, Secret};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use zeroize::{Zeroize, Zeroizing};

/// Executable looked up on `PATH` by default.
pub const DEFAULT_PROGRAM: &str = "solana-keygen";

/// Derivation path of the primary account of a Solana wallet.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/501'/0'/0'";

/// Generator and deriver backed by the `solana-keygen` CLI.
///
/// - Generation runs `solana-keygen new --no-outfile --word-count <n>` with an
///   empty BIP39 passphrase and reads the seed phrase from its output.
/// - Derivation runs `solana-keygen pubkey prompt://?full-path=<path>` and
///   feeds it the seed phrase, yielding the public key of the account at
///   `derivation_path`.
///
/// In-flight processes are never killed; a grind that has already been
/// decided simply ignores their output.
#[derive(Debug, Clone)]
pub struct SolanaKeygen {
    program: OsString,
    derivation_path: String,
}

impl Default for SolanaKeygen {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl SolanaKeygen {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            derivation_path: DEFAULT_DERIVATION_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn with_derivation_path(mut self, derivation_path: impl Into<String>) -> Self {
        self.derivation_path = derivation_path.into();
        self
    }

    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Spawns the program with `args`, writes `input` to its stdin, and
    /// returns its stdout.
    ///
    /// The output of `new` carries the seed phrase, so it is wiped once the
    /// caller is done with it.
    async fn run(&self, args: &[&str], input: &[u8]) -> Result<Zeroizing<String>, GeneratorError> {
        let program = self.program_name();

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| GeneratorError::Spawn {
                program: program.clone(),
                reason: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(input).await {
                Ok(()) => {}
                // The program exited without reading its input; its status
                // and output are checked below.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("`{program}` closed stdin early");
                }
                Err(e) => {
                    return Err(GeneratorError::Io {
                        context: format!("writing to `{program}`"),
                        reason: e.to_string(),
                    });
                }
            }
            // Dropping stdin closes the pipe so the program sees EOF.
        }

        let output = child.wait_with_output().await.map_err(|e| GeneratorError::Io {
            context: format!("waiting for `{program}`"),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(GeneratorError::Exited {
                program,
                code: output.status.code(),
            });
        }

        let stdout = match String::from_utf8(output.stdout) {
            Ok(text) => text,
            Err(e) => {
                let mut bytes = e.into_bytes();
                let text = String::from_utf8_lossy(&bytes).into_owned();
                bytes.zeroize();
                text
            }
        };
        Ok(Zeroizing::new(stdout))
    }
}

impl CandidateGenerator for SolanaKeygen {
    async fn generate(&self, params: &GeneratorParams) -> Result<Candidate, GeneratorError> {
        let word_count = params.word_count.to_string();
        let output = self
            .run(
                &["new", "--no-outfile", "--word-count", word_count.as_str()],
                b"\n",
            )
            .await?;
        parse_new_keypair(&self.program_name(), &output)
    }
}

impl IdentifierDeriver for SolanaKeygen {
    async fn derive(&self, secret: &Secret) -> Result<String, GeneratorError> {
        let uri = format!("prompt://?full-path={}", self.derivation_path);
        let mut input = Vec::with_capacity(secret.expose().len() + 2);
        input.extend_from_slice(secret.expose().as_bytes());
        input.extend_from_slice(b"\n\n");

        let output = self.run(&["pubkey", uri.as_str()], &input).await;
        input.zeroize();

        parse_pubkey(&self.program_name(), &output?)
    }
}
