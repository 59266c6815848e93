mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, GrindSettings};
use solgrind::{Grinder, Key};
use std::sync::Arc;
use telemetry::init_telemetry;
use tokio::signal;

// Each attempt allocates a handful of strings across many tasks; mimalloc
// keeps that cheap, especially on musl.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let settings = GrindSettings::try_from(args)?;

    let providers = init_telemetry()?;

    if cfg!(debug_assertions) {
        tracing::debug!("Starting grind with full settings: {:#?}", settings);
    } else {
        tracing::debug!(
            "Starting grind for {:?} with {} workers",
            settings.search.target_prefix,
            settings.search.worker_count
        );
    }

    let result = run(settings).await;
    providers.shutdown();

    let key = result?;
    println!("Found matching seed phrase and public address:");
    println!("  seed:   {}", key.secret().expose());
    println!("  pubkey: {}", key.identifier());
    Ok(())
}

async fn run(settings: GrindSettings) -> anyhow::Result<Key> {
    let keygen = Arc::new(settings.keygen);
    let grinder = Grinder::from_shared(Arc::clone(&keygen), keygen);

    tokio::select! {
        res = grinder.search(&settings.search) => Ok(res?),
        () = shutdown_signal() => {
            anyhow::bail!("Interrupted before a matching key was found")
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}
