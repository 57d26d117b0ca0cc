//! API smoke test binary
//!
//! Runs the task scenario against a live server, either one that is already
//! running (`--base-url`) or one started from `--server-binary`.

mod smoke;

use anyhow::Result;
use clap::Parser;
use smoke::SmokeHarness;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the smoke run
#[derive(Parser)]
#[command(name = "api-smoke")]
#[command(about = "Black-box HTTP scenario runner for the task server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct SmokeArgs {
    /// Base URL of a running server
    #[arg(long, env = "API_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Start this server binary instead of attaching to `--base-url`
    #[arg(long, conflicts_with = "base_url")]
    server_binary: Option<PathBuf>,

    /// Port for a spawned server
    #[arg(long, default_value = "8891")]
    server_port: u16,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SmokeArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let harness = match args.server_binary {
        Some(binary) => {
            if !binary.exists() {
                return Err(anyhow::anyhow!(
                    "Server binary not found at {:?}. Build it first with: cargo build --bin task-server",
                    binary
                ));
            }
            SmokeHarness::spawn(binary, args.server_port)?
        }
        None => SmokeHarness::attach(args.base_url)?,
    };

    harness.wait_until_ready().await?;
    harness.run_all().await?;

    info!("API smoke run completed successfully");
    Ok(())
}
