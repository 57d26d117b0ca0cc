use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use task_server::{
    config::{Config, LogFormat},
    setup::initialize_app,
    telemetry::{
        init_telemetry, log_config_validation, log_shutdown_info, log_startup_info,
        report_error,
    },
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "task-server")]
#[command(about = "Task CRUD service backed by MySQL")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Listen port override
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format override (pretty, json, compact)
    #[arg(long, env = "LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Directory with the static client
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env(cli.config.as_deref())?;

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }

    if let Some(ref static_dir) = cli.static_dir {
        config.server.static_dir = static_dir.display().to_string();
    }

    Ok(config)
}

/// Resolve once SIGINT or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    log_config_validation(&config);
    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration validation failed");
        std::process::exit(1);
    }

    log_startup_info(&config);

    let (repository, server) = match initialize_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            report_error(&e, "startup");
            std::process::exit(1);
        }
    };

    let addr = config.server_address();
    let listener = match TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))
    {
        Ok(listener) => listener,
        Err(e) => {
            report_error(&e, "startup");
            repository.close().await;
            std::process::exit(1);
        }
    };

    let served = server.serve(listener, shutdown_signal()).await;

    log_shutdown_info();
    repository.close().await;

    if let Err(e) = served {
        error!(error = %e, "Task server error");
        std::process::exit(1);
    }

    info!("Task server shut down cleanly");
    Ok(())
}
