//! SUS Digital API server

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use sus_digital::server::{ServerOptions, run_server};
use tracing_subscriber::EnvFilter;

/// Authentication and records API for SUS Digital
#[derive(Debug, Parser)]
#[command(name = "sus-digital", version, about)]
struct Cli {
    /// YAML configuration file (defaults to config/sus.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind address, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let options = ServerOptions {
        config_path: cli.config,
        host: cli.host,
        port: cli.port,
    };

    match run_server(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, so multi-line messages stay readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
