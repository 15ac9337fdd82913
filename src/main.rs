//! Service entry point: loads configuration, sets up logging and runs the server.

use anyhow::{Context, Result};
use clap::Parser;
use shortening_service::config::{Config, load_from_env};
use shortening_service::server;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// URL shortening service.
#[derive(Parser)]
#[command(name = "shortening-service")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load environment variables from this file instead of `./.env`
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Bind address, overriding `LISTEN` and `PORT`
    #[arg(long, value_name = "HOST:PORT")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let config = load_config(cli.listen)?;

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn load_config(listen: Option<String>) -> Result<Config> {
    let Some(listen) = listen else {
        return load_from_env();
    };

    let mut config = Config::from_env()?;
    config.listen_addr = listen;
    config.validate()?;

    Ok(config)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
