use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Cli;
use swms_client::{ClientError, Config};

#[tokio::main]
async fn main() {
    let config = match Config::from_env().map_err(ClientError::Config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .init();
    config.print_info();

    let cli = Cli::parse();
    if let Err(e) = cli.execute(&config).await {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
