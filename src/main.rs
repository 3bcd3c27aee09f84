//! Server binary for the integrated employment tax credit engine.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use employment_credit::api::{AppState, create_router};
use employment_credit::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "EMPLOYMENT_CREDIT_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/integrated_employment";
const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(
    name = "employment-credit",
    about = "Integrated employment tax credit calculator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the calculation API over HTTP
    Serve {
        /// Port to listen on
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let port = match cli.command {
        Some(Command::Serve { port }) => port.unwrap_or(DEFAULT_PORT),
        None => DEFAULT_PORT,
    };

    let config_dir = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));
    let config = ConfigLoader::load(&config_dir)?;
    let (latest_year, _) = config.latest_policy();
    info!(
        config_dir = %config_dir.display(),
        scheme = %config.scheme().code,
        latest_policy_year = latest_year,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "employment credit engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
