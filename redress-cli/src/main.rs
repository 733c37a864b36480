//! redress - HTTP API server for citizen complaint intake
//!
//! Boots the schema, then serves the complaints API until Ctrl+C or
//! SIGTERM.
//!
//! Configuration, in order of precedence:
//!   --database-url                    # explicit flag
//!   DATABASE_URL                      # environment
//!   ./.env, then ~/.redress/.env      # dotenv files (first hit wins)
//!
//! RUST_LOG controls log filtering (default: info, or debug with --debug).

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use redress_server::db::{create_pool, migrations};
use redress_server::http::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "redress",
    version,
    about = "HTTP API for citizen complaint intake"
)]
struct Cli {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Database URL (overrides environment and .env files)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Load .env from the current directory, then ~/.redress/.env.
///
/// dotenvy never overwrites variables that are already set, so the
/// current directory takes priority over the home config.
fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".redress").join(".env");
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;
    load_dotenv();

    // Load database URL from args, env, or .env files
    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.redress/.env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Schema bootstrap failed")?;

    info!("Starting redress server on {}", cli.bind);

    let config = ServerConfig {
        bind_addr: cli.bind,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
