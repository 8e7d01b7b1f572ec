//! vaultdemo-db - Vault dynamic database credentials demo
//!
//! A single-page web app that authenticates to Vault with AppRole
//! credentials read from local files, requests a short-lived Postgres
//! credential pair, and runs one read-only query with it.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultdemo_db::{create_router, AppState, DbAppConfig};

#[derive(Parser, Debug)]
#[command(name = "vaultdemo-db")]
#[command(about = "Vault dynamic database credentials demo", long_about = None)]
struct Args {
    /// Vault server address
    #[arg(long, default_value = "http://vault:8200", env = "VAULT_ADDR")]
    vault_addr: String,

    /// Path to the AppRole role id file
    #[arg(long, default_value = "/vault-approle/role_id", env = "ROLE_ID_PATH")]
    role_id_path: PathBuf,

    /// Path to the AppRole secret id file
    #[arg(long, default_value = "/vault-approle/secret_id", env = "SECRET_ID_PATH")]
    secret_id_path: PathBuf,

    /// Postgres host
    #[arg(long, default_value = "postgres", env = "DB_HOST")]
    db_host: String,

    /// Postgres port
    #[arg(long, default_value = "5432", env = "DB_PORT")]
    db_port: u16,

    /// Postgres database name
    #[arg(long, default_value = "appdb", env = "DB_NAME")]
    db_name: String,

    /// Vault database engine role to request credentials for
    #[arg(long, default_value = "app-role", env = "VAULT_DB_ROLE")]
    vault_db_role: String,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0", env = "BIND_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "BIND_PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("vaultdemo_db={},tower_http=debug", args.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DbAppConfig {
        vault_addr: args.vault_addr,
        role_id_path: args.role_id_path,
        secret_id_path: args.secret_id_path,
        db_host: args.db_host,
        db_port: args.db_port,
        db_name: args.db_name,
        vault_db_role: args.vault_db_role,
    };

    info!("Starting vaultdemo-db...");
    info!("  Vault: {}", config.vault_addr);
    info!(
        "  Postgres: {}:{}/{}",
        config.db_host, config.db_port, config.db_name
    );

    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
