//! vaultdemo-transit - Vault transit encryption demo
//!
//! A single-page web app that encrypts user text through Vault's transit
//! engine and keeps the ciphertext records in a local JSON file. Decryption
//! happens on demand; plaintext never touches the disk.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultdemo_transit::{create_router, AppState, TransitConfig};

#[derive(Parser, Debug)]
#[command(name = "vaultdemo-transit")]
#[command(about = "Vault transit encryption demo", long_about = None)]
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

    /// Transit key name
    #[arg(long, default_value = "app-key", env = "TRANSIT_KEY")]
    transit_key: String,

    /// Directory for the record store
    #[arg(long, default_value = "data", env = "DATA_DIR")]
    data_dir: PathBuf,

    /// Record store file; defaults to encrypted_records.json in the data dir
    #[arg(long, env = "DATA_FILE")]
    data_file: Option<PathBuf>,

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
                format!("vaultdemo_transit={},tower_http=debug", args.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_file = args
        .data_file
        .unwrap_or_else(|| args.data_dir.join("encrypted_records.json"));

    let config = TransitConfig {
        vault_addr: args.vault_addr,
        role_id_path: args.role_id_path,
        secret_id_path: args.secret_id_path,
        transit_key: args.transit_key,
        data_dir: args.data_dir,
        data_file,
    };

    info!("Starting vaultdemo-transit...");
    info!("  Vault: {}", config.vault_addr);
    info!("  Transit key: {}", config.transit_key);
    info!("  Record store: {}", config.data_file.display());

    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
