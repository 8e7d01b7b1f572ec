//! Demo web app: dynamic Postgres credentials from Vault
//!
//! One route (`/`). A POST walks the whole chain fresh: load AppRole
//! credentials from disk, log in to Vault, ask the database secrets engine
//! for a short-lived Postgres credential pair, open one connection with it,
//! run a fixed read-only query, and render the rows. Any failure aborts the
//! chain and surfaces as a single message; partial results are never shown.

pub mod handlers;
pub mod query;
pub mod render;

use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use vaultdemo_core::{CredentialError, CredentialPaths};
use vaultdemo_vault::{VaultClient, VaultError};

/// App configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct DbAppConfig {
    pub vault_addr: String,
    pub role_id_path: PathBuf,
    pub secret_id_path: PathBuf,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    /// Named database role the Vault database engine issues credentials for
    pub vault_db_role: String,
}

impl DbAppConfig {
    pub fn credential_paths(&self) -> CredentialPaths {
        CredentialPaths::new(self.role_id_path.clone(), self.secret_id_path.clone())
    }
}

/// Anything that can abort the fetch-and-query workflow
#[derive(Debug, Error)]
pub enum DbAppError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Database connection timed out")]
    ConnectTimeout,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl DbAppError {
    /// The single message shown to the user.
    ///
    /// Credential problems keep their own wording; everything downstream of
    /// the credential files is reported through the catch-all.
    pub fn user_message(&self) -> String {
        match self {
            Self::Credential(e) => e.to_string(),
            other => format!("Unexpected error: {other}"),
        }
    }
}

/// Shared handler state
pub struct AppState {
    pub config: DbAppConfig,
    pub vault: VaultClient,
}

impl AppState {
    pub fn new(config: DbAppConfig) -> Result<Self, VaultError> {
        let vault = VaultClient::new(&config.vault_addr)?;
        Ok(Self { config, vault })
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_keep_their_message() {
        let err = DbAppError::Credential(CredentialError::Empty);
        assert_eq!(err.user_message(), "AppRole credentials are empty");
    }

    #[test]
    fn test_other_errors_use_the_catch_all() {
        let err = DbAppError::Vault(VaultError::Api {
            status: 403,
            message: "permission denied".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Unexpected error: Vault returned status 403: permission denied"
        );

        assert_eq!(
            DbAppError::ConnectTimeout.user_message(),
            "Unexpected error: Database connection timed out"
        );
    }
}
