//! Demo web app: transit encryption with ciphertext records on disk
//!
//! One route (`/`). A POST either encrypts user text through Vault's transit
//! engine and persists the ciphertext record to a JSON file, or decrypts a
//! previously stored record on demand. Plaintext is never written to disk;
//! decrypted output is shown once and discarded.

pub mod handlers;
pub mod render;
pub mod store;

use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use vaultdemo_core::{CredentialError, CredentialPaths};
use vaultdemo_vault::{VaultClient, VaultError};

use store::RecordStore;

/// App configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct TransitConfig {
    pub vault_addr: String,
    pub role_id_path: PathBuf,
    pub secret_id_path: PathBuf,
    /// Transit key name used for every encrypt/decrypt call
    pub transit_key: String,
    pub data_dir: PathBuf,
    pub data_file: PathBuf,
}

impl TransitConfig {
    pub fn credential_paths(&self) -> CredentialPaths {
        CredentialPaths::new(self.role_id_path.clone(), self.secret_id_path.clone())
    }
}

/// Anything that can abort the encrypt or decrypt workflow
#[derive(Debug, Error)]
pub enum TransitError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Plaintext cannot be empty")]
    EmptyPlaintext,

    #[error("Select a record to decrypt")]
    NoRecordSelected,

    #[error("Record not found")]
    RecordNotFound(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Store(#[from] std::io::Error),
}

impl TransitError {
    /// The single message shown to the user.
    ///
    /// Form-validation failures and credential problems keep their own
    /// wording, as does a decrypt response that omits the plaintext field;
    /// transport and filesystem failures go through the catch-all.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownAction(_)
            | Self::EmptyPlaintext
            | Self::NoRecordSelected
            | Self::RecordNotFound(_)
            | Self::Credential(_)
            | Self::Vault(VaultError::MissingPlaintext) => self.to_string(),
            other => format!("Unexpected error: {other}"),
        }
    }
}

/// Shared handler state
pub struct AppState {
    pub config: TransitConfig,
    pub vault: VaultClient,
    pub store: RecordStore,
}

impl AppState {
    pub fn new(config: TransitConfig) -> Result<Self, VaultError> {
        let vault = VaultClient::new(&config.vault_addr)?;
        let store = RecordStore::new(config.data_dir.clone(), config.data_file.clone());
        Ok(Self {
            config,
            vault,
            store,
        })
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
    fn test_validation_errors_keep_their_message() {
        assert_eq!(
            TransitError::EmptyPlaintext.user_message(),
            "Plaintext cannot be empty"
        );
        assert_eq!(
            TransitError::NoRecordSelected.user_message(),
            "Select a record to decrypt"
        );
        assert_eq!(
            TransitError::RecordNotFound("abc".to_string()).user_message(),
            "Record not found"
        );
        assert_eq!(
            TransitError::UnknownAction("rotate".to_string()).user_message(),
            "Unknown action: rotate"
        );
    }

    #[test]
    fn test_missing_plaintext_keeps_its_message() {
        let err = TransitError::Vault(VaultError::MissingPlaintext);
        assert_eq!(err.user_message(), "Decrypt response missing plaintext");
    }

    #[test]
    fn test_transport_errors_use_the_catch_all() {
        let err = TransitError::Vault(VaultError::Api {
            status: 500,
            message: "internal error".to_string(),
        });
        assert!(err.user_message().starts_with("Unexpected error: "));

        let err = TransitError::Store(std::io::Error::other("disk on fire"));
        assert!(err.user_message().starts_with("Unexpected error: "));
    }
}
