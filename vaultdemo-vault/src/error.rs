//! Vault client errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status; message comes from Vault's `{"errors": [...]}` body
    #[error("Vault returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Vault response missing field: {0}")]
    MissingField(&'static str),

    #[error("Decrypt response missing plaintext")]
    MissingPlaintext,

    #[error("Vault returned invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Decrypted payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
