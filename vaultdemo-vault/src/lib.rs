//! Vault API client adapter
//!
//! A small HTTP client for the three Vault capabilities the demo apps use:
//! - AppRole login (`POST /v1/auth/approle/login`)
//! - dynamic database credentials (`GET /v1/database/creds/:role`)
//! - transit encrypt/decrypt (`POST /v1/transit/{encrypt,decrypt}/:key`)
//!
//! Every capability call rides on a fresh login; sessions are never cached
//! across requests.

mod client;
mod error;

pub use client::{DatabaseCredentials, VaultClient, VaultSession};
pub use error::VaultError;
