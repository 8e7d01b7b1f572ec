//! HTTP client for the Vault API

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use vaultdemo_core::AppRoleCredentials;

use crate::error::VaultError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Vault REST API client
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    addr: String,
}

/// A client token obtained from one AppRole login, good for one capability call
#[derive(Clone)]
pub struct VaultSession {
    client_token: String,
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("client_token", &"<redacted>")
            .finish()
    }
}

/// A dynamic database credential pair issued by Vault
#[derive(Clone)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// === Wire types ===

#[derive(Serialize)]
struct LoginRequest<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: Option<AuthBlock>,
}

#[derive(Deserialize)]
struct AuthBlock {
    client_token: String,
}

#[derive(Deserialize)]
struct DatabaseCredsResponse {
    data: Option<DatabaseCredsData>,
}

#[derive(Deserialize)]
struct DatabaseCredsData {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct EncryptRequest {
    plaintext: String,
}

#[derive(Deserialize)]
struct EncryptResponse {
    data: Option<EncryptData>,
}

#[derive(Deserialize)]
struct EncryptData {
    ciphertext: Option<String>,
}

#[derive(Serialize)]
struct DecryptRequest<'a> {
    ciphertext: &'a str,
}

#[derive(Deserialize)]
struct DecryptResponse {
    data: Option<DecryptData>,
}

#[derive(Deserialize)]
struct DecryptData {
    plaintext: Option<String>,
}

#[derive(Deserialize)]
struct VaultErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

impl VaultClient {
    /// Create a client for the Vault server at `addr`
    pub fn new(addr: &str) -> Result<Self, VaultError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vaultdemo/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            addr: addr.trim_end_matches('/').to_string(),
        })
    }

    /// Log in with AppRole credentials, yielding a session token.
    ///
    /// Called once per incoming request; tokens are deliberately not cached
    /// or renewed.
    pub async fn login(&self, creds: &AppRoleCredentials) -> Result<VaultSession, VaultError> {
        let url = format!("{}/v1/auth/approle/login", self.addr);
        debug!(url = %url, role_id = %creds.role_id, "Vault AppRole login");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                role_id: &creds.role_id,
                secret_id: &creds.secret_id,
            })
            .send()
            .await?;

        let body: LoginResponse = check_status(response).await?.json().await?;
        let auth = body
            .auth
            .ok_or(VaultError::MissingField("auth.client_token"))?;

        Ok(VaultSession {
            client_token: auth.client_token,
        })
    }

    /// Generate a short-lived database credential pair for a named role
    pub async fn generate_database_credentials(
        &self,
        session: &VaultSession,
        role_name: &str,
    ) -> Result<DatabaseCredentials, VaultError> {
        let url = format!("{}/v1/database/creds/{}", self.addr, role_name);
        debug!(url = %url, role = %role_name, "Vault database credential request");

        let response = self
            .http
            .get(&url)
            .header("X-Vault-Token", &session.client_token)
            .send()
            .await?;

        let body: DatabaseCredsResponse = check_status(response).await?.json().await?;
        let data = body
            .data
            .ok_or(VaultError::MissingField("data.username"))?;

        Ok(DatabaseCredentials {
            username: data.username,
            password: data.password,
        })
    }

    /// Encrypt a payload under a transit key, returning the ciphertext token.
    ///
    /// The transit engine takes plaintext base64-encoded on the wire.
    pub async fn encrypt(
        &self,
        session: &VaultSession,
        key_name: &str,
        plaintext: &[u8],
    ) -> Result<String, VaultError> {
        let url = format!("{}/v1/transit/encrypt/{}", self.addr, key_name);
        debug!(url = %url, key = %key_name, "Vault transit encrypt");

        let response = self
            .http
            .post(&url)
            .header("X-Vault-Token", &session.client_token)
            .json(&EncryptRequest {
                plaintext: BASE64.encode(plaintext),
            })
            .send()
            .await?;

        let body: EncryptResponse = check_status(response).await?.json().await?;
        body.data
            .and_then(|d| d.ciphertext)
            .ok_or(VaultError::MissingField("data.ciphertext"))
    }

    /// Decrypt a transit ciphertext token, returning the recovered bytes
    pub async fn decrypt(
        &self,
        session: &VaultSession,
        key_name: &str,
        ciphertext: &str,
    ) -> Result<Vec<u8>, VaultError> {
        let url = format!("{}/v1/transit/decrypt/{}", self.addr, key_name);
        debug!(url = %url, key = %key_name, "Vault transit decrypt");

        let response = self
            .http
            .post(&url)
            .header("X-Vault-Token", &session.client_token)
            .json(&DecryptRequest { ciphertext })
            .send()
            .await?;

        let body: DecryptResponse = check_status(response).await?.json().await?;
        let b64_plaintext = body
            .data
            .and_then(|d| d.plaintext)
            .filter(|p| !p.is_empty())
            .ok_or(VaultError::MissingPlaintext)?;

        Ok(BASE64.decode(b64_plaintext)?)
    }
}

/// Map non-success statuses to `VaultError::Api` with Vault's error message
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, VaultError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<VaultErrorBody>()
        .await
        .ok()
        .map(|body| body.errors.join("; "))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Err(VaultError::Api {
        status: status.as_u16(),
        message,
    })
}
