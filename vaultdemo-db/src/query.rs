//! One-shot Postgres query using Vault-issued credentials

use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, Row};
use std::time::Duration;

use vaultdemo_vault::DatabaseCredentials;

use crate::{DbAppConfig, DbAppError};

/// Bound on opening the connection; the query itself has no deadline
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const SECRETS_QUERY: &str = "SELECT id, secret_value, created_at FROM app_secrets ORDER BY id";

/// One row of the demo table
#[derive(Debug, Clone)]
pub struct SecretRow {
    pub id: i32,
    pub secret_value: String,
    pub created_at: DateTime<Utc>,
}

/// Open a single short-lived connection with the issued credentials, run the
/// fixed read-only query, and close the connection. The credential pair is
/// used for exactly this one connection and then discarded.
pub async fn fetch_secrets(
    config: &DbAppConfig,
    creds: &DatabaseCredentials,
) -> Result<Vec<SecretRow>, DbAppError> {
    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .database(&config.db_name)
        .username(&creds.username)
        .password(&creds.password);

    let mut conn = tokio::time::timeout(CONNECT_TIMEOUT, PgConnection::connect_with(&options))
        .await
        .map_err(|_| DbAppError::ConnectTimeout)??;

    let rows = sqlx::query(SECRETS_QUERY).fetch_all(&mut conn).await?;
    conn.close().await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(SecretRow {
            id: row.try_get("id")?,
            secret_value: row.try_get("secret_value")?,
            created_at: row.try_get("created_at")?,
        });
    }
    Ok(out)
}
