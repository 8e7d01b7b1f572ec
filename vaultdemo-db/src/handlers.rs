//! HTTP handlers for the database demo

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;
use tracing::{info, warn};

use vaultdemo_core::Notice;

use crate::query::{self, SecretRow};
use crate::{render, AppState, DbAppError};

/// GET `/` — render the empty page
pub async fn index(State(_state): State<Arc<AppState>>) -> Html<String> {
    Html(render::page_view(&[], None, None))
}

/// POST `/` — run the full credential-fetch-and-query workflow, then render
pub async fn submit(State(state): State<Arc<AppState>>) -> Html<String> {
    match run_workflow(&state).await {
        Ok((username, rows)) => {
            info!(rows = rows.len(), username = %username, "query succeeded");
            Html(render::page_view(&rows, Some(&username), None))
        }
        Err(e) => {
            warn!(error = %e, "workflow failed");
            Html(render::page_view(
                &[],
                None,
                Some(&Notice::error(e.user_message())),
            ))
        }
    }
}

/// Credential files -> AppRole login -> dynamic DB credentials -> query.
///
/// Strictly linear; the first failure aborts everything after it. Returns
/// the leased username alongside the rows so the page can show which
/// short-lived identity ran the query.
async fn run_workflow(state: &AppState) -> Result<(String, Vec<SecretRow>), DbAppError> {
    let approle = state.config.credential_paths().load()?;
    let session = state.vault.login(&approle).await?;
    let db_creds = state
        .vault
        .generate_database_credentials(&session, &state.config.vault_db_role)
        .await?;
    let rows = query::fetch_secrets(&state.config, &db_creds).await?;
    Ok((db_creds.username, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbAppConfig;
    use vaultdemo_core::CredentialError;

    fn config_with_missing_credentials(dir: &std::path::Path) -> DbAppConfig {
        DbAppConfig {
            vault_addr: "http://127.0.0.1:8200".to_string(),
            role_id_path: dir.join("role_id"),
            secret_id_path: dir.join("secret_id"),
            db_host: "postgres".to_string(),
            db_port: 5432,
            db_name: "appdb".to_string(),
            vault_db_role: "app-role".to_string(),
        }
    }

    #[tokio::test]
    async fn test_workflow_stops_at_missing_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config_with_missing_credentials(dir.path())).unwrap();

        let err = run_workflow(&state).await.unwrap_err();
        match err {
            DbAppError::Credential(CredentialError::MissingFiles(paths)) => {
                assert_eq!(paths.len(), 2);
            }
            other => panic!("expected MissingFiles, got {other:?}"),
        }
    }
}
