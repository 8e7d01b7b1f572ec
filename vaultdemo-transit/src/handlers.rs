//! HTTP handlers for the transit demo

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use vaultdemo_core::Notice;
use vaultdemo_vault::VaultError;

use crate::render::{self, TransitView};
use crate::store::EncryptedRecord;
use crate::{AppState, TransitError};

/// Form fields posted by the page
#[derive(Debug, Deserialize)]
pub struct TransitForm {
    pub action: Option<String>,
    #[serde(default)]
    pub plaintext: String,
    pub record_id: Option<String>,
}

/// What a completed action hands back to the renderer
#[derive(Debug)]
pub enum ActionOutcome {
    Encrypted,
    Decrypted(String),
}

/// GET `/` — render the stored records
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let (records, notice) = load_records(&state);
    Html(render::page_view(&TransitView {
        records: &records,
        decrypted: None,
        selected_record_id: None,
        draft: "",
        notice: notice.as_ref(),
    }))
}

/// POST `/` — run the selected action, then re-render with a one-shot notice
pub async fn submit(State(state): State<Arc<AppState>>, Form(form): Form<TransitForm>) -> Html<String> {
    let (mut records, load_notice) = load_records(&state);
    if let Some(notice) = load_notice {
        return Html(render::page_view(&TransitView {
            records: &records,
            decrypted: None,
            selected_record_id: None,
            draft: &form.plaintext,
            notice: Some(&notice),
        }));
    }

    let selected_record_id = form
        .record_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let mut draft = form.plaintext.clone();
    let mut decrypted = None;

    let notice = match perform_action(&state, &mut records, &form).await {
        Ok(ActionOutcome::Encrypted) => {
            info!(records = records.len(), "secret encrypted and stored");
            draft.clear();
            Notice::success("Secret encrypted and stored on disk.")
        }
        Ok(ActionOutcome::Decrypted(plaintext)) => {
            info!("ciphertext decrypted on demand");
            decrypted = Some(plaintext);
            Notice::success("Ciphertext decrypted on demand.")
        }
        Err(e) => {
            warn!(error = %e, "action failed");
            Notice::error(e.user_message())
        }
    };

    Html(render::page_view(&TransitView {
        records: &records,
        decrypted: decrypted.as_deref(),
        selected_record_id: selected_record_id.as_deref(),
        draft: &draft,
        notice: Some(&notice),
    }))
}

fn load_records(state: &AppState) -> (Vec<EncryptedRecord>, Option<Notice>) {
    match state.store.load() {
        Ok(records) => (records, None),
        Err(e) => {
            warn!(error = %e, "failed to load record store");
            (Vec::new(), Some(Notice::error(format!("Unexpected error: {e}"))))
        }
    }
}

/// Dispatch on the form's `action` field
pub async fn perform_action(
    state: &AppState,
    records: &mut Vec<EncryptedRecord>,
    form: &TransitForm,
) -> Result<ActionOutcome, TransitError> {
    match form.action.as_deref() {
        Some("encrypt") => {
            encrypt_action(state, records, &form.plaintext).await?;
            Ok(ActionOutcome::Encrypted)
        }
        Some("decrypt") => {
            let record_id = form.record_id.as_deref().unwrap_or("").trim();
            let plaintext = decrypt_action(state, records, record_id).await?;
            Ok(ActionOutcome::Decrypted(plaintext))
        }
        other => Err(TransitError::UnknownAction(
            other.unwrap_or("").to_string(),
        )),
    }
}

/// Encrypt the submitted plaintext and prepend the new record to the store.
///
/// The whole chain runs fresh per request: credential files, AppRole login,
/// one transit call, full store rewrite.
pub async fn encrypt_action(
    state: &AppState,
    records: &mut Vec<EncryptedRecord>,
    raw_plaintext: &str,
) -> Result<(), TransitError> {
    let plaintext = raw_plaintext.trim();
    if plaintext.is_empty() {
        return Err(TransitError::EmptyPlaintext);
    }

    let approle = state.config.credential_paths().load()?;
    let session = state.vault.login(&approle).await?;
    let ciphertext = state
        .vault
        .encrypt(&session, &state.config.transit_key, plaintext.as_bytes())
        .await?;

    records.insert(0, EncryptedRecord::new(ciphertext));
    state.store.save(records)?;
    Ok(())
}

/// Decrypt a stored record by id. The recovered plaintext is returned for
/// display only; it is never persisted.
pub async fn decrypt_action(
    state: &AppState,
    records: &[EncryptedRecord],
    record_id: &str,
) -> Result<String, TransitError> {
    if record_id.is_empty() {
        return Err(TransitError::NoRecordSelected);
    }

    let record = records
        .iter()
        .find(|r| r.id == record_id)
        .ok_or_else(|| TransitError::RecordNotFound(record_id.to_string()))?;

    let approle = state.config.credential_paths().load()?;
    let session = state.vault.login(&approle).await?;
    let bytes = state
        .vault
        .decrypt(&session, &state.config.transit_key, &record.ciphertext)
        .await?;

    Ok(String::from_utf8(bytes).map_err(VaultError::from)?)
}
