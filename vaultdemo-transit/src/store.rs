//! File-backed store for encrypted records
//!
//! A flat JSON array, read in full and rewritten in full on every mutation.
//! There is no locking: two concurrent writers can lose each other's records
//! in the read-modify-write window. That matches the behavior this demo
//! ports; a production store would take a single-writer lock or append to a
//! log instead.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

/// One stored ciphertext, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// UUID string; record identity
    pub id: String,
    /// Opaque Vault-formatted ciphertext token
    pub ciphertext: String,
    /// ISO-8601 UTC timestamp with a literal "Z" suffix
    pub created_at: String,
}

impl EncryptedRecord {
    /// Build a fresh record for a just-encrypted ciphertext
    pub fn new(ciphertext: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ciphertext,
            created_at: current_timestamp(),
        }
    }
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Newest-first list of encrypted records in one JSON file
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
    file: PathBuf,
}

impl RecordStore {
    pub fn new(dir: PathBuf, file: PathBuf) -> Self {
        Self { dir, file }
    }

    /// Create the data directory and an empty record file if absent
    fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        if !self.file.exists() {
            fs::write(&self.file, "[]")?;
        }
        Ok(())
    }

    /// Load all records. An absent or blank file is an empty list; a file
    /// that fails to parse is also treated as empty rather than an error,
    /// so a corrupt store degrades to a fresh one on the next save.
    pub fn load(&self) -> io::Result<Vec<EncryptedRecord>> {
        self.ensure()?;
        let raw = fs::read_to_string(&self.file)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(file = %self.file.display(), error = %e, "record store unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Rewrite the whole file, pretty-printed
    pub fn save(&self, records: &[EncryptedRecord]) -> io::Result<()> {
        self.ensure()?;
        let json = serde_json::to_string_pretty(records).map_err(io::Error::other)?;
        fs::write(&self.file, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &std::path::Path) -> RecordStore {
        RecordStore::new(dir.join("data"), dir.join("data").join("records.json"))
    }

    #[test]
    fn test_absent_file_is_empty_and_lazily_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.load().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("data").join("records.json")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_invalid_json_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data").join("records.json"),
            "{not valid json",
        )
        .unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let newer = EncryptedRecord::new("vault:v1:bbbb".to_string());
        let older = EncryptedRecord::new("vault:v1:aaaa".to_string());
        store.save(&[newer.clone(), older.clone()]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![newer, older]);
    }

    #[test]
    fn test_save_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store
            .save(&[EncryptedRecord::new("vault:v1:aaaa".to_string())])
            .unwrap();

        let raw = fs::read_to_string(dir.path().join("data").join("records.json")).unwrap();
        assert!(raw.contains("\n  {"));
        assert!(raw.contains("\"ciphertext\": \"vault:v1:aaaa\""));
    }

    #[test]
    fn test_new_record_has_uuid_and_utc_timestamp() {
        let record = EncryptedRecord::new("vault:v1:aaaa".to_string());
        assert_eq!(Uuid::parse_str(&record.id).unwrap().get_version_num(), 4);
        assert!(record.created_at.ends_with('Z'));

        let other = EncryptedRecord::new("vault:v1:bbbb".to_string());
        assert_ne!(record.id, other.id);
    }
}
