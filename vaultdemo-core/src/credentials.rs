//! AppRole credential loading

use std::fmt;
use std::path::{Path, PathBuf};

/// Errors raised while loading AppRole credentials
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// One or both credential files do not exist; lists every absent path
    #[error("AppRole credentials missing. Expected files: {}", join_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    #[error("AppRole credentials are empty")]
    Empty,

    #[error("Failed to read credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Filesystem locations of the role id and secret id files
#[derive(Debug, Clone)]
pub struct CredentialPaths {
    pub role_id: PathBuf,
    pub secret_id: PathBuf,
}

impl CredentialPaths {
    pub fn new(role_id: impl Into<PathBuf>, secret_id: impl Into<PathBuf>) -> Self {
        Self {
            role_id: role_id.into(),
            secret_id: secret_id.into(),
        }
    }

    /// Read both credential files, trimming surrounding whitespace.
    ///
    /// Checks for existence up front so the error can name every missing
    /// file, not just the first one. Called fresh on every request that
    /// needs Vault access; values are never cached.
    pub fn load(&self) -> Result<AppRoleCredentials, CredentialError> {
        let mut missing = Vec::new();
        if !self.role_id.exists() {
            missing.push(self.role_id.clone());
        }
        if !self.secret_id.exists() {
            missing.push(self.secret_id.clone());
        }
        if !missing.is_empty() {
            return Err(CredentialError::MissingFiles(missing));
        }

        let role_id = read_trimmed(&self.role_id)?;
        let secret_id = read_trimmed(&self.secret_id)?;

        if role_id.is_empty() || secret_id.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(AppRoleCredentials { role_id, secret_id })
    }
}

fn read_trimmed(path: &Path) -> Result<String, CredentialError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.trim().to_string())
}

/// An AppRole credential pair, both parts non-empty
#[derive(Clone)]
pub struct AppRoleCredentials {
    pub role_id: String,
    pub secret_id: String,
}

// Manual Debug so the secret id never lands in logs.
impl fmt::Debug for AppRoleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRoleCredentials")
            .field("role_id", &self.role_id)
            .field("secret_id", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn paths_in(dir: &Path) -> CredentialPaths {
        CredentialPaths::new(dir.join("role_id"), dir.join("secret_id"))
    }

    #[test]
    fn test_load_trims_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("role_id"), "  role-123\n").unwrap();
        fs::write(dir.path().join("secret_id"), "secret-456\n\n").unwrap();

        let creds = paths_in(dir.path()).load().unwrap();
        assert_eq!(creds.role_id, "role-123");
        assert_eq!(creds.secret_id, "secret-456");
    }

    #[test]
    fn test_missing_both_files_lists_both_paths() {
        let dir = tempfile::tempdir().unwrap();

        let err = paths_in(dir.path()).load().unwrap_err();
        match err {
            CredentialError::MissingFiles(paths) => {
                assert_eq!(paths.len(), 2);
                assert_eq!(paths[0], dir.path().join("role_id"));
                assert_eq!(paths[1], dir.path().join("secret_id"));
            }
            other => panic!("expected MissingFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_one_file_lists_only_that_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("role_id"), "role-123").unwrap();

        let err = paths_in(dir.path()).load().unwrap_err();
        match err {
            CredentialError::MissingFiles(paths) => {
                assert_eq!(paths, vec![dir.path().join("secret_id")]);
            }
            other => panic!("expected MissingFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_files_message_names_every_path() {
        let dir = tempfile::tempdir().unwrap();

        let err = paths_in(dir.path()).load().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("AppRole credentials missing."));
        assert!(message.contains(&dir.path().join("role_id").display().to_string()));
        assert!(message.contains(&dir.path().join("secret_id").display().to_string()));
    }

    #[test]
    fn test_whitespace_only_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("role_id"), "role-123").unwrap();
        fs::write(dir.path().join("secret_id"), "  \n\t\n").unwrap();

        let err = paths_in(dir.path()).load().unwrap_err();
        assert!(matches!(err, CredentialError::Empty));
    }

    #[test]
    fn test_debug_redacts_secret_id() {
        let creds = AppRoleCredentials {
            role_id: "role-123".to_string(),
            secret_id: "secret-456".to_string(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("role-123"));
        assert!(!printed.contains("secret-456"));
    }
}
