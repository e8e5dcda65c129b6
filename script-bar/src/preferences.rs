//! Preference file persistence
//!
//! The store lives at `<root>/.script-bar/preferences.json`. Reads are
//! self-healing: anything unreadable is replaced by an empty store.

use script_bar_sdk::PreferenceStore;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

pub const PREFERENCES_DIR: &str = ".script-bar";
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Get the path to the preference file of a project
pub fn preferences_path(root: &Path) -> PathBuf {
    root.join(PREFERENCES_DIR).join(PREFERENCES_FILE)
}

/// Read the preference file, reporting why it could not be used
pub async fn read_store(path: &Path) -> Result<PreferenceStore, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the preference file, falling back to an empty store
pub async fn load_store(path: &Path) -> PreferenceStore {
    match read_store(path).await {
        Ok(store) => store,
        Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!("No preference file at {}", path.display());
            PreferenceStore::default()
        }
        Err(e) => {
            warn!("{}, using empty preferences", e);
            PreferenceStore::default()
        }
    }
}

/// Replace the preference file with `store`, creating its directory if needed
pub async fn save_store(path: &Path, store: &PreferenceStore) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let mut content = serde_json::to_string_pretty(store).map_err(StoreError::Serialize)?;
    content.push('\n');

    tokio::fs::write(path, content)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Saved {} task preferences to {}", store.tasks.len(), path.display());
    Ok(())
}

/// Create the preference file with an empty store if it does not exist yet
pub async fn ensure_store(path: &Path) -> Result<(), StoreError> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }
    save_store(path, &PreferenceStore::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_bar_sdk::{RunMode, TaskPreference};

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_store(&preferences_path(dir.path())).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = preferences_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        for content in ["{ nope", "[]", "42", r#"{"other": true}"#] {
            std::fs::write(&path, content).unwrap();
            assert!(load_store(&path).await.is_empty(), "{}", content);
        }
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let path = preferences_path(dir.path());

        let mut store = PreferenceStore::default();
        store.tasks.insert(
            "dev".to_string(),
            TaskPreference {
                enabled: Some(true),
                run_mode: Some(RunMode::Terminal),
                ..Default::default()
            },
        );
        save_store(&path, &store).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"tasks\": {\n    \"dev\": {\n      \"enabled\": true"));
        assert!(content.ends_with("}\n"));
        assert_eq!(load_store(&path).await, store);
    }

    #[tokio::test]
    async fn test_ensure_store_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = preferences_path(dir.path());

        ensure_store(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\n  \"tasks\": {}\n}\n");

        std::fs::write(&path, r#"{"tasks": {"dev": {"enabled": false}}}"#).unwrap();
        ensure_store(&path).await.unwrap();
        assert_eq!(load_store(&path).await.get("dev").unwrap().enabled, Some(false));
    }
}
