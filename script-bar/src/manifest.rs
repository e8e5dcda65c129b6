//! Task discovery from the project manifest
//!
//! Reads the `scripts` section of `package.json`. Every read is fresh; nothing
//! here is cached or defaulted beyond "no declarations".

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use script_bar_sdk::{ProjectStatus, TaskDeclaration};
use tracing::{debug, warn};

use crate::error::ManifestError;

/// Manifest file looked up in the project root
pub const MANIFEST_FILE: &str = "package.json";

/// Section of the manifest holding task name -> command
pub const SCRIPTS_KEY: &str = "scripts";

/// A parsed manifest. Any JSON value is accepted; shapes other than an object
/// with a `scripts` object simply declare nothing.
#[derive(Debug, Clone)]
pub struct Manifest {
    root: Value,
}

impl Manifest {
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let root = serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    fn scripts(&self) -> Option<&Map<String, Value>> {
        self.root.get(SCRIPTS_KEY)?.as_object()
    }

    /// Number of keys in the `scripts` section, string-valued or not
    pub fn declared_count(&self) -> usize {
        self.scripts().map(|s| s.len()).unwrap_or(0)
    }

    /// Declarations in manifest key order. Non-string commands are skipped.
    pub fn declarations(&self) -> Vec<TaskDeclaration> {
        let Some(scripts) = self.scripts() else {
            return Vec::new();
        };

        scripts
            .iter()
            .filter_map(|(name, command)| match command.as_str() {
                Some(command) => Some(TaskDeclaration::new(name.clone(), command)),
                None => {
                    debug!("Skipping script '{}': command is not a string", name);
                    None
                }
            })
            .collect()
    }
}

/// Path of the manifest inside `root`
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

/// Read and parse the manifest in `root`
pub async fn load_manifest(root: &Path) -> Result<Manifest, ManifestError> {
    let path = manifest_path(root);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
    Manifest::parse(&path, &content)
}

/// Declared tasks of the project at `root`. Never fails: a missing or
/// unparsable manifest declares nothing.
pub async fn read_declarations(root: &Path) -> Vec<TaskDeclaration> {
    match load_manifest(root).await {
        Ok(manifest) => manifest.declarations(),
        Err(ManifestError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!("No manifest in {}", root.display());
            Vec::new()
        }
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Coarse status of the project at `root`
pub async fn project_status(root: Option<&Path>) -> ProjectStatus {
    let Some(root) = root else {
        return ProjectStatus::NoRoot;
    };

    match tokio::fs::metadata(root).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return ProjectStatus::NoRoot,
    }

    match load_manifest(root).await {
        Err(_) => ProjectStatus::NoManifest,
        Ok(manifest) if manifest.declared_count() == 0 => ProjectStatus::NoDeclarations,
        Ok(_) => ProjectStatus::Ready,
    }
}
