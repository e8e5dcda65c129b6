//! Common test utilities for script-bar integration tests

#![allow(dead_code)]

use script_bar::preferences::preferences_path;
use script_bar::project::Project;
use script_bar_sdk::{PreferenceStore, RunMode};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project root
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project whose package.json declares `scripts` in order
    pub fn with_scripts(scripts: &[(&str, &str)]) -> Self {
        let project = Self::new();
        project.write_scripts(scripts);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn root_buf(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn project(&self, default_mode: RunMode) -> Project {
        Project::new(Some(self.root_buf()), default_mode)
    }

    pub fn write_manifest(&self, content: &str) {
        std::fs::write(self.root().join("package.json"), content).unwrap();
    }

    pub fn write_scripts(&self, scripts: &[(&str, &str)]) {
        let entries: Vec<String> = scripts
            .iter()
            .map(|(name, command)| format!("    \"{}\": \"{}\"", name, command))
            .collect();
        self.write_manifest(&format!(
            "{{\n  \"name\": \"fixture\",\n  \"scripts\": {{\n{}\n  }}\n}}\n",
            entries.join(",\n")
        ));
    }

    pub fn preferences_file(&self) -> PathBuf {
        preferences_path(self.root())
    }

    pub fn write_preferences(&self, content: &str) {
        let path = self.preferences_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read_preferences_raw(&self) -> String {
        std::fs::read_to_string(self.preferences_file()).unwrap()
    }

    pub fn read_preferences_json(&self) -> Value {
        serde_json::from_str(&self.read_preferences_raw()).unwrap()
    }

    pub fn read_preferences(&self) -> PreferenceStore {
        serde_json::from_str(&self.read_preferences_raw()).unwrap()
    }

    pub fn touch(&self, file: &str) {
        std::fs::write(self.root().join(file), "").unwrap();
    }
}

/// Names in display order
pub fn names(items: &[script_bar_sdk::TaskItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}
