//! Registry Snapshot Persistence
//!
//! Provides explicit JSON save/load for a registry, plus an overview
//! file containing the rendered report.
//!
//! Snapshots default to `.flowtrace/{registry_name}.snapshot.json` in
//! the current directory.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::report;

use super::model::Registry;

/// Directory snapshots are written to when no explicit path is given.
const SNAPSHOT_DIR: &str = ".flowtrace";

/// A registry snapshot with capture metadata.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Snapshot {
    /// When the snapshot was captured
    pub saved_at: DateTime<Utc>,

    /// The captured registry state
    pub registry: Registry,
}

impl Snapshot {
    /// Captures the current state of a registry.
    pub fn capture(registry: &Registry) -> Self {
        Self {
            saved_at: Utc::now(),
            registry: registry.clone(),
        }
    }

    /// Saves the snapshot as pretty-printed JSON.
    ///
    /// With no explicit path, writes to
    /// `.flowtrace/{registry_name}.snapshot.json`, creating the
    /// directory if needed.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, Box<dyn Error>> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => {
                fs::create_dir_all(SNAPSHOT_DIR)?;
                default_snapshot_path(&self.registry.name)
            }
        };

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&target, json)?;

        info!("Saved registry snapshot to {}", target.display());
        Ok(target)
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// Returns an error if the file does not exist or cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        info!(
            "Loaded snapshot of registry '{}' ({} workflows, captured {})",
            snapshot.registry.name,
            snapshot.registry.len(),
            snapshot.saved_at
        );

        Ok(snapshot)
    }
}

/// Returns the default snapshot path for a registry name.
pub fn default_snapshot_path(registry_name: &str) -> PathBuf {
    PathBuf::from(SNAPSHOT_DIR).join(format!("{}.snapshot.json", registry_name))
}

/// Writes the rendered report of a registry to an overview file.
pub fn write_overview(registry: &Registry, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, report::render(registry))?;
    info!("Wrote registry overview to {}", path.display());
    Ok(())
}
