use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::events::{StoreEvent, StoreSubscriber};
use crate::models::{AppData, ListExport};

/// Canonical document filename inside the data directory.
pub const DATA_FILE: &str = "appdata.json";

/// Reads and writes the snapshot documents under a single data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    /// Serializes the full snapshot to the canonical path, overwriting any
    /// prior document.
    pub fn write(&self, data: &AppData) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        let json = serde_json::to_string_pretty(data)?;
        let path = self.data_path();
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Reads the snapshot back. `Ok(None)` when no document exists yet;
    /// `Err` when the document cannot be read or parsed — the caller decides
    /// the fallback.
    pub fn read(&self) -> Result<Option<AppData>> {
        let path = self.data_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let data = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(data))
    }

    /// Writes a categories-only export next to the main document. The
    /// filename embeds the current timestamp; returns the full path.
    pub fn export(&self, export: &ListExport) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        let name = format!("lista_zakupow_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.data_dir.join(name);
        let json = serde_json::to_string_pretty(export)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Parses an export document from a picked file's byte stream.
    pub fn read_export<R: Read>(mut reader: R) -> Result<ListExport> {
        let mut json = String::new();
        reader
            .read_to_string(&mut json)
            .context("Failed to read import data")?;
        serde_json::from_str(&json).context("File is not a valid shopping list export")
    }
}

/// The single persistence subscriber: every store event triggers a full
/// snapshot write. Write failures are logged and swallowed — the in-memory
/// state stays authoritative and the operation that caused the save has
/// already succeeded.
pub struct SnapshotSaver {
    store: FileStore,
}

impl SnapshotSaver {
    #[must_use]
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}

impl StoreSubscriber for SnapshotSaver {
    fn on_change(&mut self, _event: &StoreEvent, snapshot: &AppData) {
        if let Err(e) = self.store.write(snapshot) {
            tracing::warn!("Failed to save snapshot: {:#}", e);
        }
    }
}
