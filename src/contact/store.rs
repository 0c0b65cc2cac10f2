//! File-backed submission list
//!
//! The store is a single JSON array. Each append reads the array, pushes the
//! record and writes it back through a temp file + rename. Appends from this
//! process are serialised; other processes writing the same file can still
//! race.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use super::error::StoreError;
use super::submission::ContactRecord;

#[derive(Debug)]
pub struct ContactStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Returns the number of stored entries afterwards.
    pub async fn append(&self, record: &ContactRecord) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.push(serde_json::to_value(record)?);
        self.write_entries(&entries).await?;
        Ok(entries.len())
    }

    /// All entries that parse as contact records
    pub async fn records(&self) -> Result<Vec<ContactRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;
        Ok(self
            .read_entries()
            .await?
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }

    /// Missing file is an empty list. A file that is not a JSON array is
    /// moved aside so new submissions are not lost.
    async fn read_entries(&self) -> Result<Vec<Value>, StoreError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = self.path.with_extension("json.corrupt");
                log::warn!(
                    "Contact store {} is corrupt ({}); moving it to {}",
                    self.path.display(),
                    e,
                    backup.display()
                );
                fs::rename(&self.path, &backup).await?;
                Ok(Vec::new())
            }
        }
    }

    async fn write_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
