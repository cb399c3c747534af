//! Whole-roster JSON snapshot with temp-file-and-rename writes.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Employee;
use crate::error::Result;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    next_id: u32,
    employees: Vec<&'a Employee>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    next_id: u32,
    employees: Vec<Employee>,
}

/// Contents read back from disk.
#[derive(Debug)]
pub struct LoadedSnapshot {
    pub next_id: u32,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file>.tmp` next to the target, so the rename never crosses filesystems.
    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Reads the snapshot. `Ok(None)` means no file exists yet.
    pub fn load(&self) -> Result<Option<LoadedSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let file: SnapshotIn = serde_json::from_slice(&bytes)?;
        Ok(Some(LoadedSnapshot {
            next_id: file.next_id,
            employees: file.employees,
        }))
    }

    /// Serializes the full roster to a temporary file and atomically renames it over the target.
    pub fn save<'a>(&self, employees: impl IntoIterator<Item = &'a Employee>, next_id: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = SnapshotOut {
            next_id,
            employees: employees.into_iter().collect(),
        };
        let json = serde_json::to_vec_pretty(&snapshot)?;

        let tmp_path = self.tmp_path();
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(&json)?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
